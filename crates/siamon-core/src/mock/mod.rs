//! Test doubles for collectors.
//!
//! `MockApi` answers every node call from canned results and records which
//! calls were made. `RecordingSink` keeps every reported event.

mod api;
mod scenarios;
mod sink;

pub use api::MockApi;
pub use sink::RecordingSink;
