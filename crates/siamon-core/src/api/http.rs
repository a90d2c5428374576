//! Blocking HTTP client for siad.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::trace;

use super::types::{
    ConsensusStatus, ContractFilter, DaemonSettings, GatewayInfo, HostDbAll, HostInfo,
    RenterContracts, RenterDirectory, RenterInfo, WalletAddresses, WalletStatus,
};
use super::{ApiError, NodeApi};

/// siad API client.
///
/// Authenticates with HTTP basic auth (empty user name, API password) and
/// sends the configured `User-Agent`; siad rejects requests whose agent is
/// not `Sia-Agent` unless it was started with a different one.
///
/// No request timeout is set: a hanging call holds the current collection
/// tick until the node answers.
pub struct HttpApi {
    client: Client,
    base_url: String,
    password: String,
}

impl HttpApi {
    /// Creates a client for the node at `address` (`host:port` or a full URL).
    pub fn new(
        address: &str,
        user_agent: &str,
        password: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url(address),
            password: password.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        trace!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .basic_auth("", Some(&self.password))
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        decode_response(status, &body)
    }
}

fn base_url(address: &str) -> String {
    let address = address.trim().trim_end_matches('/');
    if address.starts_with("http://") || address.starts_with("https://") {
        address.to_string()
    } else {
        format!("http://{}", address)
    }
}

/// Error body returned by siad on failure.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Maps an HTTP status and body to a decoded value or an [`ApiError`].
///
/// siad answers unknown routes with 404, which is how a call to a module
/// that is not loaded looks from the outside.
fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    match status {
        200..=299 => serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string())),
        404 => Err(ApiError::NotRecognized),
        code => {
            let message = serde_json::from_str::<ErrorBody>(body)
                .map(|b| b.message)
                .unwrap_or_else(|_| body.trim().to_string());
            Err(ApiError::Status { code, message })
        }
    }
}

impl NodeApi for HttpApi {
    fn daemon_settings(&self) -> Result<DaemonSettings, ApiError> {
        self.get("/daemon/settings")
    }

    fn consensus(&self) -> Result<ConsensusStatus, ApiError> {
        self.get("/consensus")
    }

    fn wallet(&self) -> Result<WalletStatus, ApiError> {
        self.get("/wallet")
    }

    fn wallet_addresses(&self) -> Result<WalletAddresses, ApiError> {
        self.get("/wallet/addresses")
    }

    fn gateway(&self) -> Result<GatewayInfo, ApiError> {
        self.get("/gateway")
    }

    fn hostdb_all(&self) -> Result<HostDbAll, ApiError> {
        self.get("/hostdb/all")
    }

    fn host(&self) -> Result<HostInfo, ApiError> {
        self.get("/host")
    }

    fn renter_root_dir(&self) -> Result<RenterDirectory, ApiError> {
        self.get("/renter/dir/")
    }

    fn renter_contracts(&self, filter: ContractFilter) -> Result<RenterContracts, ApiError> {
        self.get(&format!("/renter/contracts?{}", filter.query()))
    }

    fn renter(&self) -> Result<RenterInfo, ApiError> {
        self.get("/renter")
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    use super::*;

    /// Answers a single request with `status` and `body`, returning the raw
    /// request head.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8(head).unwrap()
        });
        (addr, handle)
    }

    fn request_line(head: &str) -> &str {
        head.lines().next().unwrap_or_default()
    }

    fn header<'a>(head: &'a str, name: &str) -> Option<&'a str> {
        head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim())
        })
    }

    #[test]
    fn test_base_url() {
        assert_eq!(base_url("127.0.0.1:9980"), "http://127.0.0.1:9980");
        assert_eq!(base_url("http://node:9980/"), "http://node:9980");
        assert_eq!(base_url("https://node"), "https://node");
    }

    #[test]
    fn test_decode_success() {
        let settings: DaemonSettings =
            decode_response(200, r#"{"maxdownloadspeed": 10, "maxuploadspeed": 20}"#).unwrap();
        assert_eq!(settings.max_download_speed, 10);
        assert_eq!(settings.max_upload_speed, 20);
    }

    #[test]
    fn test_decode_not_found_is_not_recognized() {
        let err = decode_response::<ConsensusStatus>(404, r#"{"message": "404 - Refer to API.md"}"#)
            .unwrap_err();
        assert!(err.is_not_recognized());
    }

    #[test]
    fn test_decode_error_status_carries_message() {
        let err = decode_response::<WalletStatus>(490, r#"{"message": "wallet has not been unlocked"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                code: 490,
                message: "wallet has not been unlocked".to_string()
            }
        );

        let err = decode_response::<WalletStatus>(500, "internal error\n").unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500: internal error");
    }

    #[test]
    fn test_decode_malformed_body() {
        let err = decode_response::<ConsensusStatus>(200, "not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert!(!err.is_not_recognized());
    }

    #[test]
    fn test_request_carries_auth_and_agent() {
        let (addr, server) = serve_once("200 OK", r#"{"maxdownloadspeed": 1, "maxuploadspeed": 2}"#);
        let api = HttpApi::new(&addr, "Sia-Agent", "secret").unwrap();

        let settings = api.daemon_settings().unwrap();
        let head = server.join().unwrap();

        assert_eq!(settings.max_upload_speed, 2);
        assert_eq!(request_line(&head), "GET /daemon/settings HTTP/1.1");
        // empty user name, password "secret"
        assert_eq!(header(&head, "authorization"), Some("Basic OnNlY3JldA=="));
        assert_eq!(header(&head, "user-agent"), Some("Sia-Agent"));
    }

    #[test]
    fn test_configured_user_agent_is_sent() {
        let (addr, server) = serve_once("200 OK", r#"{"synced": true}"#);
        let api = HttpApi::new(&format!("http://{}/", addr), "custom-agent", "").unwrap();

        assert!(api.consensus().unwrap().synced);
        let head = server.join().unwrap();
        assert_eq!(request_line(&head), "GET /consensus HTTP/1.1");
        assert_eq!(header(&head, "user-agent"), Some("custom-agent"));
    }

    #[test]
    fn test_contract_filters_in_query() {
        for (filter, path) in [
            (ContractFilter::Disabled, "/renter/contracts?disabled=true"),
            (ContractFilter::Expired, "/renter/contracts?expired=true"),
        ] {
            let (addr, server) = serve_once("200 OK", r#"{"activecontracts": null}"#);
            let api = HttpApi::new(&addr, "Sia-Agent", "secret").unwrap();

            api.renter_contracts(filter).unwrap();
            let head = server.join().unwrap();
            assert_eq!(request_line(&head), format!("GET {} HTTP/1.1", path));
        }
    }

    #[test]
    fn test_not_found_response_is_not_recognized() {
        let (addr, server) = serve_once("404 Not Found", r#"{"message": "404 - Refer to API.md"}"#);
        let api = HttpApi::new(&addr, "Sia-Agent", "secret").unwrap();

        let err = api.host().unwrap_err();
        let head = server.join().unwrap();

        assert_eq!(err, ApiError::NotRecognized);
        assert_eq!(request_line(&head), "GET /host HTTP/1.1");
    }

    #[test]
    fn test_connection_refused_is_transport_error() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().to_string()
        };
        let api = HttpApi::new(&addr, "Sia-Agent", "").unwrap();
        assert!(matches!(api.gateway(), Err(ApiError::Transport(_))));
    }

    #[test]
    fn test_new_normalizes_address() {
        let api = HttpApi::new("localhost:9980", "Sia-Agent", "secret").unwrap();
        assert_eq!(api.base_url(), "http://localhost:9980");
    }
}
