//! Module selector: which siad modules to monitor.
//!
//! Configured as a string of single-character tags (e.g. `"cghmrtw"`).
//! Parsing is strict so that a stray character cannot silently enable or
//! disable a collector.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A siad module that can be selected for monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Module {
    Consensus,
    Gateway,
    Host,
    Miner,
    Renter,
    TransactionPool,
    Wallet,
}

impl Module {
    pub const ALL: [Module; 7] = [
        Module::Consensus,
        Module::Gateway,
        Module::Host,
        Module::Miner,
        Module::Renter,
        Module::TransactionPool,
        Module::Wallet,
    ];

    pub fn from_tag(tag: char) -> Option<Module> {
        match tag {
            'c' => Some(Module::Consensus),
            'g' => Some(Module::Gateway),
            'h' => Some(Module::Host),
            'm' => Some(Module::Miner),
            'r' => Some(Module::Renter),
            't' => Some(Module::TransactionPool),
            'w' => Some(Module::Wallet),
            _ => None,
        }
    }

    pub fn tag(self) -> char {
        match self {
            Module::Consensus => 'c',
            Module::Gateway => 'g',
            Module::Host => 'h',
            Module::Miner => 'm',
            Module::Renter => 'r',
            Module::TransactionPool => 't',
            Module::Wallet => 'w',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Module::Consensus => "consensus",
            Module::Gateway => "gateway",
            Module::Host => "host",
            Module::Miner => "miner",
            Module::Renter => "renter",
            Module::TransactionPool => "transactionpool",
            Module::Wallet => "wallet",
        }
    }
}

/// Error returned for an unparseable module selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSelectorError {
    pub tag: char,
}

impl fmt::Display for ModuleSelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown module '{}' (expected any of c, g, h, m, r, t, w)",
            self.tag
        )
    }
}

impl std::error::Error for ModuleSelectorError {}

/// Immutable set of selected modules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleSelector {
    modules: BTreeSet<Module>,
}

impl ModuleSelector {
    pub fn new(modules: impl IntoIterator<Item = Module>) -> Self {
        Self {
            modules: modules.into_iter().collect(),
        }
    }

    /// Selector with every module enabled (the `cghmrtw` default).
    pub fn all() -> Self {
        Self::new(Module::ALL)
    }

    pub fn contains(&self, module: Module) -> bool {
        self.modules.contains(&module)
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Module> + '_ {
        self.modules.iter().copied()
    }
}

impl FromStr for ModuleSelector {
    type Err = ModuleSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut modules = BTreeSet::new();
        for tag in s.chars().filter(|c| !c.is_whitespace() && *c != ',') {
            let module = Module::from_tag(tag).ok_or(ModuleSelectorError { tag })?;
            modules.insert(module);
        }
        Ok(Self { modules })
    }
}

impl fmt::Display for ModuleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for module in &self.modules {
            write!(f, "{}", module.tag())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_selector() {
        let selector: ModuleSelector = "cghmrtw".parse().unwrap();
        assert_eq!(selector, ModuleSelector::all());
        assert_eq!(selector.to_string(), "cghmrtw");
    }

    #[test]
    fn test_parse_subset() {
        let selector: ModuleSelector = "rw".parse().unwrap();
        assert!(selector.contains(Module::Renter));
        assert!(selector.contains(Module::Wallet));
        assert!(!selector.contains(Module::Consensus));
        assert!(!selector.contains(Module::Host));
    }

    #[test]
    fn test_parse_ignores_separators_and_duplicates() {
        let selector: ModuleSelector = "c, g, c".parse().unwrap();
        assert_eq!(
            selector.iter().collect::<Vec<_>>(),
            vec![Module::Consensus, Module::Gateway]
        );
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let err = "CGW".parse::<ModuleSelector>().unwrap_err();
        assert_eq!(err, ModuleSelectorError { tag: 'C' });
        assert!("cGw".parse::<ModuleSelector>().is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_tag() {
        let err = "cgx".parse::<ModuleSelector>().unwrap_err();
        assert_eq!(err.tag, 'x');
        // A word that merely contains valid tags is not a selector.
        assert!("hostdb".parse::<ModuleSelector>().is_err());
    }

    #[test]
    fn test_empty_selector() {
        let selector: ModuleSelector = "".parse().unwrap();
        assert!(selector.is_empty());
    }

    #[test]
    fn test_tag_roundtrip() {
        for module in Module::ALL {
            assert_eq!(Module::from_tag(module.tag()), Some(module));
        }
    }
}
