//! Naming conventions used to discover entities at load time

use serde::{Deserialize, Serialize};

/// Rule deciding which scene nodes become interactive entities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamingConvention {
    /// Any node whose name contains a CJK unified ideograph (U+4E00..=U+9FA5)
    #[default]
    CjkIdeographs,
    /// Any node whose name starts with the given prefix
    Prefix(String),
}

impl NamingConvention {
    /// Check whether `name` follows this convention
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::CjkIdeographs => name.chars().any(|c| ('\u{4e00}'..='\u{9fa5}').contains(&c)),
            Self::Prefix(prefix) => name.starts_with(prefix.as_str()),
        }
    }
}
