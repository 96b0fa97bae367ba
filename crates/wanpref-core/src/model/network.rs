// ── Organization & network domain types ──

use serde::{Deserialize, Serialize};

/// Product type a network must carry to have uplink selection settings.
pub const APPLIANCE: &str = "appliance";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    pub name: String,
    /// Product families present in the network (`appliance`, `switch`, ...).
    pub product_types: Vec<String>,
}

impl Network {
    /// Whether this network contains a security appliance.
    pub fn is_appliance(&self) -> bool {
        self.product_types.iter().any(|p| p == APPLIANCE)
    }
}
