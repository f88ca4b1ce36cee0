//! Cart request payloads

use serde::{Deserialize, Serialize};

use super::tab::TabTarget;

/// Compose a product with options into one cart line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCartItem {
    pub product_id: String,
    /// Selected option ids, in selection order
    #[serde(default)]
    pub option_ids: Vec<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub note: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

/// Choose who the next order is for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetTarget {
    pub target: TabTarget,
}
