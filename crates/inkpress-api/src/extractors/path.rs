//! The `?path=` query parameter naming a node of the namespace.

use serde::{Deserialize, Serialize};

/// `?path=/blog/rust`. Defaults to the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathQuery {
    #[serde(default = "root")]
    pub path: String,
}

fn root() -> String {
    inkpress_core::types::ROOT_PATH.to_string()
}
