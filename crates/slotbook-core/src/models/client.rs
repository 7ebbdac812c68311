//! Client model

use serde::{Deserialize, Serialize};

use super::new_id;

/// Client entity
///
/// `contact_info` is unique across all clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Contact details, trimmed
    pub contact_info: String,
}

impl Client {
    pub fn new(name: String, contact_info: String) -> Self {
        Self {
            id: new_id(),
            name,
            contact_info,
        }
    }
}
