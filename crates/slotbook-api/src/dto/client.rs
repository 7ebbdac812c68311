//! Client DTOs

use serde::{Deserialize, Serialize};
use slotbook_core::models::Client;
use validator::Validate;

/// Client creation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClientCreateRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Contact info is required"))]
    pub contact_info: String,
}

/// Client response
#[derive(Debug, Clone, Serialize)]
pub struct ClientResponse {
    pub id: String,
    pub name: String,
    pub contact_info: String,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            name: client.name,
            contact_info: client.contact_info,
        }
    }
}
