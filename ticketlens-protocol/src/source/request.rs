use serde::{Deserialize, Serialize};

/// Static body posted to the ticket endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct FetchRequest {
    pub input_mode: String,
    pub application: String,
    pub device: String,
    pub version_no: String,
    pub location_id: String,
    pub system_id: String,
    pub org_id: String,
    pub signin_type: String,
    pub token: String,
    pub app_domain: String,
}
