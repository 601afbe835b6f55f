use serde::{Deserialize, Serialize};

use crate::domain::NcoId;

/// Session facets reported by `GET /api/signouts/auth/check`. Missing keys
/// read as false. The server never reports `authenticated` without
/// `system_authenticated`, but nothing here enforces that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProbe {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default, rename = "systemAuthenticated")]
    pub system_authenticated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemLoginRequest {
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLoginRequest {
    #[serde(rename = "userId")]
    pub user_id: NcoId,
    pub pin: String,
}

/// Body shape shared by the system and user login endpoints. `error` is only
/// populated on rejection and may be absent entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
