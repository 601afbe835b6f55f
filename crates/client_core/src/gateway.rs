use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{NcoId, NcoUser},
    protocol::{AuthOutcome, SessionProbe, SystemLoginRequest, UserLoginRequest},
};
use thiserror::Error;
use url::Url;

/// Wire-level failure talking to the auth backend. A rejection is the
/// backend saying no (non-2xx or `success:false`); everything else is
/// transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("authentication rejected")]
    Rejected { message: Option<String> },
    #[error("transport failure: {detail}")]
    Transport { detail: String },
}

impl GatewayError {
    fn transport(err: impl std::fmt::Display) -> Self {
        GatewayError::Transport {
            detail: err.to_string(),
        }
    }
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn check_session(&self) -> Result<SessionProbe, GatewayError>;
    async fn system_login(&self, password: &str) -> Result<(), GatewayError>;
    async fn fetch_roster(&self) -> Result<Vec<NcoUser>, GatewayError>;
    async fn user_login(&self, user_id: NcoId, pin: &str) -> Result<(), GatewayError>;
    async fn logout(&self) -> Result<(), GatewayError>;
}

/// Auth API client. The cookie store carries the backend's session cookie
/// across calls, so the system login and everything after it share one
/// session, like a browser tab would.
pub struct HttpAuthGateway {
    http: Client,
    base_url: String,
}

impl HttpAuthGateway {
    pub fn new(base_url: &str) -> Result<Self> {
        Url::parse(base_url).with_context(|| format!("invalid server URL: {base_url}"))?;
        let http = Client::builder()
            .cookie_store(true)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn check_session(&self) -> Result<SessionProbe, GatewayError> {
        let response = self
            .http
            .get(format!("{}/api/signouts/auth/check", self.base_url))
            .send()
            .await
            .map_err(GatewayError::transport)?;
        if !response.status().is_success() {
            return Err(GatewayError::Transport {
                detail: format!("session check returned {}", response.status()),
            });
        }
        response
            .json::<SessionProbe>()
            .await
            .map_err(GatewayError::transport)
    }

    async fn system_login(&self, password: &str) -> Result<(), GatewayError> {
        let response = self
            .http
            .post(format!("{}/api/signouts/auth/system", self.base_url))
            .json(&SystemLoginRequest {
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(GatewayError::transport)?;
        read_outcome(response).await
    }

    async fn fetch_roster(&self) -> Result<Vec<NcoUser>, GatewayError> {
        let response = self
            .http
            .get(format!("{}/api/signouts/auth/users", self.base_url))
            .send()
            .await
            .map_err(GatewayError::transport)?;
        if !response.status().is_success() {
            return Err(GatewayError::Transport {
                detail: format!("user list returned {}", response.status()),
            });
        }
        response
            .json::<Vec<NcoUser>>()
            .await
            .map_err(GatewayError::transport)
    }

    async fn user_login(&self, user_id: NcoId, pin: &str) -> Result<(), GatewayError> {
        let response = self
            .http
            .post(format!("{}/api/signouts/auth/user", self.base_url))
            .json(&UserLoginRequest {
                user_id,
                pin: pin.to_string(),
            })
            .send()
            .await
            .map_err(GatewayError::transport)?;
        read_outcome(response).await
    }

    // Fire and forget as far as the flow is concerned; the status and body
    // are not inspected.
    async fn logout(&self) -> Result<(), GatewayError> {
        self.http
            .post(format!("{}/api/signouts/auth/logout", self.base_url))
            .send()
            .await
            .map_err(GatewayError::transport)?;
        Ok(())
    }
}

/// Shared decode for the two login endpoints. A non-2xx status is a
/// rejection, with the message salvaged from the body when it parses.
async fn read_outcome(response: Response) -> Result<(), GatewayError> {
    if !response.status().is_success() {
        let message = response
            .json::<AuthOutcome>()
            .await
            .ok()
            .and_then(|outcome| outcome.error);
        return Err(GatewayError::Rejected { message });
    }
    let outcome = response
        .json::<AuthOutcome>()
        .await
        .map_err(GatewayError::transport)?;
    if outcome.success {
        Ok(())
    } else {
        Err(GatewayError::Rejected {
            message: outcome.error,
        })
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
