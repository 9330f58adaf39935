//! Environment-based configuration.

use std::time::Duration;

use oplps_client::ApiClient;
use oplps_core::{Role, Session, UserId};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_USER: &str = "storekeeper1";
const DEFAULT_POLL_SECS: u64 = 30;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub api_token: Option<String>,
    pub poll_interval: Duration,
    pub user: UserId,
    pub display_name: String,
    pub role: Role,
}

impl Config {
    /// Read configuration from `OPLPS_*` environment variables, logging a
    /// warning for each defaulted value.
    pub fn from_env() -> Self {
        let api_url = std::env::var("OPLPS_API_URL").unwrap_or_else(|_| {
            tracing::warn!("OPLPS_API_URL not set; using dev default {DEFAULT_API_URL}");
            DEFAULT_API_URL.to_string()
        });

        let api_token = std::env::var("OPLPS_API_TOKEN").ok();

        let poll_interval = parse_poll_secs(std::env::var("OPLPS_POLL_SECS").ok().as_deref());

        let user = std::env::var("OPLPS_USER")
            .ok()
            .and_then(|raw| match UserId::new(raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    tracing::warn!(%err, "OPLPS_USER is invalid; using dev default");
                    None
                }
            })
            .unwrap_or_else(|| UserId::new(DEFAULT_USER).expect("default user id is non-blank"));

        let display_name =
            std::env::var("OPLPS_DISPLAY_NAME").unwrap_or_else(|_| user.to_string());

        let role = std::env::var("OPLPS_ROLE")
            .ok()
            .and_then(|raw| match raw.parse::<Role>() {
                Ok(role) => Some(role),
                Err(err) => {
                    tracing::warn!(%err, "OPLPS_ROLE is invalid; defaulting to storekeeper");
                    None
                }
            })
            .unwrap_or(Role::Storekeeper);

        Self {
            api_url,
            api_token,
            poll_interval,
            user,
            display_name,
            role,
        }
    }

    pub fn session(&self) -> Session {
        Session::new(self.user.clone(), self.display_name.clone(), self.role)
    }

    pub fn client(&self) -> ApiClient {
        match &self.api_token {
            Some(token) => ApiClient::with_token(self.api_url.clone(), token.clone()),
            None => ApiClient::new(self.api_url.clone()),
        }
    }
}

/// Parse the poll interval, clamping to at least one second.
fn parse_poll_secs(raw: Option<&str>) -> Duration {
    let secs = raw
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_POLL_SECS);
    Duration::from_secs(secs.max(1))
}
