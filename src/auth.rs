use crate::config::Config;

/// Value sent in `X-PW-Application` on every Copper request.
pub const COPPER_APPLICATION: &str = "developer_api";

/// Credentials for the Copper developer API.
///
/// Copper authenticates with a static API key bound to the email of the user
/// that generated it. Both values travel as headers on every request.
#[derive(Clone)]
pub struct CopperAuth {
    pub api_key: String,
    pub user_email: String,
}

impl CopperAuth {
    pub fn new(api_key: impl Into<String>, user_email: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            user_email: user_email.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.copper_api_key.clone(),
            config.copper_user_email.clone(),
        )
    }

    /// Header set attached to every Copper request, in send order.
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("X-PW-AccessToken".to_string(), self.api_key.clone()),
            ("X-PW-Application".to_string(), COPPER_APPLICATION.to_string()),
            ("X-PW-UserEmail".to_string(), self.user_email.clone()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ]
    }
}

impl std::fmt::Debug for CopperAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopperAuth")
            .field("api_key", &"[REDACTED]")
            .field("user_email", &self.user_email)
            .finish()
    }
}
