use serde::Deserialize;

/// Base URL of the Copper developer API.
pub const DEFAULT_COPPER_BASE_URL: &str = "https://api.copper.com/developer_api/v1";

#[derive(Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub copper_api_key: String,
    pub copper_user_email: String,
    pub copper_base_url: String,
    pub copper_timeout_secs: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("copper_api_key", &"[REDACTED]")
            .field("copper_user_email", &self.copper_user_email)
            .field("copper_base_url", &self.copper_base_url)
            .field("copper_timeout_secs", &self.copper_timeout_secs)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            copper_api_key: std::env::var("COPPER_API_KEY")
                .map_err(|_| anyhow::anyhow!("COPPER_API_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("COPPER_API_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
            copper_user_email: std::env::var("COPPER_USER_EMAIL")
                .map_err(|_| anyhow::anyhow!("COPPER_USER_EMAIL environment variable required"))
                .and_then(|email| {
                    if email.trim().is_empty() {
                        anyhow::bail!("COPPER_USER_EMAIL cannot be empty");
                    }
                    if !email.contains('@') {
                        anyhow::bail!("COPPER_USER_EMAIL must be an email address");
                    }
                    Ok(email)
                })?,
            copper_base_url: std::env::var("COPPER_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("COPPER_BASE_URL must start with http:// or https://");
                    }
                    Ok(url.trim_end_matches('/').to_string())
                })
                .transpose()?
                .unwrap_or_else(|| DEFAULT_COPPER_BASE_URL.to_string()),
            copper_timeout_secs: std::env::var("COPPER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .ok()
                .filter(|secs: &u64| *secs > 0)
                .ok_or_else(|| anyhow::anyhow!("COPPER_TIMEOUT_SECS must be a positive integer"))?,
        };

        // Never log the API key
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Copper Base URL: {}", config.copper_base_url);
        tracing::debug!("Copper timeout: {}s", config.copper_timeout_secs);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}
