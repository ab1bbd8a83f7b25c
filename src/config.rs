use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// PostgreSQL database connection URL. Without it the seeded in-memory catalog is served.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Redis connection URL. Without it generative results are not cached.
    #[serde(default)]
    pub redis_url: Option<String>,

    /// OpenAI API key. Without it every pairing comes from the fallback engine.
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// OpenAI-compatible API base URL
    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,

    /// Chat model used for generative pairings
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Upper bound on a single generative call, in seconds
    #[serde(default = "default_generative_timeout_secs")]
    pub generative_timeout_secs: u64,

    /// How long a generative pairing stays cached, in seconds
    #[serde(default = "default_pairing_cache_ttl_secs")]
    pub pairing_cache_ttl_secs: u64,

    /// Fixed seed for the fallback jitter; unset means fresh entropy per request
    #[serde(default)]
    pub jitter_seed: Option<u64>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_openai_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_generative_timeout_secs() -> u64 {
    20
}

fn default_pairing_cache_ttl_secs() -> u64 {
    86400
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_environment() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();

        assert_eq!(config.database_url, None);
        assert_eq!(config.openai_api_key, None);
        assert_eq!(config.openai_api_url, "https://api.openai.com/v1");
        assert_eq!(config.generative_timeout_secs, 20);
        assert_eq!(config.jitter_seed, None);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_overrides_from_environment() {
        let vars = vec![
            ("PORT".to_string(), "8080".to_string()),
            ("OPENAI_API_KEY".to_string(), "sk-test".to_string()),
            ("JITTER_SEED".to_string(), "42".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.jitter_seed, Some(42));
    }
}
