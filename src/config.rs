use serde::Deserialize;

/// Server configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// SQLite database connection URL
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Secret used to sign and verify bearer tokens
    pub jwt_secret: String,

    /// Token lifetime in days
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Client-side configuration: catalog API access, server location and the
/// offline cache database
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL of the reelbox server used for rating sync
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Local cache database URL
    #[serde(default = "default_local_database_url")]
    pub local_database_url: String,
}

fn default_database_url() -> String {
    "sqlite://reelbox.db".to_string()
}

fn default_token_ttl_days() -> i64 {
    30
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_local_database_url() -> String {
    "sqlite://local.db".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ClientConfig {
    /// Load client configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<ClientConfig>()
            .map_err(|e| anyhow::anyhow!("Failed to load client config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let vars = vec![("JWT_SECRET".to_string(), "s3cret".to_string())];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.token_ttl_days, 30);
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_url, "sqlite://reelbox.db");
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_config_requires_secret() {
        let vars: Vec<(String, String)> = vec![("PORT".to_string(), "8080".to_string())];
        assert!(envy::from_iter::<_, Config>(vars).is_err());
    }

    #[test]
    fn test_client_config_defaults() {
        let vars = vec![("TMDB_API_KEY".to_string(), "key".to_string())];
        let config: ClientConfig = envy::from_iter(vars).unwrap();
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.api_base_url, "http://localhost:3000");
    }
}
