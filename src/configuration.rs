use serde::Deserialize;

use crate::error::ConfigError;

/// Signing secret used when neither the configuration file nor the
/// environment provides one. Development only.
pub const DEFAULT_TOKEN_SECRET: &str = "shh";

/// Tokens expire one day after issuance.
pub const DEFAULT_TOKEN_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub database: Option<DatabaseSettings>,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Deserialize, Clone)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub port: u16,
    pub host: String,
    pub database_name: String,
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name
        )
    }
}

/// bcrypt work factor. The hash performs 2^cost rounds, so the ceiling of 8
/// caps every hash at 2^8 iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u32")]
pub struct HashCost(u32);

impl HashCost {
    pub const MIN: u32 = 4;
    pub const MAX: u32 = 8;

    pub fn new(cost: u32) -> Result<Self, ConfigError> {
        if (Self::MIN..=Self::MAX).contains(&cost) {
            Ok(Self(cost))
        } else {
            Err(ConfigError::InvalidValue(format!(
                "hash cost must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                cost
            )))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for HashCost {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl TryFrom<u32> for HashCost {
    type Error = ConfigError;

    fn try_from(cost: u32) -> Result<Self, Self::Error> {
        Self::new(cost)
    }
}

/// Token signing and password hashing settings
#[derive(Deserialize, Clone)]
pub struct AuthSettings {
    pub secret: String,
    pub token_expiry_seconds: i64, // 86400 for one day
    #[serde(default)]
    pub hash_cost: HashCost,
}

impl AuthSettings {
    pub fn new(secret: impl Into<String>, hash_cost: HashCost) -> Self {
        Self {
            secret: secret.into(),
            token_expiry_seconds: DEFAULT_TOKEN_EXPIRY_SECONDS,
            hash_cost,
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_TOKEN_SECRET
    }
}

/// Load settings from defaults, an optional `configuration` file and the
/// environment. `APP__AUTH__SECRET` style variables override nested keys and
/// `JWT_SECRET` overrides the signing secret.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .set_default("application.host", "127.0.0.1")?
        .set_default("application.port", 5000_i64)?
        .set_default("auth.secret", DEFAULT_TOKEN_SECRET)?
        .set_default("auth.token_expiry_seconds", DEFAULT_TOKEN_EXPIRY_SECONDS)?
        .set_default("auth.hash_cost", i64::from(HashCost::MAX))?
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__"),
        )
        .set_override_option("auth.secret", std::env::var("JWT_SECRET").ok())?
        .build()?;

    settings
        .try_deserialize::<Settings>()
        .map_err(ConfigError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_cost_bounds() {
        assert!(HashCost::new(3).is_err());
        assert!(HashCost::new(4).is_ok());
        assert!(HashCost::new(8).is_ok());
        assert!(HashCost::new(9).is_err());
        assert!(HashCost::new(12).is_err());
    }

    #[test]
    fn test_hash_cost_default_is_ceiling() {
        assert_eq!(HashCost::default().get(), 8);
    }

    #[test]
    fn test_hash_cost_rejected_during_deserialization() {
        let result: Result<AuthSettings, _> = serde_json::from_value(serde_json::json!({
            "secret": "s",
            "token_expiry_seconds": 60,
            "hash_cost": 10
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_auth_settings_defaults() {
        let settings = AuthSettings::new(DEFAULT_TOKEN_SECRET, HashCost::default());
        assert_eq!(settings.token_expiry_seconds, 86_400);
        assert!(settings.uses_default_secret());
    }

    // Environment is process-wide, so every variant runs inside one test.
    #[test]
    fn test_get_configuration_from_environment() {
        for (key, _) in std::env::vars().filter(|(key, _)| key.starts_with("APP__")) {
            std::env::remove_var(key);
        }
        std::env::remove_var("JWT_SECRET");

        let settings = get_configuration().expect("Failed to load default configuration");
        assert_eq!(settings.auth.secret, "shh");
        assert!(settings.auth.uses_default_secret());
        assert_eq!(settings.auth.token_expiry_seconds, 86_400);
        assert_eq!(settings.auth.hash_cost, HashCost::default());
        assert!(settings.database.is_none());

        std::env::set_var("JWT_SECRET", "from-environment");
        let settings = get_configuration().expect("Failed to load configuration");
        assert_eq!(settings.auth.secret, "from-environment");
        assert!(!settings.auth.uses_default_secret());
        std::env::remove_var("JWT_SECRET");

        std::env::set_var("APP__AUTH__HASH_COST", "5");
        let settings = get_configuration().expect("Failed to load configuration");
        assert_eq!(settings.auth.hash_cost.get(), 5);

        std::env::set_var("APP__AUTH__HASH_COST", "9");
        let result = get_configuration();
        std::env::remove_var("APP__AUTH__HASH_COST");
        assert!(result.is_err(), "hash cost above 8 must be rejected");
    }

    #[test]
    fn test_address() {
        let app = ApplicationSettings {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(app.address(), "0.0.0.0:8080");
    }
}
