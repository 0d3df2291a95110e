use std::{fmt, net::SocketAddr, str::FromStr, time::Duration};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub user_addr: SocketAddr,
    pub room_addr: SocketAddr,
    pub bcrypt_cost: u32,
    pub token_ttl: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"<redacted>")
            .field("user_addr", &self.user_addr)
            .field("room_addr", &self.room_addr)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| dotenv::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(Config {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            user_addr: parse_or(&lookup, "USER_ADDR", SocketAddr::from(([0, 0, 0, 0], 8081)))?,
            room_addr: parse_or(&lookup, "ROOM_ADDR", SocketAddr::from(([0, 0, 0, 0], 8082)))?,
            bcrypt_cost,
            token_ttl: Duration::from_secs(parse_or(&lookup, "TOKEN_TTL_SECS", 24 * 60 * 60)?),
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite://chat.db"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.user_addr.port(), 8081);
        assert_eq!(config.room_addr.port(), 8082);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.token_ttl, Duration::from_secs(86400));
        assert!(!format!("{config:?}").contains("s3cret"));
    }

    #[test]
    fn secret_is_required() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite://chat.db"),
            ("JWT_SECRET", ""),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn rejects_bad_values() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite://chat.db"),
            ("JWT_SECRET", "k"),
            ("BCRYPT_COST", "2"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "BCRYPT_COST", .. }));

        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite://chat.db"),
            ("JWT_SECRET", "k"),
            ("ROOM_ADDR", "not an addr"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "ROOM_ADDR", .. }));
    }
}
