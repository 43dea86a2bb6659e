//! Validation of configuration values read from the environment

/// Configuration error types
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing { name: &'static str, hint: &'static str },
    InvalidId { name: &'static str, value: String },
    InvalidChance { value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing { name, hint } => {
                write!(f, "{} environment variable not set. Set it with: {}", name, hint)
            }
            ConfigError::InvalidId { name, value } => {
                write!(f, "{} must be a Discord snowflake id, got {:?}", name, value)
            }
            ConfigError::InvalidChance { value } => {
                write!(
                    f,
                    "VOICE_LOG_SCREAM_CHANCE must be a number between 0 and 1, got {:?}",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Require a variable to be present
pub fn require(
    name: &'static str,
    value: Option<String>,
    hint: &'static str,
) -> Result<String, ConfigError> {
    value.ok_or(ConfigError::Missing { name, hint })
}

/// Parse a non-zero snowflake id
pub fn parse_id(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(id) if id != 0 => Ok(id),
        _ => Err(ConfigError::InvalidId {
            name,
            value: value.to_string(),
        }),
    }
}

/// Parse a probability in `[0, 1]`
pub fn parse_chance(value: &str) -> Result<f64, ConfigError> {
    match value.trim().parse::<f64>() {
        Ok(chance) if (0.0..=1.0).contains(&chance) => Ok(chance),
        _ => Err(ConfigError::InvalidChance {
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert_eq!(require("X", Some("v".into()), "hint"), Ok("v".to_string()));
        let err = require("DISCORD_TOKEN", None, "export DISCORD_TOKEN=...").unwrap_err();
        assert!(err.to_string().contains("DISCORD_TOKEN"));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("ID", "123456789012345678"), Ok(123456789012345678));
        assert_eq!(parse_id("ID", " 42 "), Ok(42));
        assert!(parse_id("ID", "0").is_err());
        assert!(parse_id("ID", "-5").is_err());
        assert!(parse_id("ID", "general").is_err());
    }

    #[test]
    fn test_parse_chance() {
        assert_eq!(parse_chance("0.01"), Ok(0.01));
        assert_eq!(parse_chance("0"), Ok(0.0));
        assert_eq!(parse_chance("1"), Ok(1.0));
        assert!(parse_chance("1.5").is_err());
        assert!(parse_chance("-0.1").is_err());
        assert!(parse_chance("NaN").is_err());
        assert!(parse_chance("often").is_err());
    }
}
