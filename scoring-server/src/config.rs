//! Configuration module

use std::env;

use fire_risk_core::constants::DEFAULT_MODEL_PATH;
use fire_risk_core::logic::scoring::InputPolicy;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Model artifact path (`.json` forest, or `.onnx` with the `onnx` feature)
    pub model_path: String,

    /// Server port
    pub port: u16,

    /// Reject inputs outside the control domains
    pub strict_input: bool,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            strict_input: env::var("STRICT_INPUT")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(false),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn input_policy(&self) -> InputPolicy {
        if self.strict_input {
            InputPolicy::Strict
        } else {
            InputPolicy::PassThrough
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" ON "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_input_policy() {
        let mut config = Config {
            model_path: DEFAULT_MODEL_PATH.to_string(),
            port: 8080,
            strict_input: false,
            environment: "development".to_string(),
        };
        assert_eq!(config.input_policy(), InputPolicy::PassThrough);
        assert!(!config.is_production());

        config.strict_input = true;
        assert_eq!(config.input_policy(), InputPolicy::Strict);
    }
}
