use std::env;
use std::str::FromStr;
use tracing::warn;

const DEFAULT_API_HOST: &str = "0.0.0.0";
const DEFAULT_API_PORT: u16 = 3000;
const DEFAULT_MAX_SLOT_SEARCH_DAYS: i64 = 31;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Widest inclusive date range accepted when listing open slots.
    pub max_slot_search_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_host: DEFAULT_API_HOST.to_string(),
            api_port: DEFAULT_API_PORT,
            max_slot_search_days: DEFAULT_MAX_SLOT_SEARCH_DAYS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            api_host: env::var("API_HOST")
                .unwrap_or_else(|_| {
                    warn!("API_HOST not set, using default");
                    DEFAULT_API_HOST.to_string()
                }),
            api_port: parse_var("API_PORT", DEFAULT_API_PORT),
            max_slot_search_days: parse_var("MAX_SLOT_SEARCH_DAYS", DEFAULT_MAX_SLOT_SEARCH_DAYS),
        };

        if !config.is_valid() {
            warn!("MAX_SLOT_SEARCH_DAYS must be positive, using default");
            return Self {
                max_slot_search_days: DEFAULT_MAX_SLOT_SEARCH_DAYS,
                ..config
            };
        }

        config
    }

    pub fn is_valid(&self) -> bool {
        self.max_slot_search_days > 0
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

fn parse_var<T: FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has an invalid value '{}', using default", name, raw);
            default
        }),
        Err(_) => {
            warn!("{} not set, using default", name);
            default
        }
    }
}
