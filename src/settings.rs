use crate::error::{AppError, AppResult};

const KEY_LOG_LEVEL: &str = "BILLED_LOG_LEVEL";
const KEY_MODAL_WIDTH: &str = "BILLED_MODAL_WIDTH";
const KEY_DEFAULT_PCT: &str = "BILLED_DEFAULT_PCT";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_level: String,
    /// Width of the receipt modal in pixels. The image is shown at half of it.
    pub modal_width: u32,
    pub default_pct: u32,
    pub allowed_extensions: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            log_level: "info".to_string(),
            modal_width: 1000,
            default_pct: 20,
            allowed_extensions: vec!["png".into(), "jpg".into(), "jpeg".into()],
        }
    }
}

impl Settings {
    pub fn load() -> AppResult<Self> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let defaults = Settings::default();
        let log_level = lookup(KEY_LOG_LEVEL)
            .map(|v| v.trim().to_lowercase())
            .unwrap_or(defaults.log_level);
        let modal_width = parse_or(lookup(KEY_MODAL_WIDTH), KEY_MODAL_WIDTH, defaults.modal_width)?;
        let default_pct = parse_or(lookup(KEY_DEFAULT_PCT), KEY_DEFAULT_PCT, defaults.default_pct)?;
        Ok(Settings {
            log_level,
            modal_width,
            default_pct,
            allowed_extensions: defaults.allowed_extensions,
        })
    }

    pub fn receipt_image_width(&self) -> u32 {
        self.modal_width / 2
    }

    pub fn tracing_level(&self) -> tracing::Level {
        match self.log_level.as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        }
    }
}

fn parse_or(value: Option<String>, key: &str, default: u32) -> AppResult<u32> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Settings(format!("{}={:?}: {}", key, raw, e))),
    }
}
