use std::env;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
const BASE_URL_VAR: &str = "TRAINER_URL";
const CHECK_WIDTH_VAR: &str = "TRAINER_CHECK_WIDTH";

/// Where the training service lives and how strictly requests are checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// The service's root, without the `/train` or `/predict` suffix.
    pub base_url: String,
    /// Reject prediction vectors whose width differs from the training rows'.
    pub check_prediction_width: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            check_prediction_width: false,
        }
    }
}

impl ClientConfig {
    /// Reads the configuration from `TRAINER_URL` and `TRAINER_CHECK_WIDTH`,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var(BASE_URL_VAR).ok().as_deref(),
            env::var(CHECK_WIDTH_VAR).ok().as_deref(),
        )
    }

    fn from_vars(base_url: Option<&str>, check_width: Option<&str>) -> Self {
        let base_url = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string();

        let check_prediction_width = check_width
            .map(|flag| matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false);

        Self {
            base_url,
            check_prediction_width,
        }
    }
}
