use anyhow::{Context, Result};

use crate::diagnostics::models::ContactInfo;

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_BUSINESS_PHONE: &str = "0677627904";
const DEFAULT_BUSINESS_EMAIL: &str = "elsintdm@gmail.com";
const DEFAULT_MAX_MEDIA_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
///
/// Nothing is strictly required: a missing `GEMINI_API_KEY` still boots the
/// service, every analysis then degrades to the fallback answer.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub business_phone: String,
    pub business_email: String,
    pub max_media_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_base_url: env_or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            gemini_model: env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            business_phone: env_or("BUSINESS_PHONE", DEFAULT_BUSINESS_PHONE),
            business_email: env_or("BUSINESS_EMAIL", DEFAULT_BUSINESS_EMAIL),
            max_media_bytes: std::env::var("MAX_MEDIA_BYTES")
                .unwrap_or_else(|_| DEFAULT_MAX_MEDIA_BYTES.to_string())
                .parse::<usize>()
                .context("MAX_MEDIA_BYTES must be a byte count")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Business contact details quoted by the fallback answer and submissions.
    pub fn contact_info(&self) -> ContactInfo {
        ContactInfo {
            phone: self.business_phone.clone(),
            email: self.business_email.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gemini_api_key: String::new(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            business_phone: DEFAULT_BUSINESS_PHONE.to_string(),
            business_email: DEFAULT_BUSINESS_EMAIL.to_string(),
            max_media_bytes: DEFAULT_MAX_MEDIA_BYTES,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_contact_info_points_at_business() {
        let contact = Config::default().contact_info();
        assert_eq!(contact.phone, "0677627904");
        assert_eq!(contact.email, "elsintdm@gmail.com");
    }

    #[test]
    fn test_env_or_falls_back_on_missing_key() {
        assert_eq!(
            env_or("ELSINT_TEST_SURELY_UNSET_VARIABLE", "fallback"),
            "fallback"
        );
    }
}
