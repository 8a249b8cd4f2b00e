use crate::models::app_state::jwt_details::JWTInfo;
use eyre::Report;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_details: JWTInfo,

    pub app_url: String,

    pub app_env: String,

    /// Honour `X-Forwarded-For` only when running behind a known proxy.
    pub trust_proxy: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Report> {
        Ok(Self {
            jwt_details: JWTInfo::new()?,

            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:8080".into()),

            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),

            trust_proxy: env::var("TRUST_PROXY")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}
