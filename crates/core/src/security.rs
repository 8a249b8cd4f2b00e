use crate::app_state::AppState;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::{Duration, Utc};
use chronos_primitives::error::{ApiError, AuthError};
use chronos_primitives::models::entities::enum_types::UserRole;
use chronos_primitives::models::entities::user::User;
use http::HeaderMap;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub role: UserRole,
    pub company_id: Option<Uuid>,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
    pub jti: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, ApiError> {
        Uuid::parse_str(&self.sub).map_err(|e| {
            error!("Invalid user ID in claims: {}", e);
            ApiError::Auth(AuthError::InvalidToken("Invalid user ID".to_string()))
        })
    }

    pub fn company_id(&self) -> Result<Uuid, ApiError> {
        self.company_id
            .ok_or_else(|| ApiError::Forbidden("User is not linked to a company".into()))
    }

    pub fn require_role(&self, allowed: &[UserRole]) -> Result<(), ApiError> {
        if self.role.is_one_of(allowed) {
            return Ok(());
        }
        warn!(sub = %self.sub, role = %self.role, "access denied by role gate");
        Err(ApiError::Forbidden("Insufficient permissions".into()))
    }
}

pub struct SecurityConfig;

impl SecurityConfig {
    pub fn create_token(state: &AppState, user: &User) -> Result<String, ApiError> {
        let jwt = &state.config.jwt_details;
        let now = Utc::now();

        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role,
            company_id: user.company_id,
            iat: now.timestamp(),
            exp: (now + Duration::hours(jwt.jwt_expiration_hours)).timestamp(),
            iss: jwt.jwt_issuer.clone(),
            aud: jwt.jwt_audience.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());

        encode(
            &header,
            &claims,
            &EncodingKey::from_secret(jwt.jwt_secret.expose_secret().as_bytes()),
        )
        .map_err(|e| {
            error!("JWT encoding error: {}", e);
            ApiError::Token("Token creation failed".into())
        })
    }

    fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
        let auth_header = headers
            .get(http::header::AUTHORIZATION)
            .ok_or(AuthError::MissingHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidFormat)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidFormat)?
            .trim();

        if token.is_empty() {
            return Err(AuthError::InvalidFormat);
        }

        Ok(token)
    }

    pub fn verify_token(state: &AppState, token: &str) -> Result<Claims, AuthError> {
        let jwt = &state.config.jwt_details;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[jwt.jwt_issuer.as_str()]);
        validation.set_audience(&[jwt.jwt_audience.as_str()]);
        validation.validate_exp = true;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(jwt.jwt_secret.expose_secret().as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidToken("Invalid or expired token".into()))
    }

    pub async fn auth_middleware(
        State(state): State<Arc<AppState>>,
        mut req: Request,
        next: Next,
    ) -> Result<Response, Response> {
        let token = Self::extract_bearer_token(req.headers())
            .map_err(|e| ApiError::from(e).into_response())?;

        let claims =
            Self::verify_token(&state, token).map_err(|e| ApiError::from(e).into_response())?;

        req.extensions_mut().insert(claims);
        Ok(next.run(req).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: UserRole, company_id: Option<Uuid>) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            role,
            company_id,
            exp: 0,
            iat: 0,
            iss: "chronos".into(),
            aud: "chronos_api".into(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    #[test]
    fn role_gate_rejects_employees() {
        let c = claims(UserRole::Employee, None);
        assert!(matches!(
            c.require_role(UserRole::AUDIT_VIEWERS),
            Err(ApiError::Forbidden(_))
        ));
        assert!(claims(UserRole::Hr, None)
            .require_role(UserRole::AUDIT_VIEWERS)
            .is_ok());
    }

    #[test]
    fn missing_company_is_forbidden() {
        let c = claims(UserRole::Manager, None);
        assert!(matches!(c.company_id(), Err(ApiError::Forbidden(_))));
    }

    #[test]
    fn bearer_prefix_is_required() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            SecurityConfig::extract_bearer_token(&headers),
            Err(AuthError::MissingHeader)
        ));

        headers.insert(http::header::AUTHORIZATION, "Token abc".parse().unwrap());
        assert!(matches!(
            SecurityConfig::extract_bearer_token(&headers),
            Err(AuthError::InvalidFormat)
        ));

        headers.insert(http::header::AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(SecurityConfig::extract_bearer_token(&headers).unwrap(), "abc");
    }
}
