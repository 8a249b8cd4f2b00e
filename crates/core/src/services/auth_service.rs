use crate::app_state::AppState;
use crate::repositories::company_repository::CompanyRepository;
use crate::repositories::invitation_repository::InvitationRepository;
use crate::repositories::user_repository::UserRepository;
use crate::security::SecurityConfig;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::{Argon2, Params};
use chrono::Utc;
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::auth_dto::{RegisterManagerRequest, RegisterManagerResponse};
use chronos_primitives::models::dtos::invitation_dto::{
    RegisterEmployeeRequest, RegisterEmployeeResponse,
};
use chronos_primitives::models::dtos::user_dto::UserChanges;
use chronos_primitives::models::entities::company::NewCompany;
use chronos_primitives::models::entities::enum_types::UserRole;
use chronos_primitives::models::entities::user::NewUser;
use diesel::prelude::*;
use secrecy::{ExposeSecret, SecretString};
use tracing::{error, info, warn};

pub struct AuthService;

impl AuthService {
    /// Creates a company and its first manager in one transaction.
    pub async fn register_manager(
        state: &AppState,
        req: RegisterManagerRequest,
    ) -> Result<RegisterManagerResponse, ApiError> {
        let password = SecretString::new(req.password.clone().into());
        let password_hash = Self::hash_password(&password)?;

        let mut conn = state.db.get().map_err(|_| {
            error!("manager.register: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let (company, user) = conn.transaction::<_, ApiError, _>(|conn| {
            if UserRepository::email_exists(conn, &req.email)? {
                warn!("manager.register: duplicate email");
                return Err(ApiError::BadRequest("Email already in use".into()));
            }
            if CompanyRepository::cnpj_exists(conn, &req.company.cnpj)? {
                warn!("manager.register: duplicate cnpj");
                return Err(ApiError::BadRequest("CNPJ already in use".into()));
            }

            let company = CompanyRepository::create(
                conn,
                NewCompany {
                    name: req.company.name.trim(),
                    cnpj: &req.company.cnpj,
                    corporate_name: req.company.corporate_name.as_deref(),
                    email: req.company.email.as_deref(),
                    phone: req.company.phone.as_deref(),
                },
            )?;

            let user = UserRepository::create(
                conn,
                NewUser {
                    company_id: Some(company.id),
                    name: &req.name,
                    email: &req.email,
                    password_hash: &password_hash,
                    role: UserRole::Manager,
                    is_active: true,
                    is_approved: true,
                },
            )?;

            Ok((company, user))
        })?;

        let token = SecurityConfig::create_token(state, &user)?;

        info!(
            user_id = %user.id,
            company_id = %company.id,
            "manager.register: company and manager created"
        );

        Ok(RegisterManagerResponse {
            token,
            token_type: "Bearer",
            expires_in: state.config.jwt_details.jwt_expiration_hours * 3600,
            user,
            company,
        })
    }

    /// Redeems an invitation code. The new employee starts active but
    /// unapproved, inheriting company, position and department from the
    /// invitation.
    pub async fn register_employee(
        state: &AppState,
        req: RegisterEmployeeRequest,
    ) -> Result<RegisterEmployeeResponse, ApiError> {
        let password = SecretString::new(req.password.clone().into());
        let password_hash = Self::hash_password(&password)?;

        let mut conn = state.db.get().map_err(|_| {
            error!("employee.register: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let user = conn.transaction::<_, ApiError, _>(|conn| {
            let invitation = InvitationRepository::find_by_code_for_update(conn, &req.invitation_code)?
                .ok_or_else(|| {
                    warn!("employee.register: unknown invitation code");
                    ApiError::BadRequest("Invalid invitation code".into())
                })?;

            invitation.check_redeemable(&req.email, Utc::now())?;

            if UserRepository::email_exists(conn, &req.email)? {
                warn!("employee.register: duplicate email");
                return Err(ApiError::BadRequest("Email already in use".into()));
            }

            let user = UserRepository::create(
                conn,
                NewUser {
                    company_id: Some(invitation.company_id),
                    name: &req.name,
                    email: &req.email,
                    password_hash: &password_hash,
                    role: UserRole::Employee,
                    is_active: true,
                    is_approved: false,
                },
            )?;

            let profile = UserChanges {
                position: invitation.position.clone(),
                department: invitation.department.clone(),
                cpf: req.cpf.clone(),
                birth_date: req.birth_date,
                phone: req.phone.clone(),
                mobile_phone: req.mobile_phone.clone(),
                ..Default::default()
            };
            let user = UserRepository::apply_changes(conn, user.id, &profile)?;

            InvitationRepository::mark_used(conn, invitation.id, user.id)?;
            Ok(user)
        })?;

        let token = SecurityConfig::create_token(state, &user)?;

        info!(
            user_id = %user.id,
            company_id = ?user.company_id,
            "employee.register: employee registered from invitation"
        );

        Ok(RegisterEmployeeResponse {
            token,
            token_type: "Bearer",
            expires_in: state.config.jwt_details.jwt_expiration_hours * 3600,
            user,
        })
    }

    pub fn hash_password(password: &SecretString) -> Result<String, ApiError> {
        let argon2 = Self::create_argon2()?;
        let salt = SaltString::generate(&mut OsRng);

        argon2
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|_| {
                error!("manager.register: password hashing failed");
                ApiError::Internal("Credential processing failed".into())
            })
    }

    fn create_argon2() -> Result<Argon2<'static>, ApiError> {
        let params = Params::new(
            19 * 1024, // KiB
            2,
            1,
            None,
        )
        .map_err(|e| {
            error!("Argon2 params error: {}", e);
            ApiError::Internal("Encryption configuration error".to_string())
        })?;
        Ok(Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            params,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    #[test]
    fn hashes_are_argon2id_and_verify() {
        let password = SecretString::new("Segura123".to_string().into());
        let hash = AuthService::hash_password(&password).unwrap();
        assert!(hash.starts_with("$argon2id$"));

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(Argon2::default()
            .verify_password(b"Segura123", &parsed)
            .is_ok());
        assert!(Argon2::default()
            .verify_password(b"Errada123", &parsed)
            .is_err());
    }
}
