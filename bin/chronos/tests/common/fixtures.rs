use chronos_core::repositories::company_repository::CompanyRepository;
use chronos_core::repositories::user_repository::UserRepository;
use chronos_core::{AppState, SecurityConfig};
use chronos_primitives::models::dtos::user_dto::UserChanges;
use chronos_primitives::models::entities::company::{Company, NewCompany};
use chronos_primitives::models::entities::enum_types::UserRole;
use chronos_primitives::models::entities::user::{NewUser, User};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use uuid::Uuid;

pub struct TestUser {
    pub user: User,
    pub token: String,
}

pub fn unique_cnpj() -> String {
    format!("{:014}", Uuid::new_v4().as_u128() % 100_000_000_000_000)
}

pub fn unique_email() -> String {
    let email: String = SafeEmail().fake();
    format!("{}.{}", Uuid::new_v4().simple(), email)
}

pub fn create_company(state: &AppState) -> Company {
    let mut conn = state.db.get().expect("db connection");
    let name: String = CompanyName().fake();
    let cnpj = unique_cnpj();
    CompanyRepository::create(
        &mut conn,
        NewCompany {
            name: &name,
            cnpj: &cnpj,
            corporate_name: None,
            email: None,
            phone: None,
        },
    )
    .expect("create company")
}

pub fn create_user(state: &AppState, company_id: Option<Uuid>, role: UserRole) -> TestUser {
    let mut conn = state.db.get().expect("db connection");
    let name: String = Name().fake();
    let email = unique_email();

    let user = UserRepository::create(
        &mut conn,
        NewUser {
            company_id,
            name: &name,
            email: &email,
            password_hash: "$argon2id$fixture",
            role,
            is_active: true,
            is_approved: true,
        },
    )
    .expect("create user");

    let token = SecurityConfig::create_token(state, &user).expect("token");
    TestUser { user, token }
}

/// Seeds HR attributes without going through the audited path.
pub fn set_profile(state: &AppState, user_id: Uuid, changes: UserChanges) -> User {
    let mut conn = state.db.get().expect("db connection");
    UserRepository::apply_changes(&mut conn, user_id, &changes).expect("seed profile")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
