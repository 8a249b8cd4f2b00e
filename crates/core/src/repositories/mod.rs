pub mod audit_repository;
pub mod company_repository;
pub mod invitation_repository;
pub mod time_log_repository;
pub mod user_repository;
