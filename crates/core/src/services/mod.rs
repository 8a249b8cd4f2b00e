pub mod audit_service;
pub mod auth_service;
pub mod company_service;
pub mod employee_service;
pub mod invitation_service;
pub mod time_log_service;
