pub mod audit_configuration;
pub mod audit_history;
pub mod company;
pub mod health;
pub mod invitations;
pub mod manage_employee;
pub mod manual_time_log;
pub mod register_employee;
pub mod register_manager;
pub mod time_log;
pub mod time_log_approval;
pub mod update_profile;
