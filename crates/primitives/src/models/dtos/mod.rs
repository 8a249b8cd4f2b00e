pub mod audit_dto;
pub mod auth_dto;
pub mod company_dto;
pub mod invitation_dto;
pub mod page_dto;
pub mod time_log_dto;
pub mod user_dto;

pub use audit_dto::*;
pub use auth_dto::*;
pub use company_dto::*;
pub use invitation_dto::*;
pub use page_dto::*;
pub use time_log_dto::*;
pub use user_dto::*;
