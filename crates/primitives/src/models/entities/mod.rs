pub mod audit_configuration;
pub mod company;
pub mod enum_types;
pub mod invitation;
pub mod time_log;
pub mod user;
pub mod user_movement_history;

pub use audit_configuration::*;
pub use company::*;
pub use enum_types::*;
pub use invitation::*;
pub use time_log::*;
pub use user::*;
pub use user_movement_history::*;
