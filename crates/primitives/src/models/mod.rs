pub mod app_state;
pub mod dtos;
pub mod entities;
pub mod field_value;

// Re-export commonly used types
pub use app_state::*;
pub use dtos::*;
pub use entities::*;
