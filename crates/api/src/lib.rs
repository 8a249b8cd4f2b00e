pub mod app;
pub mod extractors;
pub mod handlers;
