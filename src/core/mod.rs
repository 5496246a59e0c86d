pub mod config;
pub mod speaker;
pub mod style;
pub mod validate;
pub mod wizard;
