pub mod gateway;
pub mod voices;
