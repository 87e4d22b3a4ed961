// Library exports for testing and reuse

pub mod config;
pub mod error;
pub mod gateway;
pub mod session;
