pub mod catalog;
pub mod config;
pub mod error;
pub mod planning;
pub mod telemetry;
