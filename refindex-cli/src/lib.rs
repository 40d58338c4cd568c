pub mod app;
pub mod export;
pub mod telemetry;
