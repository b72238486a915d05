pub mod api;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod telemetry;
pub mod validation;
