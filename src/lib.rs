/// Administrator contact queries
pub mod admin;
/// Basic application code
pub mod app;
/// Application authorization
pub mod auth;
/// REST clients for outside services
pub mod client;
/// Controllers for REST endpoints
pub mod controller;
/// Domain objects
pub mod domain;
/// Error enums
pub mod error;
/// Stored models
pub mod model;
/// Repositories
pub mod repo;
/// Application settings
pub mod settings;
/// Contact submission pipeline
pub mod submission;
/// Application telemetry for tracing and logging
pub mod telemetry;
