// GitHub Explorer shared type definitions
// Each submodule defines types used across the application.

pub mod errors;
pub mod repository;
pub mod route;
pub mod settings;
