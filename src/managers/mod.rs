// GitHub Explorer state managers
// Managers own stateful operations over persisted data.

pub mod bookmark_manager;
