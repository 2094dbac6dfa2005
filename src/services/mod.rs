// GitHub Explorer services
// Services talk to the outside world: the repository API, local storage and the settings file.

pub mod github_api;
pub mod local_storage;
pub mod settings_engine;
