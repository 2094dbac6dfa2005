use std::fmt;

const REPOSITORY_PREFIX: &str = "/repositories/";

/// Client-side routes the dashboard can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The bookmark dashboard itself.
    Dashboard,
    /// Detail view for one repository, keyed by its `owner/name` identifier.
    Repository(String),
}

impl Route {
    /// Returns the navigable path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::Repository(full_name) => format!("{}{}", REPOSITORY_PREFIX, full_name),
        }
    }

    /// Parses a path produced by [`Route::path`].
    ///
    /// Repository paths must carry a two-segment `owner/name` identifier.
    pub fn parse(path: &str) -> Option<Route> {
        if path == "/" || path.is_empty() {
            return Some(Route::Dashboard);
        }
        let identifier = path.strip_prefix(REPOSITORY_PREFIX)?;
        let mut parts = identifier.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Some(Route::Repository(identifier.to_string()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
