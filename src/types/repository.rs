use serde::{Deserialize, Deserializer, Serialize};

/// A repository as returned by `GET /repos/{owner}/{name}`.
///
/// Only the fields the bookmark list displays are kept; everything else in the
/// API payload is ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repository {
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub owner: RepositoryOwner,
}

/// The account that owns a repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryOwner {
    pub login: String,
    pub avatar_url: String,
}

impl Repository {
    pub fn new(full_name: &str, description: &str, login: &str, avatar_url: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            description: description.to_string(),
            owner: RepositoryOwner {
                login: login.to_string(),
                avatar_url: avatar_url.to_string(),
            },
        }
    }
}

// GitHub sends `"description": null` for repositories without one.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
