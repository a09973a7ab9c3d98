use serde::{Deserialize, Serialize};

/// A repository as shown on one card of the grid.
///
/// Sourced verbatim from the API response; never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: Owner,
    pub url: String,
    pub stars: u32,
    pub forks: u32,
    pub open_issues: u32,
}

/// Repository owner, with the avatar the card links to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    pub avatar_url: String,
}

impl Owner {
    /// Profile page for this owner.
    pub fn profile_url(&self) -> String {
        format!("https://github.com/{}", self.login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_url_points_at_the_owner_page() {
        let owner = Owner {
            login: "freeCodeCamp".to_string(),
            avatar_url: "https://avatars.githubusercontent.com/u/9892522".to_string(),
        };
        assert_eq!(owner.profile_url(), "https://github.com/freeCodeCamp");
    }
}
