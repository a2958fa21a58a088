// src/utils/credentials.rs

use std::collections::HashMap;
use std::sync::Arc;

/// Decides whether a username/password pair may log in.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, username: &str, password: &str) -> bool;
}

pub type SharedAuthenticator = Arc<dyn Authenticator>;

/// Fixed plaintext credential table. No hashing, lockout or rate limiting.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    users: HashMap<String, String>,
}

impl StaticCredentials {
    pub fn new<I, U, P>(users: I) -> Self
    where
        I: IntoIterator<Item = (U, P)>,
        U: Into<String>,
        P: Into<String>,
    {
        Self {
            users: users
                .into_iter()
                .map(|(u, p)| (u.into(), p.into()))
                .collect(),
        }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new([
            ("admin", "admin123"),
            ("user", "user123"),
            ("student", "student123"),
        ])
    }
}

impl Authenticator for StaticCredentials {
    fn authenticate(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|expected| expected == password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exact_pairs_only() {
        let creds = StaticCredentials::default();
        assert!(creds.authenticate("admin", "admin123"));
        assert!(creds.authenticate("student", "student123"));
        assert!(!creds.authenticate("admin", "user123"));
        assert!(!creds.authenticate("Admin", "admin123"));
        assert!(!creds.authenticate("admin", "ADMIN123"));
        assert!(!creds.authenticate("nobody", ""));
        assert!(!creds.authenticate("", ""));
    }
}
