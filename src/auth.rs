use std::collections::HashMap;

use crate::error::AppError;

/// Static username to password table, taken from the `users` config section.
#[derive(Clone, Debug)]
pub struct CredentialStore {
    users: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(users: HashMap<String, String>) -> Self {
        Self { users }
    }

    /// Plain string equality, not constant time.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|stored| stored == password)
    }

    /// Checks credentials taken from query parameters. Absent and empty
    /// values both count as missing.
    pub fn verify(&self, username: Option<&str>, password: Option<&str>) -> Result<(), AppError> {
        let (username, password) = match (username, password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
            _ => return Err(AppError::MissingCredentials),
        };

        if self.authenticate(username, password) {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }
}
