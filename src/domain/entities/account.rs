use std::fmt;

/// A named credential pair for one depository login.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    pub username: String,
    pub password: String,
}

impl Account {
    pub fn new(name: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
