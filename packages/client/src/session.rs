use potatopay_schema::CreatorProfile;
use std::fmt;

/// Credentials of the signed-in creator, handed to the client explicitly
#[derive(Clone, PartialEq, Eq)]
pub struct AuthSession {
    token: String,
    user: Option<CreatorProfile>,
}

impl AuthSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user: None,
        }
    }

    pub fn with_user(mut self, user: CreatorProfile) -> Self {
        self.user = Some(user);
        self
    }

    /// Read the token from an environment variable
    pub fn from_env(var: &str) -> Option<Self> {
        std::env::var(var)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .map(Self::new)
    }

    pub fn user(&self) -> Option<&CreatorProfile> {
        self.user.as_ref()
    }

    /// Username of the signed-in creator, if the profile is known
    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.username.as_str())
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// `Authorization` header value
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}
