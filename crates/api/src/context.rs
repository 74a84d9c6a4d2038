use trackhub_core::UserId;

/// Authenticated caller for a request.
///
/// Inserted by the auth middleware; every `/api` route can rely on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    uid: UserId,
    email: Option<String>,
}

impl PrincipalContext {
    pub fn new(uid: UserId, email: Option<String>) -> Self {
        Self { uid, email }
    }

    pub fn uid(&self) -> &UserId {
        &self.uid
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
