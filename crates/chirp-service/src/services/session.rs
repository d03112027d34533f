//! Caller session passed explicitly into the pipeline

use chirp_core::UserId;

use super::error::{ServiceError, ServiceResult};

/// Identity of the caller for one request.
///
/// Reads are open to anonymous sessions; creating a post requires a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<UserId>,
}

impl Session {
    /// Session without a signed-in user
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session for a signed-in user
    pub fn authenticated(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// The signed-in user, or `Unauthorized`
    pub fn require_user(&self) -> ServiceResult<&UserId> {
        self.user_id.as_ref().ok_or(ServiceError::Unauthorized)
    }
}

impl From<Option<UserId>> for Session {
    fn from(user_id: Option<UserId>) -> Self {
        Self { user_id }
    }
}
