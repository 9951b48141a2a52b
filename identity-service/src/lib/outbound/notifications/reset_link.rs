use async_trait::async_trait;

use crate::domain::authentication::ports::ResetLinkNotifier;
use crate::domain::user::models::User;
use crate::user::errors::NotificationError;

/// Delivers password reset links through the service log.
///
/// Stands in for an email channel: the link goes to the `password_reset`
/// tracing target, never back to the HTTP caller.
pub struct LogResetLinkNotifier {
    link_base_url: String,
}

impl LogResetLinkNotifier {
    pub fn new(link_base_url: impl Into<String>) -> Self {
        Self {
            link_base_url: link_base_url.into(),
        }
    }

    /// Build the link a user follows to pick a new password.
    pub fn reset_link(&self, token: &str) -> String {
        let separator = if self.link_base_url.contains('?') {
            '&'
        } else {
            '?'
        };
        format!("{}{}token={}", self.link_base_url, separator, token)
    }
}

#[async_trait]
impl ResetLinkNotifier for LogResetLinkNotifier {
    async fn send_reset_link(&self, user: &User, token: &str) -> Result<(), NotificationError> {
        let link = self.reset_link(token);

        tracing::info!(
            target: "password_reset",
            user_id = %user.id,
            username = %user.username,
            link = %link,
            "Password reset link issued"
        );

        Ok(())
    }
}
