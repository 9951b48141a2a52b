use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenService;

use crate::domain::authentication::service::verify_session;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service for the user directory.
///
/// Any valid session token may list registered users, guests included.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    tokens: Arc<TokenService>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `tokens` - Token issuance and verification
    pub fn new(repository: Arc<UR>, tokens: Arc<TokenService>) -> Self {
        Self { repository, tokens }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn list_registered(&self, token: &str) -> Result<Vec<User>, UserError> {
        let caller = verify_session(&self.tokens, token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected token on user listing");
            e
        })?;

        let users = self.repository.list_by_role(Role::User).await?;
        tracing::debug!(
            requested_by = %caller.username,
            count = users.len(),
            "Listed registered users"
        );

        Ok(users)
    }
}
