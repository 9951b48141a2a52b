use async_trait::async_trait;

use crate::domain::authentication::models::AuthSession;
use crate::domain::authentication::models::AuthenticatedUser;
use crate::domain::authentication::models::Identity;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::RegisterCommand;
use crate::domain::authentication::models::ResetPasswordCommand;
use crate::domain::user::models::User;
use crate::user::errors::NotificationError;
use crate::user::errors::UserError;

/// Port for authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Create a registered account and open a session for it.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Normalized username is taken
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, UserError>;

    /// Check credentials and open a session.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user, guest account or wrong password
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError>;

    /// Create a password-less guest account and open a session for it.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Every generated name collided
    /// * `DatabaseError` - Database operation failed
    async fn guest_login(&self) -> Result<AuthSession, UserError>;

    /// Resolve the identity behind a session token.
    ///
    /// Guest identities come straight from the token; registered ones are
    /// looked up in the store.
    ///
    /// # Errors
    /// * `InvalidToken` - Token invalid or expired
    /// * `NotFoundByUsername` - Registered user no longer exists
    async fn whoami(&self, token: &str) -> Result<Identity, UserError>;

    /// Verify a session token and reject guests.
    ///
    /// # Errors
    /// * `InvalidToken` - Token invalid or expired
    /// * `Forbidden` - Token belongs to a guest
    async fn require_non_guest(&self, token: &str) -> Result<AuthenticatedUser, UserError>;

    /// Send a reset link to the account named by `identifier`, if any.
    ///
    /// Succeeds whether or not the account exists.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn forgot_password(&self, identifier: &str) -> Result<(), UserError>;

    /// Replace a password using a reset token.
    ///
    /// # Errors
    /// * `InvalidResetToken` - Token invalid, expired or not a reset token
    /// * `NotFound` - User referenced by the token no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn reset_password(&self, command: ResetPasswordCommand) -> Result<(), UserError>;
}

/// Out-of-band delivery of password reset links.
#[async_trait]
pub trait ResetLinkNotifier: Send + Sync + 'static {
    /// Deliver a reset link carrying `token` to `user`.
    ///
    /// # Errors
    /// * `DeliveryFailed` - The channel rejected the message
    async fn send_reset_link(&self, user: &User, token: &str) -> Result<(), NotificationError>;
}
