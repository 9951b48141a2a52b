use async_trait::async_trait;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for the user directory.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// List registered (non-guest) users for the holder of a session token.
    ///
    /// # Arguments
    /// * `token` - Bearer token of the caller
    ///
    /// # Returns
    /// Users with role `user`, in ascending id order
    ///
    /// # Errors
    /// * `InvalidToken` - Token is missing, malformed, tampered with or expired
    /// * `DatabaseError` - Database operation failed
    async fn list_registered(&self, token: &str) -> Result<Vec<User>, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// Username uniqueness is enforced by the store itself, so concurrent
    /// inserts of the same name cannot both succeed.
    ///
    /// # Arguments
    /// * `user` - User data without id
    ///
    /// # Returns
    /// Created user entity with its assigned id
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by exact username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve all users holding `role`, in ascending id order.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, UserError>;

    /// Replace the stored password hash of a user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_password_hash(&self, id: &UserId, password_hash: &str)
        -> Result<(), UserError>;
}
