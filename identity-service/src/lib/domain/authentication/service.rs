use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenService;

use crate::domain::authentication::models::AuthSession;
use crate::domain::authentication::models::AuthenticatedUser;
use crate::domain::authentication::models::Identity;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::RegisterCommand;
use crate::domain::authentication::models::ResetPasswordCommand;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::authentication::ports::ResetLinkNotifier;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Attempts at finding a free guest name before giving up.
const GUEST_NAME_ATTEMPTS: usize = 5;

/// Verify a session token and extract its holder.
///
/// Scoped tokens (password reset) are not sessions and are rejected here.
pub fn verify_session(tokens: &TokenService, token: &str) -> Result<AuthenticatedUser, UserError> {
    let claims = tokens
        .verify(token)
        .map_err(|e| UserError::InvalidToken(e.to_string()))?;

    if claims.scope.is_some() {
        return Err(UserError::InvalidToken(
            "scoped token used as session".to_string(),
        ));
    }

    let username = claims
        .sub
        .ok_or_else(|| UserError::InvalidToken("missing subject".to_string()))?;

    let role = claims
        .role
        .as_deref()
        .ok_or_else(|| UserError::InvalidToken("missing role".to_string()))?
        .parse::<Role>()
        .map_err(|e| UserError::InvalidToken(e.to_string()))?;

    Ok(AuthenticatedUser { username, role })
}

/// Domain service for registration, login and password recovery.
pub struct AuthService<UR, RN>
where
    UR: UserRepository,
    RN: ResetLinkNotifier,
{
    repository: Arc<UR>,
    notifier: Arc<RN>,
    tokens: Arc<TokenService>,
    password_hasher: PasswordHasher,
}

impl<UR, RN> AuthService<UR, RN>
where
    UR: UserRepository,
    RN: ResetLinkNotifier,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `notifier` - Out-of-band reset link delivery
    /// * `tokens` - Token issuance and verification
    ///
    /// # Returns
    /// Auth service hashing passwords with default Argon2id parameters
    pub fn new(repository: Arc<UR>, notifier: Arc<RN>, tokens: Arc<TokenService>) -> Self {
        Self {
            repository,
            notifier,
            tokens,
            password_hasher: PasswordHasher::new(),
        }
    }

    /// Replace the password hasher.
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    fn open_session(&self, user: &User) -> Result<AuthSession, UserError> {
        let access_token = self
            .tokens
            .issue_session(user.username.as_str(), user.role.as_str())
            .map_err(|e| UserError::Token(e.to_string()))?;

        Ok(AuthSession {
            access_token,
            username: user.username.as_str().to_string(),
            role: user.role,
        })
    }
}

#[async_trait]
impl<UR, RN> AuthServicePort for AuthService<UR, RN>
where
    UR: UserRepository,
    RN: ResetLinkNotifier,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, UserError> {
        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = self
            .repository
            .create(NewUser::registered(command.username, password_hash))
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        self.open_session(&user)
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError> {
        let user = self
            .repository
            .find_by_username(&command.username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        // Guests have no password and can never log in
        let stored_hash = user
            .password_hash
            .as_deref()
            .ok_or(UserError::InvalidCredentials)?;

        if !self.password_hasher.verify(&command.password, stored_hash) {
            tracing::debug!(username = %user.username, "Password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        self.open_session(&user)
    }

    async fn guest_login(&self) -> Result<AuthSession, UserError> {
        let mut last_error = None;

        for attempt in 1..=GUEST_NAME_ATTEMPTS {
            let username = Username::generate_guest();

            match self.repository.create(NewUser::guest(username)).await {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, username = %user.username, "Guest created");
                    return self.open_session(&user);
                }
                Err(UserError::UsernameAlreadyExists(name)) => {
                    tracing::warn!(attempt, username = %name, "Guest name collision, retrying");
                    last_error = Some(UserError::UsernameAlreadyExists(name));
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| UserError::Unknown("no guest name attempted".into())))
    }

    async fn whoami(&self, token: &str) -> Result<Identity, UserError> {
        let session = verify_session(&self.tokens, token)?;

        if session.role == Role::Guest {
            return Ok(Identity {
                username: session.username,
                role: Role::Guest,
            });
        }

        let username = Username::from_stored(session.username)?;
        let user = self
            .repository
            .find_by_username(&username)
            .await?
            .ok_or_else(|| UserError::NotFoundByUsername(username.to_string()))?;

        Ok(Identity {
            username: user.username.as_str().to_string(),
            role: Role::User,
        })
    }

    async fn require_non_guest(&self, token: &str) -> Result<AuthenticatedUser, UserError> {
        let session = verify_session(&self.tokens, token)?;

        if session.role == Role::Guest {
            return Err(UserError::Forbidden("not allowed for guests".to_string()));
        }

        Ok(session)
    }

    async fn forgot_password(&self, identifier: &str) -> Result<(), UserError> {
        let Ok(username) = Username::new(identifier) else {
            tracing::debug!("Password reset requested for an invalid identifier");
            return Ok(());
        };

        let Some(user) = self.repository.find_by_username(&username).await? else {
            tracing::debug!(username = %username, "Password reset requested for unknown user");
            return Ok(());
        };

        let token = match self.tokens.issue_reset(user.id) {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(user_id = %user.id, error = %e, "Failed to issue reset token");
                return Ok(());
            }
        };

        if let Err(e) = self.notifier.send_reset_link(&user, &token).await {
            tracing::error!(user_id = %user.id, error = %e, "Failed to deliver reset link");
        }

        Ok(())
    }

    async fn reset_password(&self, command: ResetPasswordCommand) -> Result<(), UserError> {
        let user_id: UserId = self.tokens.verify_reset(&command.token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected reset token");
            UserError::InvalidResetToken
        })?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| UserError::NotFound(user_id.to_string()))?;

        let password_hash = self.password_hasher.hash(&command.new_password)?;
        self.repository
            .update_password_hash(&user.id, &password_hash)
            .await?;

        tracing::info!(user_id = %user.id, "Password reset");

        Ok(())
    }
}
