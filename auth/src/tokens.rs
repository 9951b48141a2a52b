use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Scope carried by password reset tokens.
pub const PASSWORD_RESET_SCOPE: &str = "password_reset";

/// Default lifetime of a session token.
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 365;

/// Lifetime of a password reset token.
pub const RESET_TTL_MINUTES: i64 = 15;

/// Issues and verifies the signed, expiring tokens used by the service.
///
/// Tokens are stateless: validity depends only on the signature and the
/// `exp` claim. The `*_at` variants take the current instant explicitly,
/// the plain ones use the system clock.
pub struct TokenService {
    jwt_handler: JwtHandler,
    session_ttl: Duration,
    reset_ttl: Duration,
}

impl TokenService {
    /// Create a token service over an already configured JWT handler.
    ///
    /// Session tokens live for [`DEFAULT_SESSION_TTL_DAYS`] and reset tokens
    /// for [`RESET_TTL_MINUTES`].
    pub fn new(jwt_handler: JwtHandler) -> Self {
        Self {
            jwt_handler,
            session_ttl: Duration::days(DEFAULT_SESSION_TTL_DAYS),
            reset_ttl: Duration::minutes(RESET_TTL_MINUTES),
        }
    }

    /// Override the session token lifetime.
    pub fn with_session_ttl(mut self, session_ttl: Duration) -> Self {
        self.session_ttl = session_ttl;
        self
    }

    /// Sign `claims` with `exp = now + ttl` and `iat = now`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed or `now + ttl` is out of range
    pub fn issue(&self, claims: Claims, ttl: Duration) -> Result<String, JwtError> {
        self.issue_at(claims, ttl, Utc::now())
    }

    pub fn issue_at(
        &self,
        claims: Claims,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| JwtError::EncodingFailed("token lifetime out of range".to_string()))?;
        let claims = claims
            .with_issued_at(now.timestamp())
            .with_expiration(expires_at.timestamp());

        self.jwt_handler.encode(&claims)
    }

    /// Verify signature and expiry, returning the signed claims.
    ///
    /// # Errors
    /// * `InvalidToken` / `DecodingFailed` - Bad signature or malformed token
    /// * `MissingClaim` - Token carries no `exp`
    /// * `TokenExpired` - `exp` lies in the past
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let claims: Claims = self.jwt_handler.decode(token)?;

        if claims.exp.is_none() {
            return Err(JwtError::MissingClaim("exp".to_string()));
        }

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }

    /// Issue a session token for `username` holding `role`.
    pub fn issue_session(&self, username: &str, role: &str) -> Result<String, JwtError> {
        self.issue_session_at(username, role, Utc::now())
    }

    pub fn issue_session_at(
        &self,
        username: &str,
        role: &str,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::new().with_subject(username).with_role(role);
        self.issue_at(claims, self.session_ttl, now)
    }

    /// Issue a password reset token whose subject is the user's id.
    pub fn issue_reset(&self, user_id: impl ToString) -> Result<String, JwtError> {
        self.issue_reset_at(user_id, Utc::now())
    }

    pub fn issue_reset_at(
        &self,
        user_id: impl ToString,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::new()
            .with_subject(user_id)
            .with_scope(PASSWORD_RESET_SCOPE);
        self.issue_at(claims, self.reset_ttl, now)
    }

    /// Verify a password reset token and parse its subject back into an id.
    ///
    /// # Errors
    /// * Everything [`TokenService::verify`] returns
    /// * `InvalidToken` - Scope is not `password_reset` or subject does not parse
    /// * `MissingClaim` - Token has no subject
    pub fn verify_reset<T: FromStr>(&self, token: &str) -> Result<T, JwtError> {
        self.verify_reset_at(token, Utc::now())
    }

    pub fn verify_reset_at<T: FromStr>(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<T, JwtError> {
        let claims = self.verify_at(token, now)?;

        if claims.scope.as_deref() != Some(PASSWORD_RESET_SCOPE) {
            return Err(JwtError::InvalidToken("wrong token scope".to_string()));
        }

        let subject = claims
            .sub
            .ok_or_else(|| JwtError::MissingClaim("sub".to_string()))?;

        subject
            .parse()
            .map_err(|_| JwtError::InvalidToken(format!("unparseable subject: {}", subject)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn service() -> TokenService {
        TokenService::new(JwtHandler::new(SECRET))
    }

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_issue_stamps_absolute_expiry() {
        let tokens = service();
        let now = issued_at();

        let token = tokens
            .issue_at(Claims::new().with_subject("alice"), Duration::hours(2), now)
            .expect("Failed to issue token");

        let claims = tokens.verify_at(&token, now).expect("Token should verify");
        assert_eq!(claims.sub, Some("alice".to_string()));
        assert_eq!(claims.iat, Some(now.timestamp()));
        assert_eq!(claims.exp, Some((now + Duration::hours(2)).timestamp()));
    }

    #[test]
    fn test_session_token_claims() {
        let tokens = service();
        let token = tokens.issue_session("alice", "user").unwrap();

        let claims = tokens.verify(&token).expect("Token should verify");
        assert_eq!(claims.sub, Some("alice".to_string()));
        assert_eq!(claims.role, Some("user".to_string()));
        assert!(claims.scope.is_none());
    }

    #[test]
    fn test_session_token_expiry_boundary() {
        let tokens = service();
        let now = issued_at();
        let token = tokens.issue_session_at("alice", "user", now).unwrap();

        assert!(tokens.verify_at(&token, now + Duration::days(364)).is_ok());
        assert!(tokens.verify_at(&token, now + Duration::days(365)).is_ok());
        assert_eq!(
            tokens.verify_at(&token, now + Duration::days(366)),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_session_ttl_override() {
        let tokens = service().with_session_ttl(Duration::hours(1));
        let now = issued_at();
        let token = tokens.issue_session_at("alice", "user", now).unwrap();

        assert!(tokens.verify_at(&token, now + Duration::minutes(59)).is_ok());
        assert_eq!(
            tokens.verify_at(&token, now + Duration::minutes(61)),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_out_of_range_lifetime_is_an_error() {
        let tokens = service().with_session_ttl(Duration::days(1_000_000_000));

        assert!(matches!(
            tokens.issue_session("alice", "user"),
            Err(JwtError::EncodingFailed(_))
        ));
    }

    #[test]
    fn test_reset_token_expiry_boundary() {
        let tokens = service();
        let now = issued_at();
        let token = tokens.issue_reset_at(42, now).unwrap();

        let user_id: i64 = tokens
            .verify_reset_at(&token, now + Duration::minutes(14))
            .expect("Reset token should verify");
        assert_eq!(user_id, 42);

        assert_eq!(
            tokens.verify_reset_at::<i64>(&token, now + Duration::minutes(16)),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_reset_token_claims() {
        let tokens = service();
        let token = tokens.issue_reset(7).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, Some("7".to_string()));
        assert_eq!(claims.scope, Some(PASSWORD_RESET_SCOPE.to_string()));
        assert!(claims.role.is_none());
    }

    #[test]
    fn test_verify_reset_rejects_session_token() {
        let tokens = service();
        let token = tokens.issue_session("alice", "user").unwrap();

        assert!(matches!(
            tokens.verify_reset::<i64>(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_verify_reset_rejects_unparseable_subject() {
        let tokens = service();
        let claims = Claims::new()
            .with_subject("not-a-number")
            .with_scope(PASSWORD_RESET_SCOPE);
        let token = tokens.issue(claims, Duration::minutes(5)).unwrap();

        assert!(matches!(
            tokens.verify_reset::<i64>(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_verify_rejects_token_without_expiry() {
        let tokens = service();
        let token = JwtHandler::new(SECRET)
            .encode(&Claims::new().with_subject("alice"))
            .unwrap();

        assert_eq!(
            tokens.verify(&token),
            Err(JwtError::MissingClaim("exp".to_string()))
        );
    }

    #[test]
    fn test_verify_rejects_token_signed_with_other_secret() {
        let other = TokenService::new(JwtHandler::new(b"another_secret_at_least_32_bytes!!"));
        let token = other.issue_session("alice", "user").unwrap();

        assert!(matches!(
            service().verify(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_verify_rejects_malformed_token() {
        assert!(service().verify("not-a-token").is_err());
        assert!(service().verify("a.b.c").is_err());
    }
}
