//! Authentication utilities library
//!
//! Provides the authentication building blocks of the identity service:
//! - Password hashing (Argon2id)
//! - JWT encoding and decoding (HMAC family)
//! - Session and password reset token issuance/verification
//!
//! The service crate defines its own ports and adapts these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("my_password", "not-a-hash"));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{JwtHandler, Claims};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::new().with_subject("alice");
//! let token = handler.encode(&claims).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("alice"));
//! ```
//!
//! ## Session and Reset Tokens
//! ```
//! use auth::{JwtHandler, TokenService};
//!
//! let tokens = TokenService::new(JwtHandler::new(b"secret_key_at_least_32_bytes_long!"));
//!
//! let session = tokens.issue_session("alice", "user").unwrap();
//! let claims = tokens.verify(&session).unwrap();
//! assert_eq!(claims.role.as_deref(), Some("user"));
//!
//! let reset = tokens.issue_reset(42).unwrap();
//! let user_id: i64 = tokens.verify_reset(&reset).unwrap();
//! assert_eq!(user_id, 42);
//!
//! // Session tokens are not accepted where a reset token is expected
//! assert!(tokens.verify_reset::<i64>(&session).is_err());
//! ```

pub mod jwt;
pub mod password;
pub mod tokens;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use tokens::TokenService;
pub use tokens::PASSWORD_RESET_SCOPE;
