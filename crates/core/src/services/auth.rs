//! Identity and session service.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sea_orm::Set;
use serde::Deserialize;
use troophq_common::{AppError, AppResult, IdGenerator, TokenClaims, TokenManager};
use troophq_db::{
    entities::user::{self, UserRole, UserStatus},
    repositories::UserRepository,
};
use validator::Validate;

/// Identity service: registration, login, and token verification.
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    tokens: TokenManager,
    id_gen: IdGenerator,
}

/// Input for registering a new user.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "Badge number is required"))]
    pub badge_number: String,

    /// Requested role; defaults to trooper. The pending/approve gate is the
    /// only elevation control for supervisor accounts.
    pub role: Option<String>,

    pub rank: Option<String>,
}

/// A successful login: the signed bearer token and the authenticated user.
#[derive(Debug)]
pub struct LoginOutcome {
    /// Signed bearer token.
    pub token: String,
    /// The authenticated user.
    pub user: user::Model,
}

impl AuthService {
    /// Create a new auth service.
    #[must_use]
    pub fn new(user_repo: UserRepository, tokens: TokenManager) -> Self {
        Self {
            user_repo,
            tokens,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a new user. Every registration starts `pending` regardless
    /// of the requested role.
    pub async fn register(&self, input: RegisterInput) -> AppResult<user::Model> {
        input.validate()?;

        let role = parse_role(input.role.as_deref())?;

        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        if self
            .user_repo
            .find_by_badge_number(&input.badge_number)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Badge number already in use".to_string()));
        }

        let password_hash = hash_password(&input.password)?;
        let now = chrono::Utc::now();

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            email: Set(input.email),
            password_hash: Set(password_hash),
            name: Set(input.name),
            badge_number: Set(input.badge_number),
            role: Set(role),
            rank: Set(input.rank),
            profile_image_url: Set(None),
            status: Set(UserStatus::Pending),
            denial_reason: Set(None),
            approved_by: Set(None),
            approved_at: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(None),
        };

        let user = self.user_repo.create(model).await?;

        tracing::info!(user_id = %user.id, role = role.as_str(), "New registration pending approval");

        Ok(user)
    }

    /// Authenticate by email and password, issuing a bearer token.
    ///
    /// Unknown email and wrong password produce the same error to avoid
    /// account enumeration.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(invalid_credentials());
        }

        let token = self.tokens.issue(&user.id, user.role.as_str())?;

        Ok(LoginOutcome { token, user })
    }

    /// Verify a bearer token. Pure verification, no persistence side effect.
    pub fn verify_token(&self, token: &str) -> AppResult<TokenClaims> {
        self.tokens.verify(token)
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid email or password".to_string())
}

fn parse_role(role: Option<&str>) -> AppResult<UserRole> {
    match role {
        None | Some("trooper") => Ok(UserRole::Trooper),
        Some("supervisor") => Ok(UserRole::Supervisor),
        Some(other) => Err(AppError::Validation(format!("Invalid role: {other}"))),
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_user(id: &str, email: &str, password: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
            name: "Test Trooper".to_string(),
            badge_number: "T-100".to_string(),
            role: UserRole::Trooper,
            rank: None,
            profile_image_url: None,
            status: UserStatus::Pending,
            denial_reason: None,
            approved_by: None,
            approved_at: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(db: sea_orm::DatabaseConnection) -> AuthService {
        AuthService::new(
            UserRepository::new(Arc::new(db)),
            TokenManager::new("test-secret", 7),
        )
    }

    // Unit tests for password functions
    #[test]
    fn test_hash_password() {
        let hash = hash_password("test_password_123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(hash.len() > 50);
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("test_password_123").unwrap();
        assert!(verify_password("test_password_123", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("test_password_123").unwrap();
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_hash_password_different_each_time() {
        let hash1 = hash_password("same_password").unwrap();
        let hash2 = hash_password("same_password").unwrap();

        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);
        assert!(verify_password("same_password", &hash1).unwrap());
        assert!(verify_password("same_password", &hash2).unwrap());
    }

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role(None).unwrap(), UserRole::Trooper);
        assert_eq!(parse_role(Some("trooper")).unwrap(), UserRole::Trooper);
        assert_eq!(
            parse_role(Some("supervisor")).unwrap(),
            UserRole::Supervisor
        );
        assert!(parse_role(Some("captain")).is_err());
    }

    #[test]
    fn test_register_input_validation() {
        // Bad email
        let input = RegisterInput {
            email: "not-an-email".to_string(),
            password: "password123".to_string(),
            name: "Jordan".to_string(),
            badge_number: "T-1".to_string(),
            role: None,
            rank: None,
        };
        assert!(input.validate().is_err());

        // Password too short
        let input = RegisterInput {
            email: "jordan@example.com".to_string(),
            password: "short".to_string(),
            name: "Jordan".to_string(),
            badge_number: "T-1".to_string(),
            role: None,
            rank: None,
        };
        assert!(input.validate().is_err());

        // Name too short
        let input = RegisterInput {
            email: "jordan@example.com".to_string(),
            password: "password123".to_string(),
            name: "J".to_string(),
            badge_number: "T-1".to_string(),
            role: None,
            rank: None,
        };
        assert!(input.validate().is_err());

        // Empty badge number
        let input = RegisterInput {
            email: "jordan@example.com".to_string(),
            password: "password123".to_string(),
            name: "Jordan".to_string(),
            badge_number: String::new(),
            role: None,
            rank: None,
        };
        assert!(input.validate().is_err());

        // Valid
        let input = RegisterInput {
            email: "jordan@example.com".to_string(),
            password: "password123".to_string(),
            name: "Jordan".to_string(),
            badge_number: "T-1".to_string(),
            role: Some("trooper".to_string()),
            rank: Some("Corporal".to_string()),
        };
        assert!(input.validate().is_ok());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let existing = create_test_user("user1", "taken@example.com", "password123");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing]])
            .into_connection();

        let service = service_with(db);
        let result = service
            .register(RegisterInput {
                email: "taken@example.com".to_string(),
                password: "password123".to_string(),
                name: "Jordan".to_string(),
                badge_number: "T-2".to_string(),
                role: None,
                rank: None,
            })
            .await;

        match result {
            Err(AppError::Conflict(msg)) => assert_eq!(msg, "Email already registered"),
            other => panic!("Expected Conflict error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_badge() {
        let existing = create_test_user("user1", "other@example.com", "password123");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // Email lookup finds nothing, badge lookup collides.
            .append_query_results([Vec::<user::Model>::new(), vec![existing]])
            .into_connection();

        let service = service_with(db);
        let result = service
            .register(RegisterInput {
                email: "fresh@example.com".to_string(),
                password: "password123".to_string(),
                name: "Jordan".to_string(),
                badge_number: "T-100".to_string(),
                role: None,
                rank: None,
            })
            .await;

        match result {
            Err(AppError::Conflict(msg)) => assert_eq!(msg, "Badge number already in use"),
            other => panic!("Expected Conflict error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let service = service_with(db);
        let result = service.login("nobody@example.com", "password123").await;

        match result {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Invalid email or password"),
            other => panic!("Expected Unauthorized error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_wrong_password_same_message() {
        let user = create_test_user("user1", "jordan@example.com", "password123");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user]])
            .into_connection();

        let service = service_with(db);
        let result = service.login("jordan@example.com", "wrong_password").await;

        // Wrong password is indistinguishable from unknown email.
        match result {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Invalid email or password"),
            other => panic!("Expected Unauthorized error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_success_issues_token_with_role() {
        let user = create_test_user("user1", "jordan@example.com", "password123");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user]])
            .into_connection();

        let service = service_with(db);
        let outcome = service
            .login("jordan@example.com", "password123")
            .await
            .unwrap();

        let claims = service.verify_token(&outcome.token).unwrap();
        assert_eq!(claims.sub, "user1");
        assert_eq!(claims.role, "trooper");
    }
}
