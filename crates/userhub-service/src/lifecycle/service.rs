//! Lifecycle state machine over the directory, reset store and broker.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use userhub_auth::password::{PasswordHasher, PasswordValidator};
use userhub_auth::token::{SignedTokenCodec, VerificationPayload};
use userhub_broker::EventPublisher;
use userhub_cache::ResetTokenStore;
use userhub_core::error::AppError;
use userhub_core::events::{LifecycleEvent, ResetPasswordToken, WelcomeUser};
use userhub_core::result::AppResult;
use userhub_database::UserDirectory;
use userhub_entity::user::{NewUser, User, UserRole};

use super::settings::LifecycleSettings;
use crate::deadline::within;

/// Registration input, already shape-checked at the boundary.
#[derive(Clone)]
pub struct RegisterUser {
    /// Display name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Confirmation of `password`.
    pub password2: String,
}

impl fmt::Debug for RegisterUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUser")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Result of a resend-verification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResendOutcome {
    /// A `user.verification_token.created` event was published.
    Sent,
    /// The address was already verified; nothing was published.
    AlreadyVerified,
}

/// Coordinates registration, email verification and password reset.
///
/// Holds only shared handles, so clones are cheap and may serve
/// concurrent requests.
#[derive(Clone)]
pub struct LifecycleService {
    /// User records.
    directory: Arc<dyn UserDirectory>,
    /// Pending reset tokens.
    reset_tokens: ResetTokenStore,
    /// Event sink.
    publisher: Arc<dyn EventPublisher>,
    /// Verification token signer.
    codec: SignedTokenCodec,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Password policy.
    validator: PasswordValidator,
    /// Lifetimes and deadlines.
    settings: LifecycleSettings,
}

impl fmt::Debug for LifecycleService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleService")
            .field("directory", &self.directory)
            .field("publisher", &self.publisher)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl LifecycleService {
    /// Creates a new lifecycle service.
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        reset_tokens: ResetTokenStore,
        publisher: Arc<dyn EventPublisher>,
        codec: SignedTokenCodec,
        settings: LifecycleSettings,
    ) -> Self {
        Self {
            directory,
            reset_tokens,
            publisher,
            codec,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(),
            settings,
        }
    }

    /// Registers a new, unverified user and announces it on `user.created`.
    pub async fn register(&self, input: RegisterUser) -> AppResult<User> {
        self.validator
            .validate_pair(&input.password, &input.password2)?;

        let email = input.email.trim().to_string();
        if self
            .store("user lookup", self.directory.find_by_email(&email))
            .await?
            .is_some()
        {
            return Err(AppError::conflict("A user with this email already exists"));
        }

        let password_hash = self.hash(input.password).await?;
        let user = self
            .store(
                "user creation",
                self.directory.create(NewUser {
                    full_name: input.full_name.trim().to_string(),
                    email,
                    password_hash,
                    role: UserRole::User,
                }),
            )
            .await?;

        info!(user_id = %user.id, "User registered");

        self.publish(LifecycleEvent::UserCreated(welcome(&user)))
            .await?;
        Ok(user)
    }

    /// Marks the user named by a signed verification token as verified.
    pub async fn verify_email(&self, token: &str) -> AppResult<User> {
        let payload: VerificationPayload = self
            .codec
            .verify(token, self.settings.verification_max_age_seconds)?;

        let user = self
            .store(
                "email verification",
                self.directory.mark_email_verified(payload.id),
            )
            .await?;

        info!(user_id = %user.id, "Email verified");
        Ok(user)
    }

    /// Asks the mailer for another verification email, unless already verified.
    pub async fn resend_verification(&self, email: &str) -> AppResult<ResendOutcome> {
        let user = self.active_user_by_email(email).await?;

        if user.email_verified {
            debug!(user_id = %user.id, "Email already verified, nothing to resend");
            return Ok(ResendOutcome::AlreadyVerified);
        }

        self.publish(LifecycleEvent::VerificationTokenCreated(welcome(&user)))
            .await?;
        info!(user_id = %user.id, "Verification email requested");
        Ok(ResendOutcome::Sent)
    }

    /// Issues a single-use reset token and announces it on `user.reset_requested`.
    pub async fn request_password_reset(&self, email: &str) -> AppResult<()> {
        let user = self.active_user_by_email(email).await?;

        let token = Uuid::new_v4().to_string();
        self.store(
            "reset token storage",
            self.reset_tokens
                .put(&token, user.id, self.settings.reset_token_ttl),
        )
        .await?;

        info!(user_id = %user.id, "Password reset requested");

        self.publish(LifecycleEvent::ResetRequested {
            user_id: user.id,
            payload: ResetPasswordToken {
                token,
                user: user.email,
            },
        })
        .await
    }

    /// Consumes a reset token and replaces the owner's password.
    ///
    /// The token is consumed before the password is written, so it is gone
    /// even if a later step fails.
    pub async fn confirm_password_reset(
        &self,
        token: &str,
        password: &str,
        password2: &str,
    ) -> AppResult<User> {
        self.validator.validate_pair(password, password2)?;

        let user_id = self
            .store("reset token lookup", self.reset_tokens.take(token))
            .await?
            .ok_or_else(|| AppError::invalid_token("The token already expired or is incorrect"))?;

        let password_hash = self.hash(password.to_string()).await?;
        let user = self
            .store(
                "password update",
                self.directory.update_password(user_id, &password_hash),
            )
            .await?;

        info!(user_id = %user.id, "Password reset");

        self.publish(LifecycleEvent::PasswordReset {
            email: user.email.clone(),
        })
        .await?;
        Ok(user)
    }

    /// Issues a signed verification token for an active user.
    pub async fn issue_verification_token(&self, user_id: Uuid) -> AppResult<String> {
        let user = self
            .store("user lookup", self.directory.find_by_id(user_id))
            .await?;
        if !user.is_active {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }

        self.codec.issue(&VerificationPayload {
            id: user.id,
            user: user.email,
        })
    }

    /// Builds the link a user follows to verify their email.
    pub async fn verification_link(&self, user_id: Uuid) -> AppResult<String> {
        let token = self.issue_verification_token(user_id).await?;
        Ok(format!(
            "{}/auth/verify-email?token={token}",
            self.settings.public_base_url.trim_end_matches('/')
        ))
    }

    /// Resolve an email to an active user; inactive users count as unknown.
    async fn active_user_by_email(&self, email: &str) -> AppResult<User> {
        self.store("user lookup", self.directory.find_by_email(email.trim()))
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| AppError::not_found("No user found with this email"))
    }

    async fn store<T, F>(&self, operation: &str, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        within(self.settings.timeouts.store(), operation, fut).await
    }

    async fn publish(&self, event: LifecycleEvent) -> AppResult<()> {
        let topic = event.topic();
        within(
            self.settings.timeouts.publish(),
            "event publish",
            self.publisher.publish_event(&event),
        )
        .await
        .inspect_err(|e| warn!(topic, error = %e, "Lifecycle event not published"))
    }

    async fn hash(&self, password: String) -> AppResult<String> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
    }
}

fn welcome(user: &User) -> WelcomeUser {
    WelcomeUser {
        user: user.email.clone(),
        id: user.id,
        full_name: user.full_name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;

    use userhub_auth::password::PasswordHasher;
    use userhub_broker::MemoryEventPublisher;
    use userhub_cache::CacheManager;
    use userhub_cache::memory::MemoryCacheProvider;
    use userhub_core::ErrorKind;
    use userhub_core::config::TimeoutConfig;
    use userhub_core::events::topics;
    use userhub_core::traits::cache::CacheProvider;
    use userhub_database::MemoryUserDirectory;

    const SECRET: &str = "test-secret";
    const SALT: &str = "Email_Verification_&_Forgot_password";

    struct Harness {
        service: LifecycleService,
        directory: Arc<MemoryUserDirectory>,
        publisher: Arc<MemoryEventPublisher>,
        reset_tokens: ResetTokenStore,
        codec: SignedTokenCodec,
    }

    fn harness_with(directory: Arc<dyn UserDirectory>, memory: Arc<MemoryUserDirectory>) -> Harness {
        let publisher = Arc::new(MemoryEventPublisher::new());
        let reset_tokens = ResetTokenStore::new(CacheManager::from_provider(Arc::new(
            MemoryCacheProvider::default(),
        )));
        let codec = SignedTokenCodec::new(SECRET, SALT).unwrap();
        let service = LifecycleService::new(
            directory,
            reset_tokens.clone(),
            publisher.clone(),
            codec.clone(),
            LifecycleSettings::default(),
        );
        Harness {
            service,
            directory: memory,
            publisher,
            reset_tokens,
            codec,
        }
    }

    fn harness() -> Harness {
        let directory = Arc::new(MemoryUserDirectory::new());
        harness_with(directory.clone(), directory)
    }

    fn ada() -> RegisterUser {
        RegisterUser {
            full_name: "Ada L".to_string(),
            email: "ada@example.com".to_string(),
            password: "Abcdef1!".to_string(),
            password2: "Abcdef1!".to_string(),
        }
    }

    async fn reset_token_for(h: &Harness, email: &str) -> String {
        h.service.request_password_reset(email).await.unwrap();
        let events = h.publisher.events_on(topics::RESET_REQUESTED).await;
        let last = events.last().unwrap().json().unwrap();
        last["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_register_creates_unverified_user_and_emits() {
        let h = harness();
        let user = h.service.register(ada()).await.unwrap();

        assert!(!user.email_verified);
        assert!(user.is_active);
        assert_eq!(user.login_attempts, 0);
        assert_eq!(user.role, UserRole::User);
        assert_ne!(user.password_hash, "Abcdef1!");
        assert!(PasswordHasher::new()
            .verify_password("Abcdef1!", &user.password_hash)
            .unwrap());

        let events = h.publisher.events_on(topics::USER_CREATED).await;
        assert_eq!(events.len(), 1);
        let payload = events[0].json().unwrap();
        assert_eq!(payload["user"], "ada@example.com");
        assert_eq!(payload["id"], user.id.to_string());
        assert_eq!(payload["full_name"], "Ada L");
        assert_eq!(events[0].key, user.id.to_string());
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let h = harness();
        h.service.register(ada()).await.unwrap();

        let mut again = ada();
        again.full_name = "Someone Else".to_string();
        again.email = "ADA@example.com".to_string();
        again.password = "Zyxwvu9@".to_string();
        again.password2 = "Zyxwvu9@".to_string();

        let err = h.service.register(again).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(h.directory.len().await, 1);
        assert_eq!(h.publisher.events().await.len(), 1);
    }

    #[tokio::test]
    async fn test_register_rejects_policy_before_persisting() {
        let h = harness();
        let mut input = ada();
        input.password2 = "Abcdef1?".to_string();
        let err = h.service.register(input).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidParameter);

        let mut input = ada();
        input.password = "weak".to_string();
        input.password2 = "weak".to_string();
        let err = h.service.register(input).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidParameter);

        assert!(h.directory.is_empty().await);
        assert!(h.publisher.events().await.is_empty());
    }

    #[tokio::test]
    async fn test_register_publish_failure_propagates_without_rollback() {
        let h = harness();
        h.publisher.set_unavailable(true);

        let err = h.service.register(ada()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
        assert_eq!(h.directory.len().await, 1);
    }

    #[tokio::test]
    async fn test_verify_email() {
        let h = harness();
        let user = h.service.register(ada()).await.unwrap();
        let token = h.service.issue_verification_token(user.id).await.unwrap();

        let verified = h.service.verify_email(&token).await.unwrap();
        assert!(verified.email_verified);
        assert!(verified.updated_at >= user.updated_at);
        assert!(h.directory.find_by_id(user.id).await.unwrap().email_verified);
    }

    #[tokio::test]
    async fn test_verify_email_expired_token_leaves_user_unverified() {
        let h = harness();
        let user = h.service.register(ada()).await.unwrap();
        let token = h
            .codec
            .issue_at(
                &VerificationPayload {
                    id: user.id,
                    user: user.email.clone(),
                },
                Utc::now() - chrono::Duration::seconds(1801),
            )
            .unwrap();

        let err = h.service.verify_email(&token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenExpired);
        assert!(!h.directory.find_by_id(user.id).await.unwrap().email_verified);
    }

    #[tokio::test]
    async fn test_verify_email_foreign_signature() {
        let h = harness();
        let user = h.service.register(ada()).await.unwrap();
        let forged = SignedTokenCodec::new("other-secret", SALT)
            .unwrap()
            .issue(&VerificationPayload {
                id: user.id,
                user: user.email.clone(),
            })
            .unwrap();

        let err = h.service.verify_email(&forged).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenInvalid);
    }

    #[tokio::test]
    async fn test_verify_email_for_deleted_user() {
        let h = harness();
        let user = h.service.register(ada()).await.unwrap();
        let token = h.service.issue_verification_token(user.id).await.unwrap();
        h.directory.delete(user.id).await.unwrap();

        let err = h.service.verify_email(&token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_resend_verification() {
        let h = harness();
        let user = h.service.register(ada()).await.unwrap();

        let outcome = h
            .service
            .resend_verification("ada@example.com")
            .await
            .unwrap();
        assert_eq!(outcome, ResendOutcome::Sent);
        let events = h
            .publisher
            .events_on(topics::VERIFICATION_TOKEN_CREATED)
            .await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].json().unwrap()["id"], user.id.to_string());

        h.directory.mark_email_verified(user.id).await.unwrap();
        let outcome = h
            .service
            .resend_verification("ada@example.com")
            .await
            .unwrap();
        assert_eq!(outcome, ResendOutcome::AlreadyVerified);
        assert_eq!(
            h.publisher
                .events_on(topics::VERIFICATION_TOKEN_CREATED)
                .await
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_unknown_and_inactive_emails_not_found() {
        let h = harness();
        let err = h
            .service
            .resend_verification("nobody@example.com")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let user = h.service.register(ada()).await.unwrap();
        h.directory.soft_delete(user.id).await.unwrap();

        let err = h
            .service
            .resend_verification("ada@example.com")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        let err = h
            .service
            .request_password_reset("ada@example.com")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_request_password_reset_stores_token_and_emits() {
        let h = harness();
        let user = h.service.register(ada()).await.unwrap();

        let token = reset_token_for(&h, "ada@example.com").await;
        assert!(Uuid::parse_str(&token).is_ok());
        assert_eq!(h.reset_tokens.get(&token).await.unwrap(), Some(user.id));

        let events = h.publisher.events_on(topics::RESET_REQUESTED).await;
        assert_eq!(events[0].json().unwrap()["user"], "ada@example.com");
        assert_eq!(events[0].key, user.id.to_string());
    }

    #[tokio::test]
    async fn test_confirm_password_reset() {
        let h = harness();
        let user = h.service.register(ada()).await.unwrap();
        let token = reset_token_for(&h, "ada@example.com").await;

        let updated = h
            .service
            .confirm_password_reset(&token, "Newpass2@", "Newpass2@")
            .await
            .unwrap();

        assert_eq!(updated.id, user.id);
        assert_eq!(updated.login_attempts, 0);
        let hasher = PasswordHasher::new();
        assert!(hasher.verify_password("Newpass2@", &updated.password_hash).unwrap());
        assert!(!hasher.verify_password("Abcdef1!", &updated.password_hash).unwrap());

        let events = h.publisher.events_on(topics::PASSWORD_RESET).await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].payload, b"\"ada@example.com\"".to_vec());
    }

    #[tokio::test]
    async fn test_reset_token_cannot_be_replayed() {
        let h = harness();
        h.service.register(ada()).await.unwrap();
        let token = reset_token_for(&h, "ada@example.com").await;

        h.service
            .confirm_password_reset(&token, "Newpass2@", "Newpass2@")
            .await
            .unwrap();
        let err = h
            .service
            .confirm_password_reset(&token, "Other3#x", "Other3#x")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_confirms_single_success() {
        let h = harness();
        h.service.register(ada()).await.unwrap();
        let token = reset_token_for(&h, "ada@example.com").await;

        let attempts = (0..4).map(|_| {
            let service = h.service.clone();
            let token = token.clone();
            tokio::spawn(async move {
                service
                    .confirm_password_reset(&token, "Newpass2@", "Newpass2@")
                    .await
            })
        });
        let results = futures::future::join_all(attempts).await;

        let successes = results
            .iter()
            .filter(|r| r.as_ref().unwrap().is_ok())
            .count();
        assert_eq!(successes, 1);
        for result in results {
            if let Err(e) = result.unwrap() {
                assert_eq!(e.kind, ErrorKind::InvalidToken);
            }
        }
        assert_eq!(h.publisher.events_on(topics::PASSWORD_RESET).await.len(), 1);
    }

    #[tokio::test]
    async fn test_confirm_unknown_token_leaves_directory_untouched() {
        let h = harness();
        let user = h.service.register(ada()).await.unwrap();

        let err = h
            .service
            .confirm_password_reset(&Uuid::new_v4().to_string(), "Newpass2@", "Newpass2@")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
        assert_eq!(err.message, "The token already expired or is incorrect");

        let stored = h.directory.find_by_id(user.id).await.unwrap();
        assert_eq!(stored.password_hash, user.password_hash);
        assert_eq!(stored.updated_at, user.updated_at);
        assert!(h.publisher.events_on(topics::PASSWORD_RESET).await.is_empty());
    }

    #[tokio::test]
    async fn test_confirm_policy_checked_before_token_consumed() {
        let h = harness();
        h.service.register(ada()).await.unwrap();
        let token = reset_token_for(&h, "ada@example.com").await;

        let err = h
            .service
            .confirm_password_reset(&token, "Newpass2@", "Newpass2#")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidParameter);
        assert!(h.reset_tokens.get(&token).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_confirm_for_deactivated_user_not_found() {
        let h = harness();
        let user = h.service.register(ada()).await.unwrap();
        let token = reset_token_for(&h, "ada@example.com").await;
        h.directory.soft_delete(user.id).await.unwrap();

        let err = h
            .service
            .confirm_password_reset(&token, "Newpass2@", "Newpass2@")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_verification_link() {
        let h = harness();
        let user = h.service.register(ada()).await.unwrap();

        let link = h.service.verification_link(user.id).await.unwrap();
        let token = link
            .strip_prefix("http://localhost:8000/auth/verify-email?token=")
            .unwrap();
        let payload: VerificationPayload = h.codec.verify(token, 1800).unwrap();
        assert_eq!(payload.id, user.id);
        assert_eq!(payload.user, "ada@example.com");
    }

    /// Directory whose every call outlives the store deadline.
    #[derive(Debug)]
    struct StalledDirectory;

    impl StalledDirectory {
        async fn stall<T>() -> AppResult<T> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(AppError::internal("unreachable"))
        }
    }

    #[async_trait]
    impl UserDirectory for StalledDirectory {
        async fn find_by_email(&self, _email: &str) -> AppResult<Option<User>> {
            Self::stall().await
        }
        async fn find_by_id(&self, _id: Uuid) -> AppResult<User> {
            Self::stall().await
        }
        async fn create(&self, _data: NewUser) -> AppResult<User> {
            Self::stall().await
        }
        async fn mark_email_verified(&self, _id: Uuid) -> AppResult<User> {
            Self::stall().await
        }
        async fn update_password(&self, _id: Uuid, _hash: &str) -> AppResult<User> {
            Self::stall().await
        }
        async fn soft_delete(&self, _id: Uuid) -> AppResult<User> {
            Self::stall().await
        }
        async fn delete(&self, _id: Uuid) -> AppResult<()> {
            Self::stall().await
        }
        async fn health_check(&self) -> AppResult<bool> {
            Self::stall().await
        }
    }

    #[tokio::test]
    async fn test_store_deadline_is_unavailable() {
        let mut h = harness_with(
            Arc::new(StalledDirectory),
            Arc::new(MemoryUserDirectory::new()),
        );
        h.service.settings.timeouts = TimeoutConfig {
            store_ms: 20,
            publish_ms: 20,
        };

        let err = h
            .service
            .resend_verification("ada@example.com")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
    }

    /// Cache that records every write before handing it to memory.
    #[derive(Debug, Default)]
    struct RecordingCache {
        inner: MemoryCacheProvider,
        writes: std::sync::Mutex<Vec<(String, Duration)>>,
    }

    #[async_trait]
    impl CacheProvider for RecordingCache {
        async fn get(&self, key: &str) -> AppResult<Option<String>> {
            self.inner.get(key).await
        }
        async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
            self.writes.lock().unwrap().push((key.to_string(), ttl));
            self.inner.set(key, value, ttl).await
        }
        async fn delete(&self, key: &str) -> AppResult<()> {
            self.inner.delete(key).await
        }
        async fn take(&self, key: &str) -> AppResult<Option<String>> {
            self.inner.take(key).await
        }
        async fn health_check(&self) -> AppResult<bool> {
            self.inner.health_check().await
        }
    }

    #[tokio::test]
    async fn test_reset_token_stored_under_namespaced_key_for_fifteen_minutes() {
        let cache = Arc::new(RecordingCache::default());
        let directory = Arc::new(MemoryUserDirectory::new());
        let publisher = Arc::new(MemoryEventPublisher::new());
        let service = LifecycleService::new(
            directory,
            ResetTokenStore::new(CacheManager::from_provider(cache.clone())),
            publisher.clone(),
            SignedTokenCodec::new(SECRET, SALT).unwrap(),
            LifecycleSettings::default(),
        );
        service.register(ada()).await.unwrap();

        service.request_password_reset("ada@example.com").await.unwrap();

        let events = publisher.events_on(topics::RESET_REQUESTED).await;
        let token = events[0].json().unwrap()["token"]
            .as_str()
            .unwrap()
            .to_string();
        let writes = cache.writes.lock().unwrap().clone();
        assert_eq!(
            writes,
            vec![(
                format!("password-reset-token:{token}"),
                Duration::from_secs(900)
            )]
        );
    }
}
