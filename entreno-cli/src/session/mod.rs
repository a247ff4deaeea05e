//! Application-level auth session store.
//!
//! Lifecycle: [`SessionStore::init`] once at boot, state updates on every
//! auth operation (published on a `watch` channel and fanned out to
//! [`SessionStore::on_auth_state_change`] subscribers), and
//! [`SessionStore::shutdown`] to drain and stop subscriber tasks.

use chrono::{Duration, Utc};
use serde_json::Value;
use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::backend::{AuthUser, BackendClient, BackendError, Session, SignUpOutcome};
use crate::config::{AuthConfig, Config};

pub mod guard;
mod messages;
mod recovery;

pub use guard::{navigate, GuardDecision, Route};
pub use messages::AuthFailure;
pub use recovery::{parse_recovery_link, RecoveryTokens};

/// Tokens this close to expiry are refreshed before use
const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// Session not known yet
    Loading,
    Authenticated(Session),
    Unauthenticated,
}

impl AuthState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.session().map(|s| &s.user)
    }
}

/// Why the auth state changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No has iniciado sesión")]
    NotAuthenticated,

    #[error(transparent)]
    Backend(#[from] BackendError),
}

type Listener = mpsc::UnboundedSender<(AuthEvent, Option<Session>)>;

struct Inner {
    backend: BackendClient,
    config_path: Option<PathBuf>,
    state: watch::Sender<AuthState>,
    listeners: Mutex<Vec<Listener>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

/// Holder of the current user/session, shared by every service
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SessionStore {
    /// Create a store in the `Loading` state. With a `config_path`, session
    /// changes are persisted to that config file's `[auth]` section.
    pub fn new(backend: BackendClient, config_path: Option<PathBuf>) -> Self {
        let (state, _) = watch::channel(AuthState::Loading);
        Self {
            inner: Arc::new(Inner {
                backend,
                config_path,
                state,
                listeners: Mutex::new(Vec::new()),
                tasks: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Resolve the persisted session once. Expired tokens are refreshed; a
    /// failed refresh signs the user out locally.
    pub async fn init(&self, persisted: &AuthConfig) -> AuthState {
        if persisted.access_token.is_empty() {
            self.publish(AuthEvent::InitialSession, None);
            return self.state();
        }

        let user = AuthUser {
            id: persisted.user_id.parse().unwrap_or_default(),
            email: (!persisted.email.is_empty()).then(|| persisted.email.clone()),
            user_metadata: Value::Null,
        };
        let session = Session {
            access_token: persisted.access_token.clone(),
            refresh_token: persisted.refresh_token.clone(),
            expires_in: None,
            expires_at: persisted.expires_at.map(|t| t.timestamp()),
            user,
        };

        if !needs_refresh(&session) {
            self.publish(AuthEvent::InitialSession, Some(session));
            return self.state();
        }

        match self.inner.backend.refresh_session(&session.refresh_token).await {
            Ok(fresh) => {
                self.persist(Some(&fresh));
                self.publish(AuthEvent::InitialSession, Some(fresh));
            }
            Err(e) => {
                tracing::warn!("Stored session could not be refreshed: {}", e);
                self.persist(None);
                self.publish(AuthEvent::InitialSession, None);
            }
        }
        self.state()
    }

    pub fn state(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    /// Observe state changes
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.inner.state.subscribe()
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.state().user().cloned()
    }

    /// Current session, refreshed first when the access token is about to expire
    pub async fn session(&self) -> Result<Session, SessionError> {
        let session = self
            .state()
            .session()
            .cloned()
            .ok_or(SessionError::NotAuthenticated)?;

        if !needs_refresh(&session) {
            return Ok(session);
        }

        let fresh = self
            .inner
            .backend
            .refresh_session(&session.refresh_token)
            .await?;
        self.persist(Some(&fresh));
        self.publish(AuthEvent::TokenRefreshed, Some(fresh.clone()));
        Ok(fresh)
    }

    pub async fn access_token(&self) -> Result<String, SessionError> {
        Ok(self.session().await?.access_token)
    }

    /// Register an account. A returned session signs the user in immediately.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> Result<SignUpOutcome, BackendError> {
        let outcome = self.inner.backend.sign_up(email, password, metadata).await?;

        if let SignUpOutcome::Session(session) = &outcome {
            self.persist(Some(session));
            self.publish(AuthEvent::SignedIn, Some(session.clone()));
        }
        Ok(outcome)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let session = self
            .inner
            .backend
            .sign_in_with_password(email, password)
            .await?;

        tracing::info!("Signed in as {}", email);
        self.persist(Some(&session));
        self.publish(AuthEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    /// Revoke the session remotely and forget it locally. The local session
    /// is dropped even when the provider call fails.
    pub async fn sign_out(&self) -> Result<(), BackendError> {
        let result = match self.state().session() {
            Some(session) => self.inner.backend.sign_out(&session.access_token).await,
            None => Ok(()),
        };

        self.persist(None);
        self.publish(AuthEvent::SignedOut, None);
        result
    }

    pub async fn reset_password(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), BackendError> {
        self.inner
            .backend
            .reset_password_for_email(email, redirect_to)
            .await
    }

    /// Adopt the session carried by a password-recovery link
    pub async fn recover(&self, tokens: &RecoveryTokens) -> Result<Session, SessionError> {
        let user = self.inner.backend.get_user(&tokens.access_token).await?;
        let session = Session {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            expires_in: tokens.expires_in,
            expires_at: tokens
                .expires_in
                .map(|secs| (Utc::now() + Duration::seconds(secs)).timestamp()),
            user,
        };

        self.persist(Some(&session));
        self.publish(AuthEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    pub async fn update_password(&self, new_password: &str) -> Result<(), SessionError> {
        let mut session = self.session().await?;
        let user = self
            .inner
            .backend
            .update_password(&session.access_token, new_password)
            .await?;

        session.user = user;
        self.publish(AuthEvent::UserUpdated, Some(session));
        Ok(())
    }

    /// Run `callback` for every auth change, in order, on a background task
    pub fn on_auth_state_change<F, Fut>(&self, callback: F)
    where
        F: Fn(AuthEvent, Option<Session>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        lock(&self.inner.listeners).push(tx);

        let task = tokio::spawn(async move {
            while let Some((event, session)) = rx.recv().await {
                callback(event, session).await;
            }
        });
        lock(&self.inner.tasks).push(task);
    }

    /// Stop delivering events and wait for subscribers to finish what they received
    pub async fn shutdown(&self) {
        lock(&self.inner.listeners).clear();

        let tasks: Vec<_> = lock(&self.inner.tasks).drain(..).collect();
        for task in tasks {
            if let Err(e) = task.await {
                tracing::warn!("Auth listener ended abnormally: {}", e);
            }
        }
    }

    fn publish(&self, event: AuthEvent, session: Option<Session>) {
        let state = match &session {
            Some(s) => AuthState::Authenticated(s.clone()),
            None => AuthState::Unauthenticated,
        };
        self.inner.state.send_replace(state);

        lock(&self.inner.listeners).retain(|tx| tx.send((event, session.clone())).is_ok());
    }

    fn persist(&self, session: Option<&Session>) {
        let Some(path) = &self.inner.config_path else {
            return;
        };

        let result = Config::read_file(path).and_then(|mut config| {
            match session {
                Some(s) => {
                    config.auth = AuthConfig {
                        access_token: s.access_token.clone(),
                        refresh_token: s.refresh_token.clone(),
                        expires_at: s.expires_at(),
                        user_id: s.user.id.to_string(),
                        email: s.user.email.clone().unwrap_or_default(),
                    }
                }
                None => config.clear_session(),
            }
            config.save_to(path)
        });

        if let Err(e) = result {
            tracing::warn!("Failed to persist session: {:#}", e);
        }
    }
}

fn needs_refresh(session: &Session) -> bool {
    match session.expires_at() {
        Some(expiry) => expiry <= Utc::now() + Duration::seconds(REFRESH_MARGIN_SECS),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn store() -> SessionStore {
        let backend = BackendClient::new(&Config::default()).unwrap();
        SessionStore::new(backend, None)
    }

    #[tokio::test]
    async fn test_starts_loading_then_unauthenticated_without_tokens() {
        let store = store();
        assert_eq!(store.state(), AuthState::Loading);

        let state = store.init(&AuthConfig::default()).await;
        assert_eq!(state, AuthState::Unauthenticated);
        assert!(matches!(
            store.session().await,
            Err(SessionError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_restores_unexpired_session() {
        let store = store();
        let user_id = Uuid::new_v4();
        let persisted = AuthConfig {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expires_at: Some(Utc::now() + Duration::hours(1)),
            user_id: user_id.to_string(),
            email: "ana@example.com".into(),
        };

        let state = store.init(&persisted).await;
        let user = state.user().unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(store.access_token().await.unwrap(), "access");
    }

    #[tokio::test]
    async fn test_listener_receives_events_before_shutdown_returns() {
        let store = store();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        store.on_auth_state_change(move |event, session| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push((event, session.is_some()));
            }
        });

        store.init(&AuthConfig::default()).await;
        store.shutdown().await;

        assert_eq!(
            *seen.lock().unwrap(),
            vec![(AuthEvent::InitialSession, false)]
        );
    }
}
