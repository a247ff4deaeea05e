use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::api::ApiClient;
use crate::backend::BackendClient;
use crate::config::Config;
use crate::services::profiles;
use crate::services::videos::VideoCatalog;
use crate::session::{AuthEvent, AuthState, SessionStore};

/// Everything a command needs: configuration plus the shared clients
pub struct AppContext {
    pub config: Config,
    pub backend: BackendClient,
    pub session: SessionStore,
    pub api: ApiClient,
}

impl AppContext {
    /// Build the clients without touching the network. With `config_path`,
    /// session changes are written back to that file.
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Result<Self> {
        let backend = BackendClient::new(&config).context("No se pudo crear el cliente del backend")?;
        let session = SessionStore::new(backend.clone(), config_path);
        let api = ApiClient::new(&config, session.clone()).context("No se pudo crear el cliente de la API")?;

        Ok(Self {
            config,
            backend,
            session,
            api,
        })
    }

    /// Build the context, start the profile listener and restore the
    /// persisted session
    pub async fn boot(config: Config, config_path: Option<PathBuf>) -> Result<Self> {
        let ctx = Self::new(config, config_path)?;
        ctx.watch_profiles();

        let state = ctx.session.init(&ctx.config.auth).await;
        tracing::debug!("Session restored: {}", state.user().is_some());
        Ok(ctx)
    }

    /// Create the profile row for any user that signs in
    fn watch_profiles(&self) {
        let backend = self.backend.clone();
        self.session.on_auth_state_change(move |event, session| {
            let backend = backend.clone();
            async move {
                let Some(session) = session else { return };
                if !matches!(event, AuthEvent::InitialSession | AuthEvent::SignedIn) {
                    return;
                }
                if let Err(e) = profiles::ensure_profile_exists(&backend, &session).await {
                    tracing::warn!("Could not ensure profile for {}: {}", session.user.id, e);
                }
            }
        });
    }

    pub fn auth_state(&self) -> AuthState {
        self.session.state()
    }

    pub fn video_catalog(&self) -> VideoCatalog {
        VideoCatalog::with_extra(&self.config.videos)
    }

    /// Let pending auth work finish, then stop the listener
    pub async fn shutdown(&self) {
        self.session.shutdown().await;
    }
}
