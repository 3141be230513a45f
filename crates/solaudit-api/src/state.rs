//! Application state shared by CLI commands and REST handlers.
//!
//! Holds one `AuditController` wired to the configured provider and a
//! registry of live review sessions. Each session's state sits behind its
//! own async mutex, so triggers on one session run one at a time while
//! different sessions proceed independently. Sessions are held in memory
//! only; idle ones are dropped by [`AppState::sweep_idle_sessions`].

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use solaudit_core::audit::controller::AuditController;
use solaudit_infra::audit_client::LlmAuditClient;
use solaudit_infra::config::{load_config, load_config_file};
use solaudit_infra::filesystem::resolve_data_dir;
use solaudit_infra::llm::create_provider;
use solaudit_infra::secret::resolve_api_key;
use solaudit_types::config::AppConfig;
use solaudit_types::llm::LlmError;
use solaudit_types::session::SessionState;

/// Controller pinned to the LLM-backed client.
pub type ConcreteController = AuditController<LlmAuditClient>;

/// One review session's state.
pub type SessionHandle = Arc<Mutex<SessionState>>;

/// Registry slot: the session plus when it was last looked up.
pub struct SessionEntry {
    handle: SessionHandle,
    last_used: Instant,
}

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<ConcreteController>,
    pub sessions: Arc<DashMap<Uuid, SessionEntry>>,
    pub config: Arc<AppConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load config, resolve the API key and wire the controller.
    ///
    /// `config_path` overrides `{data_dir}/config.toml` and must exist.
    pub async fn init(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        let config = match config_path {
            Some(path) => load_config_file(path).await?,
            None => load_config(&data_dir).await,
        };

        let api_key = resolve_api_key(&config.model.api_key_env);
        let provider = create_provider(&config.model, api_key).map_err(|e| match e {
            LlmError::AuthenticationFailed => anyhow::anyhow!(
                "no API key found: set the {} environment variable",
                config.model.api_key_env
            ),
            other => anyhow::Error::new(other),
        })
        .context("Failed to create LLM provider")?;

        tracing::debug!(
            provider = provider.name(),
            model = %config.model.model,
            data_dir = %data_dir.display(),
            "application state initialized"
        );

        let client = LlmAuditClient::new(provider, &config.model);
        Ok(Self::new(AuditController::new(client), config, data_dir))
    }

    pub fn new(controller: ConcreteController, config: AppConfig, data_dir: PathBuf) -> Self {
        Self {
            controller: Arc::new(controller),
            sessions: Arc::new(DashMap::new()),
            config: Arc::new(config),
            data_dir,
        }
    }

    /// Register a fresh Idle session and return its id.
    pub fn open_session(&self) -> Uuid {
        let id = Uuid::now_v7();
        self.sessions.insert(
            id,
            SessionEntry {
                handle: Arc::new(Mutex::new(SessionState::default())),
                last_used: Instant::now(),
            },
        );
        id
    }

    /// Look up a session and mark it as used. The handle is cloned out so no
    /// map guard is held while the caller awaits the session lock.
    pub fn session(&self, id: &Uuid) -> Option<SessionHandle> {
        self.sessions.get_mut(id).map(|mut entry| {
            entry.last_used = Instant::now();
            Arc::clone(&entry.handle)
        })
    }

    /// Drop sessions not looked up within `max_idle`. Sessions whose handle
    /// is still held by a request are kept. Returns how many were dropped.
    pub fn sweep_idle_sessions(&self, max_idle: Duration) -> usize {
        let mut dropped = 0;
        self.sessions.retain(|_, entry| {
            let keep =
                entry.last_used.elapsed() < max_idle || Arc::strong_count(&entry.handle) > 1;
            if !keep {
                dropped += 1;
            }
            keep
        });
        if dropped > 0 {
            tracing::info!(dropped, "idle review sessions dropped");
        }
        dropped
    }

    /// Drop a session. Returns `false` if it did not exist.
    pub fn close_session(&self, id: &Uuid) -> bool {
        self.sessions.remove(id).is_some()
    }
}
