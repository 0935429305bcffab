//! Client-side context management.
//!
//! Reads/writes `~/.malha/config.toml`. Each context names one ERP server
//! and carries the session (user + token) saved by `malha login`.

use std::path::{Path, PathBuf};

use malha_client::{PersistError, SessionPersistence};
use malha_model::SessionUser;
use serde::{Deserialize, Serialize};

/// A single context: connection to one ERP API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Context {
    /// Context name (e.g. "loja-centro").
    pub name: String,

    /// API base URL (e.g. "https://erp.example.com").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server: String,

    /// Bearer token (set by `malha login`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,

    /// User name the token was issued to.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,
}

/// Client configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Name of the currently active context.
    #[serde(rename = "current-context", default)]
    pub current_context: String,

    #[serde(default)]
    pub contexts: Vec<Context>,
}

impl ClientConfig {
    /// Default config file path: ~/.malha/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the currently active context, if any.
    pub fn current(&self) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == self.current_context)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Context> {
        self.contexts.iter_mut().find(|c| c.name == name)
    }

    /// Add or update a context.
    pub fn upsert_context(&mut self, ctx: Context) {
        if let Some(existing) = self.get_mut(&ctx.name) {
            *existing = ctx;
        } else {
            self.contexts.push(ctx);
        }
    }

    /// Remove a context by name. Returns true if it was found.
    pub fn remove_context(&mut self, name: &str) -> bool {
        let len = self.contexts.len();
        self.contexts.retain(|c| c.name != name);
        if self.current_context == name {
            self.current_context = String::new();
        }
        self.contexts.len() < len
    }
}

/// Return the malha config directory (~/.malha).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".malha")
}

// ── Session persistence ─────────────────────────────────────────────

/// Stores the session of one context in the config file.
pub struct ContextPersistence {
    path: PathBuf,
    context: String,
}

impl ContextPersistence {
    pub fn new(path: &Path, context: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            context: context.to_string(),
        }
    }

    fn write(&self, user: &str, token: &str) -> anyhow::Result<()> {
        let mut config = ClientConfig::load(&self.path)?;
        let ctx = config
            .get_mut(&self.context)
            .ok_or_else(|| anyhow::anyhow!("Context \"{}\" not found.", self.context))?;
        ctx.user = user.to_string();
        ctx.token = token.to_string();
        config.save(&self.path)
    }
}

impl SessionPersistence for ContextPersistence {
    fn load(&self) -> Option<(SessionUser, String)> {
        let config = ClientConfig::load(&self.path).ok()?;
        let ctx = config.contexts.into_iter().find(|c| c.name == self.context)?;
        if ctx.token.is_empty() || ctx.user.is_empty() {
            return None;
        }
        Some((SessionUser { user_name: ctx.user }, ctx.token))
    }

    fn save(&self, user: &SessionUser, token: &str) -> Result<(), PersistError> {
        self.write(&user.user_name, token).map_err(Into::into)
    }

    fn clear(&self) -> Result<(), PersistError> {
        self.write("", "").map_err(Into::into)
    }
}
