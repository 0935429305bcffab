pub mod context;
pub mod dashboard;
pub mod login;
pub mod resource;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use malha_client::AuthSession;
use malha_core::ApiConfig;

use crate::config::{ClientConfig, Context, ContextPersistence};

/// The current context, or a hint on how to pick one.
pub(crate) fn current_context(client_config_path: &Path) -> Result<Context> {
    let config = ClientConfig::load(client_config_path)?;
    config
        .current()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("No current context. Run `malha use context <name>`."))
}

/// API settings for `ctx`, with environment overrides applied.
pub(crate) fn api_config(ctx: &Context) -> Result<ApiConfig> {
    let config = ApiConfig::new(&ctx.server).with_env();
    if config.base_url.is_empty() {
        anyhow::bail!(
            "No server URL set for context \"{}\". Run `malha context set {} --server <url>`.",
            ctx.name,
            ctx.name
        );
    }
    Ok(config)
}

/// Session bound to `ctx`, persisted in the client config file.
pub(crate) fn session_for(ctx: &Context, client_config_path: &Path) -> Result<AuthSession> {
    let persistence = Arc::new(ContextPersistence::new(client_config_path, &ctx.name));
    Ok(AuthSession::new(api_config(ctx)?, persistence)?)
}

/// Restore the current context's session. Every data command goes
/// through here, so nothing is listed or changed without a login.
pub(crate) async fn open_session(client_config_path: &Path) -> Result<AuthSession> {
    let ctx = current_context(client_config_path)?;
    let session = session_for(&ctx, client_config_path)?;
    if !session.restore().await {
        anyhow::bail!("Not logged in. Run `malha login`.");
    }
    Ok(session)
}
