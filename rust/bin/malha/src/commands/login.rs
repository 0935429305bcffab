//! Login / logout commands.

use std::path::Path;

use anyhow::Result;

use super::{current_context, session_for};

/// Login to the current context's server and save the token.
pub async fn login(username: &str, password: &str, client_config_path: &Path) -> Result<()> {
    let ctx = current_context(client_config_path)?;
    let session = session_for(&ctx, client_config_path)?;

    let user = session
        .login(username, password)
        .await
        .map_err(|e| anyhow::anyhow!("Login failed: {}", e))?;

    println!("Logged in as {}.", user.user_name);
    println!("Token saved to context \"{}\".", ctx.name);
    Ok(())
}

/// Logout: forget the current context's session.
pub async fn logout(client_config_path: &Path) -> Result<()> {
    let ctx = current_context(client_config_path)?;
    let session = session_for(&ctx, client_config_path)?;
    session.logout().await?;
    println!("Logged out from context \"{}\".", ctx.name);
    Ok(())
}
