//! Generic resource commands.
//!
//! `malha get colors --search azul`, `malha create sale -f sale.json`, etc.
//! Every command runs through a `CrudStore`, so the list printed after a
//! change is the one the server returns on re-fetch.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use malha_client::{ApiClient, HealthStatus, NoAuth, ResourceClient};
use malha_core::Envelope;
use malha_crud::{search, CrudState, CrudStore};
use serde_json::Value;
use tracing::debug;

use super::{api_config, current_context, open_session};
use crate::views::{dispatch, Kind, View};

/// Store for `R`, with state transitions logged at debug level.
fn store<R: View>(api: &ApiClient) -> CrudStore<ResourceClient<R>> {
    let store = CrudStore::new(api.resource::<R>());
    store.subscribe(|s: &CrudState<R>| {
        debug!(
            resource = R::PLURAL,
            loading = s.loading,
            items = s.items.len(),
            error = s.error.as_deref().unwrap_or(""),
            "store updated"
        );
    });
    store
}

/// Payload of a successful envelope, or its error.
fn data<T>(envelope: Envelope<T>) -> Result<Option<T>> {
    envelope.into_result().map_err(|e| anyhow::anyhow!("Error: {}", e))
}

/// GET a resource (list, or one record by ID).
pub async fn get(
    resource: &str,
    id: Option<&str>,
    search_term: Option<&str>,
    output_json: bool,
    client_config_path: &Path,
) -> Result<()> {
    let kind = Kind::parse(resource)?;
    let session = open_session(client_config_path).await?;
    let api = session.client();
    let term = search_term.unwrap_or_default();

    dispatch!(kind, R => match id {
        Some(id) => get_one::<R>(api, id).await,
        None => list::<R>(api, term, output_json).await,
    })
}

async fn get_one<R: View>(api: &ApiClient, id: &str) -> Result<()> {
    let item = data(api.resource::<R>().get(id).await)?
        .ok_or_else(|| anyhow::anyhow!("{} {} not found.", R::NAME, id))?;
    println!("{}", serde_json::to_string_pretty(&item)?);
    Ok(())
}

async fn list<R: View>(api: &ApiClient, term: &str, output_json: bool) -> Result<()> {
    let store = store::<R>(api);
    store.fetch().await;
    let state = store.state();

    if output_json {
        if let Some(err) = state.error {
            anyhow::bail!("Error: {}", err);
        }
        let rows = search::filter(&state.items, R::SEARCH_FIELDS, term);
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let table = R::table(api).await;
    println!("{}", table.render_state(&state, term));
    if state.error.is_some() {
        anyhow::bail!("Failed to load {}.", R::PLURAL);
    }
    Ok(())
}

/// Parse a JSON payload, naming the resource on failure.
fn payload<T: serde::de::DeserializeOwned>(name: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| anyhow::anyhow!("Invalid {} payload: {}", name, e))
}

fn parse_json(json_body: &str) -> Result<Value> {
    serde_json::from_str(json_body).map_err(|e| anyhow::anyhow!("Invalid JSON: {}", e))
}

/// CREATE a resource.
pub async fn create(resource: &str, json_body: &str, client_config_path: &Path) -> Result<()> {
    let kind = Kind::parse(resource)?;
    let body = parse_json(json_body)?;
    let session = open_session(client_config_path).await?;
    let api = session.client();

    dispatch!(kind, R => create_as::<R>(api, body).await)
}

async fn create_as<R: View>(api: &ApiClient, body: Value) -> Result<()> {
    let body: R::Create = payload(R::NAME, body)?;
    let store = store::<R>(api);
    let created = data(store.create(&body).await)?;

    println!("{} created.", R::NAME);
    if let Some(item) = created {
        println!("{}", serde_json::to_string_pretty(&item)?);
    }
    println!("{} {} in total.", store.items().len(), R::PLURAL);
    Ok(())
}

/// UPDATE a resource. The ID is added to the body when missing.
pub async fn update(
    resource: &str,
    id: &str,
    json_body: &str,
    client_config_path: &Path,
) -> Result<()> {
    let kind = Kind::parse(resource)?;
    let body = with_id(parse_json(json_body)?, id)?;
    let session = open_session(client_config_path).await?;
    let api = session.client();

    dispatch!(kind, R => update_as::<R>(api, id, body).await)
}

async fn update_as<R: View>(api: &ApiClient, id: &str, body: Value) -> Result<()> {
    let body: R::Update = payload(R::NAME, body)?;
    let store = store::<R>(api);
    let updated = data(store.update(id, &body).await)?;

    println!("{} {} updated.", R::NAME, id);
    if let Some(item) = updated {
        println!("{}", serde_json::to_string_pretty(&item)?);
    }
    Ok(())
}

/// Put the target id into an update body. A different id in the body
/// would update one record through another's URL, so it is refused.
fn with_id(mut body: Value, id: &str) -> Result<Value> {
    if let Value::Object(map) = &mut body {
        match map.get("id") {
            Some(Value::String(existing)) if existing == id => {}
            Some(existing) => {
                anyhow::bail!("Body id {} does not match {}.", existing, id);
            }
            None => {
                map.insert("id".to_string(), Value::String(id.to_string()));
            }
        }
    }
    Ok(body)
}

/// DELETE a resource.
pub async fn delete(resource: &str, id: &str, client_config_path: &Path) -> Result<()> {
    let kind = Kind::parse(resource)?;
    let session = open_session(client_config_path).await?;
    let api = session.client();

    dispatch!(kind, R => delete_as::<R>(api, id).await)
}

async fn delete_as<R: View>(api: &ApiClient, id: &str) -> Result<()> {
    let store = store::<R>(api);
    data(store.remove(id).await)?;

    println!("{} {} deleted.", R::NAME, id);
    println!("{} {} remaining.", store.items().len(), R::PLURAL);
    Ok(())
}

/// STATUS: context, session and server health.
pub async fn status(client_config_path: &Path) -> Result<()> {
    let ctx = current_context(client_config_path)?;

    println!("Context:   {}", ctx.name);
    println!("Server:    {}", if ctx.server.is_empty() { "-" } else { &ctx.server });
    println!("User:      {}", if ctx.token.is_empty() { "-" } else { &ctx.user });

    let Ok(config) = api_config(&ctx) else {
        println!("Status:    no server configured");
        return Ok(());
    };

    let api = ApiClient::new(config, Arc::new(NoAuth))?;
    match api.health().await {
        HealthStatus::Connected => println!("Status:    connected"),
        HealthStatus::Error(code) => println!("Status:    error ({})", code),
        HealthStatus::Disconnected(e) => println!("Status:    disconnected ({})", e),
    }
    Ok(())
}
