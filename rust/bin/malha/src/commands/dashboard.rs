//! Sales overview: totals plus the most recent sales.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use malha_client::ApiClient;
use malha_core::format::format_brl;
use malha_crud::Lookup;
use malha_model::{Customer, Sale, SalesMetrics};
use serde::Serialize;
use tracing::warn;

use super::open_session;
use crate::views::sales_table;

/// Number of sales listed under "Recent sales".
const RECENT: usize = 5;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Dashboard<'a> {
    metrics: SalesMetrics,
    recent_sales: &'a [Sale],
}

pub async fn show(output_json: bool, client_config_path: &Path) -> Result<()> {
    let session = open_session(client_config_path).await?;
    let (sales, customers) = load(session.client()).await?;
    println!("{}", render(&sales, &customers, output_json)?);
    Ok(())
}

/// Sales and customers, fetched side by side. Customers only feed the
/// name column, so losing them is not fatal.
async fn load(api: &ApiClient) -> Result<(Vec<Sale>, Vec<Customer>)> {
    let sales_api = api.resource::<Sale>();
    let customers_api = api.resource::<Customer>();
    let (sales, customers) = tokio::join!(sales_api.list(), customers_api.list());

    let sales = sales
        .into_result()
        .map_err(|e| anyhow::anyhow!("Failed to load sales: {}", e))?
        .unwrap_or_default();
    let customers = match customers.into_result() {
        Ok(list) => list.unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "customer names unavailable");
            Vec::new()
        }
    };
    Ok((sales, customers))
}

fn render(sales: &[Sale], customers: &[Customer], output_json: bool) -> Result<String> {
    let metrics = SalesMetrics::from_sales(sales);
    let recent = SalesMetrics::recent(sales, RECENT);

    if output_json {
        let view = Dashboard { metrics, recent_sales: recent };
        return Ok(serde_json::to_string_pretty(&view)?);
    }

    let mut out = String::new();
    writeln!(out, "Total sales:      {}", metrics.total_sales)?;
    writeln!(out, "Total revenue:    {}", format_brl(metrics.total_revenue))?;
    writeln!(out, "Pending sales:    {}", metrics.pending_sales)?;
    writeln!(out, "Completed sales:  {}", metrics.completed_sales)?;
    writeln!(out)?;
    writeln!(out, "Recent sales")?;
    let table = sales_table("Recent sales", Lookup::from_items(customers));
    out.push_str(&table.render(recent, ""));
    Ok(out)
}
