use core::time::Duration;

use compact_str::CompactString;
use reqwest::Client;
use serde_json::Value;

/// The envelope carried the project but not the field we want.
pub const NOT_AVAILABLE: &str = "N/A";
/// The request itself failed (network, timeout, non-2xx, non-JSON body).
pub const FAILED: &str = "Error";

pub struct Context {
    pub client: Client,
    pub api_base: String,
    pub timeout: Duration,
}

/// Resolves a project id to its operating-unit (country) name. Every failure
/// path collapses to a sentinel; this never cuts the caller's loop short.
pub async fn country_of(project_id: &str, ctx: &Context) -> CompactString {
    let url = format!("{}/{project_id}", ctx.api_base);

    match details(&url, ctx).await {
        Ok(body) => body
            .get("data")
            .and_then(|data| data.get("operating_unit"))
            .and_then(|unit| unit.get("name"))
            .and_then(Value::as_str)
            .map_or_else(|| CompactString::const_new(NOT_AVAILABLE), CompactString::new),
        Err(e) => {
            tracing::warn!(target: "resolver", "error fetching data for project {project_id}: {e}");
            CompactString::const_new(FAILED)
        }
    }
}

async fn details(url: &str, ctx: &Context) -> reqwest::Result<Value> {
    ctx.client
        .get(url)
        .timeout(ctx.timeout)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}
