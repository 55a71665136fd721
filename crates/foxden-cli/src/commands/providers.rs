//! `foxden providers` — probe every configured storage provider.

use std::path::Path;

use anyhow::Context;
use tracing::info;

use foxden_core::FoxdenConfig;
use foxden_health::{check_all, render_summary, ProviderEndpoint};

pub async fn providers(config: FoxdenConfig, output: Option<&Path>) -> anyhow::Result<()> {
    let endpoints: Vec<ProviderEndpoint> = config
        .providers
        .iter()
        .map(|p| ProviderEndpoint {
            address: p.address.clone(),
            endpoint_url: p.endpoint_url.clone(),
        })
        .collect();

    if endpoints.is_empty() {
        println!("no providers configured");
        return Ok(());
    }

    let report = check_all(&endpoints).await;
    println!("{}", render_summary(&report));

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!(path = %path.display(), "probe report written");
    }

    Ok(())
}
