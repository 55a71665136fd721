//! `foxden create` — append a fox profile record.

use std::path::Path;

use anyhow::Context;
use tracing::info;

use foxden_core::{FoxdenConfig, Season};
use foxden_ledger::generate_fox_id;

pub async fn create(
    config: FoxdenConfig,
    name: &str,
    image: &Path,
    owner: Option<&str>,
) -> anyhow::Result<()> {
    anyhow::ensure!(!name.is_empty(), "--name must not be empty");

    let image_bytes = std::fs::read(image)
        .with_context(|| format!("failed to read image {}", image.display()))?;

    let owner = owner.unwrap_or(&config.app.owner).to_string();
    let season = Season::current();
    let fox_id = generate_fox_id(&owner);

    let ledger = super::open_ledger(config)?;
    let record = ledger
        .write_profile(&fox_id, name, &owner, &season, &image_bytes)
        .await?;

    info!(
        fox_id,
        container_id = record.container_id,
        record_id = record.record_id,
        "fox created"
    );
    println!(
        "created {fox_id} ({name}) in season {season}: record {} ({})",
        record.record_id, record.content_hash
    );
    Ok(())
}
