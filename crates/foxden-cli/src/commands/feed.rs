//! `foxden feed` — append a feed event.

use tracing::info;

use foxden_core::{FoxdenConfig, Season};

pub async fn feed(
    config: FoxdenConfig,
    fox_id: &str,
    owner: Option<&str>,
    credits_delta: i64,
) -> anyhow::Result<()> {
    let owner = owner.unwrap_or(&config.app.owner).to_string();
    let season = Season::current();

    let ledger = super::open_ledger(config)?;
    let record = ledger
        .write_event(fox_id, &owner, &season, credits_delta)
        .await?;

    info!(
        fox_id,
        credits_delta,
        record_id = record.record_id,
        "feed event appended"
    );
    println!(
        "fed {fox_id} ({credits_delta:+} credits) in season {season}: record {}",
        record.record_id
    );
    Ok(())
}
