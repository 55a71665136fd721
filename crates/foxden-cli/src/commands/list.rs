//! `foxden list` — list the foxes of a season.

use foxden_core::FoxdenConfig;

pub async fn list(config: FoxdenConfig, season: Option<&str>) -> anyhow::Result<()> {
    let season = super::parse_season(season)?;
    let ledger = super::open_ledger(config)?;

    let foxes = ledger.list_foxes(&season).await?;
    if foxes.is_empty() {
        println!("no foxes in season {season}");
        return Ok(());
    }

    println!("{} fox(es) in season {season}:", foxes.len());
    for fox in foxes {
        println!("  {}  {}  owner={}  created={}", fox.fox_id, fox.name, fox.owner, fox.created_at);
    }
    Ok(())
}
