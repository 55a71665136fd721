//! `foxden show` — replay one fox's records and print its current state.

use foxden_core::FoxdenConfig;

pub async fn show(config: FoxdenConfig, fox_id: &str, season: Option<&str>) -> anyhow::Result<()> {
    let season = super::parse_season(season)?;
    let ledger = super::open_ledger(config)?;

    match ledger.reduce(fox_id, &season).await? {
        Some(view) => {
            println!("{}", serde_json::to_string_pretty(&view)?);
            Ok(())
        }
        None => anyhow::bail!("no fox {fox_id} in season {season}"),
    }
}
