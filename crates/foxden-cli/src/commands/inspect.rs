//! `foxden inspect` — dump a season container's raw records.

use foxden_core::FoxdenConfig;

pub async fn inspect(config: FoxdenConfig, season: &str) -> anyhow::Result<()> {
    let season = super::parse_season(Some(season))?;
    let ledger = super::open_ledger(config)?;

    match ledger.inspect_season(&season).await? {
        Some(inspection) => {
            println!("{}", serde_json::to_string_pretty(&inspection)?);
            Ok(())
        }
        None => anyhow::bail!("no container for season {season}"),
    }
}
