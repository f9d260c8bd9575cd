//! Give legacy website rows without an identifier a fresh one.

use hustle_server::config::Config;
use hustle_server::init_tracing;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing("hustle_backfill_ids=info,hustle_db=info");

    let config = Config::load()?;
    let db = hustle_db::Database::open(&config.db_path)?;

    let updated = db.backfill_website_ids()?;
    info!("Backfill complete: {} websites updated", updated);
    Ok(())
}
