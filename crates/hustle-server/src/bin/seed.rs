//! Load the sample websites into the datastore.
//!
//! Rows are upserted by `s_no`, so re-running refreshes their descriptive
//! columns without touching reviews or verification state. When
//! `HUSTLE_ADMIN_EMAIL` names a registered account, it is promoted to admin.

use hustle_catalog::sample::sample_websites;
use hustle_server::config::Config;
use hustle_server::init_tracing;
use hustle_types::models::ADMIN_ROLE;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing("hustle_seed=info,hustle_db=info");

    let config = Config::load()?;
    let db = hustle_db::Database::open(&config.db_path)?;

    let sites = sample_websites();
    for site in &sites {
        db.upsert_website(site)?;
        info!("Seeded #{} {}", site.s_no, site.display_name());
    }

    info!("Seeding complete: {} websites", sites.len());

    if let Some(email) = config.admin_email.as_deref().map(str::to_lowercase) {
        if db.set_user_role(&email, ADMIN_ROLE)? {
            info!("Promoted {} to admin", email);
        } else {
            warn!("No account for {}, sign up first and re-run to promote it", email);
        }
    }
    Ok(())
}
