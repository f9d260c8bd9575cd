use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn
        .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id          TEXT PRIMARY KEY,
                email       TEXT NOT NULL UNIQUE,
                name        TEXT NOT NULL,
                password    TEXT NOT NULL,
                role        INTEGER NOT NULL DEFAULT 0,
                created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );

            CREATE TABLE websites (
                s_no                         INTEGER PRIMARY KEY,
                id                           TEXT UNIQUE,
                website_name                 TEXT,
                url                          TEXT,
                sign_up_bonus                TEXT,
                payout_methods               TEXT,
                minimum_withdrawal           TEXT,
                note_earning_potential       TEXT,
                earning_potential_in_1hr     TEXT,
                earning_potential_in_a_month TEXT,
                countries_supported          TEXT,
                payout_frequency             TEXT,
                video                        TEXT,
                kind                         TEXT,
                expert_review                TEXT,
                expert_rating                TEXT,
                expert_tips                  TEXT,
                is_it_legit                  TEXT,
                ways_to_earn                 TEXT,
                about                        TEXT,
                investment                   TEXT,
                is_verified                  INTEGER NOT NULL DEFAULT 0,
                verified_owner               TEXT REFERENCES users(id),
                created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
                updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );

            CREATE TABLE reviews (
                id          TEXT PRIMARY KEY,
                content     TEXT NOT NULL,
                rating      INTEGER CHECK (rating IS NULL OR rating BETWEEN 1 AND 5),
                website_id  INTEGER NOT NULL REFERENCES websites(s_no),
                user_id     TEXT NOT NULL REFERENCES users(id),
                created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );

            CREATE INDEX idx_reviews_website
                ON reviews(website_id, created_at);

            CREATE TABLE replies (
                id          TEXT PRIMARY KEY,
                content     TEXT NOT NULL,
                review_id   TEXT NOT NULL REFERENCES reviews(id),
                user_id     TEXT NOT NULL REFERENCES users(id),
                created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );

            CREATE INDEX idx_replies_review
                ON replies(review_id);

            CREATE TABLE verification_requests (
                id          TEXT PRIMARY KEY,
                user_id     TEXT NOT NULL REFERENCES users(id),
                website_id  INTEGER NOT NULL REFERENCES websites(s_no),
                created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
                UNIQUE(user_id, website_id)
            );

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
