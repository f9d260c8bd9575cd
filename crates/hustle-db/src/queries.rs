use std::collections::HashMap;

use crate::models::{
    ReplyRow, ReviewRow, UserRow, VerificationRow, WebsiteUpdate, parse_id, parse_timestamp,
};
use crate::Database;
use anyhow::Result;
use hustle_types::api::EditableWebsite;
use hustle_types::models::{Reply, Review, VerificationDetail, Website};
use rusqlite::{Connection, Row};
use tracing::info;
use uuid::Uuid;

const WEBSITE_COLUMNS: &str = "s_no, id, website_name, url, sign_up_bonus, payout_methods,
    minimum_withdrawal, note_earning_potential, earning_potential_in_1hr,
    earning_potential_in_a_month, countries_supported, payout_frequency, video, kind,
    expert_review, expert_rating, expert_tips, is_it_legit, ways_to_earn, about, investment,
    is_verified, verified_owner, created_at, updated_at";

const NOW: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

impl Database {
    // -- Users --

    pub fn create_user(
        &self,
        id: &str,
        email: &str,
        name: &str,
        password_hash: &str,
        role: i64,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, email, name, password, role) VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![id, email, name, password_hash, role],
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "email", email))
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id", id))
    }

    /// Returns false when no account has this email.
    pub fn set_user_role(&self, email: &str, role: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE users SET role = ?1 WHERE email = ?2",
                rusqlite::params![role, email],
            )?;
            Ok(changed > 0)
        })
    }

    // -- Websites --

    pub fn list_websites(&self) -> Result<Vec<Website>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {WEBSITE_COLUMNS} FROM websites ORDER BY s_no ASC");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([], website_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_website(&self, s_no: i64) -> Result<Option<Website>> {
        self.with_conn(|conn| query_website(conn, s_no))
    }

    /// Resolve a review-page slug: case-insensitive name equality first, then
    /// a contains match with dashes read as spaces.
    pub fn find_website_by_slug(&self, slug: &str) -> Result<Option<Website>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {WEBSITE_COLUMNS} FROM websites
                 WHERE lower(website_name) = lower(?1)
                 ORDER BY s_no LIMIT 1"
            );
            if let Some(site) = conn.query_row(&sql, [slug], website_from_row).optional()? {
                return Ok(Some(site));
            }

            let spaced = slug.replace('-', " ");
            let sql = format!(
                "SELECT {WEBSITE_COLUMNS} FROM websites
                 WHERE instr(lower(website_name), lower(?1)) > 0
                 ORDER BY s_no LIMIT 1"
            );
            conn.query_row(&sql, [spaced.as_str()], website_from_row).optional()
        })
    }

    /// Fuzzy match for an ownership claim: the name appears in the website
    /// name, or the domain appears in the website URL (both case-insensitive).
    pub fn find_website_for_claim(&self, website_name: &str, domain: &str) -> Result<Option<Website>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {WEBSITE_COLUMNS} FROM websites
                 WHERE instr(lower(website_name), lower(?1)) > 0
                    OR instr(lower(url), lower(?2)) > 0
                 ORDER BY s_no LIMIT 1"
            );
            conn.query_row(&sql, [website_name, domain], website_from_row).optional()
        })
    }

    /// Insert or refresh the descriptive columns of a website keyed by `s_no`.
    /// Verification state is never touched here.
    pub fn upsert_website(&self, site: &Website) -> Result<()> {
        let id = site.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
        self.with_conn(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO websites (s_no, id, website_name, url, sign_up_bonus, payout_methods,
                        minimum_withdrawal, note_earning_potential, earning_potential_in_1hr,
                        earning_potential_in_a_month, countries_supported, payout_frequency, video, kind,
                        expert_review, expert_rating, expert_tips, is_it_legit, ways_to_earn, about,
                        investment)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15,
                        ?16, ?17, ?18, ?19, ?20, ?21)
                     ON CONFLICT(s_no) DO UPDATE SET
                        id = COALESCE(websites.id, excluded.id),
                        website_name = excluded.website_name,
                        url = excluded.url,
                        sign_up_bonus = excluded.sign_up_bonus,
                        payout_methods = excluded.payout_methods,
                        minimum_withdrawal = excluded.minimum_withdrawal,
                        note_earning_potential = excluded.note_earning_potential,
                        earning_potential_in_1hr = excluded.earning_potential_in_1hr,
                        earning_potential_in_a_month = excluded.earning_potential_in_a_month,
                        countries_supported = excluded.countries_supported,
                        payout_frequency = excluded.payout_frequency,
                        video = excluded.video,
                        kind = excluded.kind,
                        expert_review = excluded.expert_review,
                        expert_rating = excluded.expert_rating,
                        expert_tips = excluded.expert_tips,
                        is_it_legit = excluded.is_it_legit,
                        ways_to_earn = excluded.ways_to_earn,
                        about = excluded.about,
                        investment = excluded.investment,
                        updated_at = {NOW}"
                ),
                rusqlite::params![
                    site.s_no,
                    id,
                    site.website_name,
                    site.url,
                    site.sign_up_bonus,
                    site.payout_methods,
                    site.minimum_withdrawal,
                    site.note_earning_potential,
                    site.earning_potential_in_1hr,
                    site.earning_potential_in_a_month,
                    site.countries_supported,
                    site.payout_frequency,
                    site.video,
                    site.kind,
                    site.expert_review,
                    site.expert_rating,
                    site.expert_tips,
                    site.is_it_legit,
                    site.ways_to_earn,
                    site.about,
                    site.investment,
                ],
            )?;
            Ok(())
        })
    }

    /// Apply an owner edit. Returns `None` when no such website exists.
    pub fn update_website_fields(
        &self,
        s_no: i64,
        update: &WebsiteUpdate,
    ) -> Result<Option<EditableWebsite>> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                &format!(
                    "UPDATE websites
                     SET about = ?1, ways_to_earn = ?2, expert_tips = ?3,
                         payout_methods = ?4, payout_frequency = ?5, updated_at = {NOW}
                     WHERE s_no = ?6"
                ),
                rusqlite::params![
                    update.about,
                    update.ways_to_earn,
                    update.expert_tips,
                    update.payout_methods,
                    update.payout_frequency,
                    s_no,
                ],
            )?;
            if changed == 0 {
                return Ok(None);
            }

            conn.query_row(
                "SELECT s_no, website_name, about, ways_to_earn, expert_tips, payout_methods, payout_frequency
                 FROM websites WHERE s_no = ?1",
                [s_no],
                |row| {
                    Ok(EditableWebsite {
                        s_no: row.get(0)?,
                        website_name: row.get(1)?,
                        about: row.get(2)?,
                        ways_to_earn: row.get(3)?,
                        expert_tips: row.get(4)?,
                        payout_methods: row.get(5)?,
                        payout_frequency: row.get(6)?,
                    })
                },
            )
            .optional()
        })
    }

    /// Mark a website verified and record its owner. Re-applying the same
    /// owner is a no-op in effect.
    pub fn set_verified_owner(&self, s_no: i64, user_id: &str) -> Result<Option<Website>> {
        self.with_conn(|conn| {
            conn.execute(
                &format!(
                    "UPDATE websites SET is_verified = 1, verified_owner = ?1, updated_at = {NOW}
                     WHERE s_no = ?2"
                ),
                rusqlite::params![user_id, s_no],
            )?;
            query_website(conn, s_no)
        })
    }

    /// Give every legacy website row without an identifier a fresh one.
    pub fn backfill_website_ids(&self) -> Result<usize> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let missing: Vec<i64> = {
                let mut stmt = tx.prepare("SELECT s_no FROM websites WHERE id IS NULL ORDER BY s_no")?;
                stmt.query_map([], |row| row.get(0))?
                    .collect::<std::result::Result<Vec<_>, _>>()?
            };
            info!("Found {} websites without IDs", missing.len());

            for s_no in &missing {
                tx.execute(
                    "UPDATE websites SET id = ?1 WHERE s_no = ?2",
                    rusqlite::params![Uuid::new_v4().to_string(), s_no],
                )?;
            }
            tx.commit()?;
            Ok(missing.len())
        })
    }

    // -- Reviews --

    pub fn create_review(
        &self,
        id: &str,
        website_id: i64,
        user_id: &str,
        content: &str,
        rating: Option<u8>,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO reviews (id, content, rating, website_id, user_id) VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![id, content, rating, website_id, user_id],
            )?;
            Ok(())
        })
    }

    pub fn get_review(&self, id: &str) -> Result<Option<Review>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT r.id, r.content, r.rating, r.website_id, r.user_id, u.name, r.created_at
                     FROM reviews r
                     LEFT JOIN users u ON r.user_id = u.id
                     WHERE r.id = ?1",
                    [id],
                    review_from_row,
                )
                .optional()?;
            Ok(row.map(|r| r.into_model(vec![])))
        })
    }

    /// All reviews for a website, newest first, each with its replies in
    /// posting order.
    pub fn reviews_for_website(&self, website_id: i64) -> Result<Vec<Review>> {
        self.with_conn(|conn| {
            // JOIN users to fetch author names in a single query
            let mut stmt = conn.prepare(
                "SELECT r.id, r.content, r.rating, r.website_id, r.user_id, u.name, r.created_at
                 FROM reviews r
                 LEFT JOIN users u ON r.user_id = u.id
                 WHERE r.website_id = ?1
                 ORDER BY r.created_at DESC, r.id",
            )?;
            let rows = stmt
                .query_map([website_id], review_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            let review_ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
            let mut replies: HashMap<String, Vec<Reply>> = HashMap::new();
            for reply in query_replies_for_reviews(conn, &review_ids)? {
                replies.entry(reply.review_id.clone()).or_default().push(reply.into_model());
            }

            Ok(rows
                .into_iter()
                .map(|row| {
                    let thread = replies.remove(&row.id).unwrap_or_default();
                    row.into_model(thread)
                })
                .collect())
        })
    }

    // -- Replies --

    pub fn create_reply(&self, id: &str, review_id: &str, user_id: &str, content: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO replies (id, content, review_id, user_id) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![id, content, review_id, user_id],
            )?;
            Ok(())
        })
    }

    pub fn get_reply(&self, id: &str) -> Result<Option<Reply>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT p.id, p.content, p.review_id, p.user_id, u.name, p.created_at
                     FROM replies p
                     LEFT JOIN users u ON p.user_id = u.id
                     WHERE p.id = ?1",
                    [id],
                    reply_from_row,
                )
                .optional()?;
            Ok(row.map(ReplyRow::into_model))
        })
    }

    // -- Verification requests --

    /// Return the request for (user, website), creating it with `new_id` if
    /// none exists. The unique constraint and the single transaction keep
    /// concurrent duplicates from producing two rows.
    pub fn find_or_create_verification_request(
        &self,
        new_id: &str,
        user_id: &str,
        website_id: i64,
    ) -> Result<VerificationRow> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT OR IGNORE INTO verification_requests (id, user_id, website_id) VALUES (?1, ?2, ?3)",
                rusqlite::params![new_id, user_id, website_id],
            )?;
            let row = tx.query_row(
                "SELECT id, user_id, website_id, created_at FROM verification_requests
                 WHERE user_id = ?1 AND website_id = ?2",
                rusqlite::params![user_id, website_id],
                verification_from_row,
            )?;
            tx.commit()?;
            Ok(row)
        })
    }

    /// Load a request together with its claimant and website. `None` if any
    /// of the three is missing.
    pub fn get_verification_detail(&self, id: &str) -> Result<Option<VerificationDetail>> {
        self.with_conn(|conn| {
            let Some(request) = conn
                .query_row(
                    "SELECT id, user_id, website_id, created_at FROM verification_requests WHERE id = ?1",
                    [id],
                    verification_from_row,
                )
                .optional()?
            else {
                return Ok(None);
            };

            let Some(user) = query_user(conn, "id", &request.user_id)? else {
                return Ok(None);
            };
            let Some(website) = query_website(conn, request.website_id)? else {
                return Ok(None);
            };

            Ok(Some(VerificationDetail {
                request: request.into_model(),
                user: user.into_model(),
                website,
            }))
        })
    }

    pub fn count_verification_requests(&self) -> Result<i64> {
        self.with_conn(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM verification_requests", [], |r| r.get(0))?)
        })
    }
}

fn query_user(conn: &Connection, column: &str, value: &str) -> Result<Option<UserRow>> {
    // `column` is always a literal from this module
    let sql = format!("SELECT id, email, name, password, role, created_at FROM users WHERE {column} = ?1");
    let mut stmt = conn.prepare(&sql)?;

    let row = stmt
        .query_row([value], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                email: row.get(1)?,
                name: row.get(2)?,
                password: row.get(3)?,
                role: row.get(4)?,
                created_at: row.get(5)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_website(conn: &Connection, s_no: i64) -> Result<Option<Website>> {
    let sql = format!("SELECT {WEBSITE_COLUMNS} FROM websites WHERE s_no = ?1");
    conn.query_row(&sql, [s_no], website_from_row).optional()
}

fn query_replies_for_reviews(conn: &Connection, review_ids: &[String]) -> Result<Vec<ReplyRow>> {
    if review_ids.is_empty() {
        return Ok(vec![]);
    }

    let placeholders: Vec<String> = (1..=review_ids.len()).map(|i| format!("?{}", i)).collect();
    let sql = format!(
        "SELECT p.id, p.content, p.review_id, p.user_id, u.name, p.created_at
         FROM replies p
         LEFT JOIN users u ON p.user_id = u.id
         WHERE p.review_id IN ({})
         ORDER BY p.created_at ASC, p.id",
        placeholders.join(", ")
    );

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::types::ToSql> = review_ids
        .iter()
        .map(|id| id as &dyn rusqlite::types::ToSql)
        .collect();

    let rows = stmt
        .query_map(params.as_slice(), reply_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn website_from_row(row: &Row<'_>) -> rusqlite::Result<Website> {
    let verified_owner: Option<String> = row.get(22)?;
    let created_at: String = row.get(23)?;
    let updated_at: String = row.get(24)?;

    Ok(Website {
        s_no: row.get(0)?,
        id: row.get(1)?,
        website_name: row.get(2)?,
        url: row.get(3)?,
        sign_up_bonus: row.get(4)?,
        payout_methods: row.get(5)?,
        minimum_withdrawal: row.get(6)?,
        note_earning_potential: row.get(7)?,
        earning_potential_in_1hr: row.get(8)?,
        earning_potential_in_a_month: row.get(9)?,
        countries_supported: row.get(10)?,
        payout_frequency: row.get(11)?,
        video: row.get(12)?,
        kind: row.get(13)?,
        expert_review: row.get(14)?,
        expert_rating: row.get(15)?,
        expert_tips: row.get(16)?,
        is_it_legit: row.get(17)?,
        ways_to_earn: row.get(18)?,
        about: row.get(19)?,
        investment: row.get(20)?,
        is_verified: row.get(21)?,
        verified_owner: verified_owner.as_deref().map(|id| parse_id(id, "verified owner")),
        created_at: parse_timestamp(&created_at),
        updated_at: parse_timestamp(&updated_at),
    })
}

fn review_from_row(row: &Row<'_>) -> rusqlite::Result<ReviewRow> {
    Ok(ReviewRow {
        id: row.get(0)?,
        content: row.get(1)?,
        rating: row.get(2)?,
        website_id: row.get(3)?,
        user_id: row.get(4)?,
        author_name: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn reply_from_row(row: &Row<'_>) -> rusqlite::Result<ReplyRow> {
    Ok(ReplyRow {
        id: row.get(0)?,
        content: row.get(1)?,
        review_id: row.get(2)?,
        user_id: row.get(3)?,
        author_name: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn verification_from_row(row: &Row<'_>) -> rusqlite::Result<VerificationRow> {
    Ok(VerificationRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        website_id: row.get(2)?,
        created_at: row.get(3)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_db() -> (TempDir, Database) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::open(&temp_dir.path().join("test.db")).unwrap();
        (temp_dir, db)
    }

    fn site(s_no: i64, name: &str, url: &str) -> Website {
        Website {
            s_no,
            website_name: Some(name.to_string()),
            url: Some(url.to_string()),
            expert_rating: Some("4.5 out of 5".to_string()),
            ..Default::default()
        }
    }

    fn add_user(db: &Database, email: &str) -> String {
        let id = Uuid::new_v4().to_string();
        db.create_user(&id, email, "Tester", "hash", 0).unwrap();
        id
    }

    #[test]
    fn test_users_by_email_and_id() {
        let (_dir, db) = create_test_db();
        let id = add_user(&db, "a@example.com");

        let by_email = db.get_user_by_email("a@example.com").unwrap().unwrap();
        assert_eq!(by_email.id, id);
        assert!(db.get_user_by_id(&id).unwrap().is_some());
        assert!(db.get_user_by_email("missing@example.com").unwrap().is_none());
        assert!(db.create_user(&Uuid::new_v4().to_string(), "a@example.com", "x", "y", 0).is_err());
    }

    #[test]
    fn test_set_user_role() {
        let (_dir, db) = create_test_db();
        add_user(&db, "admin@example.com");

        assert!(db.set_user_role("admin@example.com", 1).unwrap());
        assert_eq!(db.get_user_by_email("admin@example.com").unwrap().unwrap().role, 1);
        assert!(!db.set_user_role("nobody@example.com", 1).unwrap());
    }

    #[test]
    fn test_upsert_and_list_websites_ordered() {
        let (_dir, db) = create_test_db();
        db.upsert_website(&site(2, "Beta", "https://beta.io")).unwrap();
        db.upsert_website(&site(1, "Alpha", "https://alpha.io")).unwrap();

        let mut renamed = site(1, "Alpha Prime", "https://alpha.io");
        renamed.id = Some("ignored".to_string());
        db.upsert_website(&renamed).unwrap();

        let all = db.list_websites().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].s_no, 1);
        assert_eq!(all[0].website_name.as_deref(), Some("Alpha Prime"));
        // first id assigned is kept
        assert_ne!(all[0].id.as_deref(), Some("ignored"));
        assert!(!all[0].is_verified);
    }

    #[test]
    fn test_find_website_by_slug() {
        let (_dir, db) = create_test_db();
        db.upsert_website(&site(1, "CashApp Surveys", "https://cashappsurveys.com")).unwrap();

        let exact = db.find_website_by_slug("cashapp surveys").unwrap().unwrap();
        assert_eq!(exact.s_no, 1);
        let dashed = db.find_website_by_slug("cashapp-surveys").unwrap().unwrap();
        assert_eq!(dashed.s_no, 1);
        assert!(db.find_website_by_slug("nothing-here").unwrap().is_none());
    }

    #[test]
    fn test_find_website_for_claim_by_name_or_domain() {
        let (_dir, db) = create_test_db();
        db.upsert_website(&site(1, "PollPay", "https://pollpay.com")).unwrap();

        assert_eq!(db.find_website_for_claim("pollpay", "zzz").unwrap().unwrap().s_no, 1);
        assert_eq!(db.find_website_for_claim("zzz", "POLLPAY.COM").unwrap().unwrap().s_no, 1);
        assert!(db.find_website_for_claim("zzz", "yyy").unwrap().is_none());
    }

    #[test]
    fn test_update_fields_and_verified_owner() {
        let (_dir, db) = create_test_db();
        db.upsert_website(&site(1, "PollPay", "https://pollpay.com")).unwrap();
        let owner = add_user(&db, "owner@example.com");

        let update = WebsiteUpdate {
            about: Some("New about".to_string()),
            ..Default::default()
        };
        let edited = db.update_website_fields(1, &update).unwrap().unwrap();
        assert_eq!(edited.about.as_deref(), Some("New about"));
        assert!(edited.payout_methods.is_none());
        assert!(db.update_website_fields(99, &update).unwrap().is_none());

        let first = db.set_verified_owner(1, &owner).unwrap().unwrap();
        let second = db.set_verified_owner(1, &owner).unwrap().unwrap();
        assert!(first.is_verified && second.is_verified);
        assert_eq!(second.verified_owner.map(|u| u.to_string()), Some(owner));
    }

    #[test]
    fn test_reviews_with_replies_newest_first() {
        let (_dir, db) = create_test_db();
        db.upsert_website(&site(1, "PollPay", "https://pollpay.com")).unwrap();
        let author = add_user(&db, "r@example.com");

        let first = Uuid::new_v4().to_string();
        let second = Uuid::new_v4().to_string();
        db.create_review(&first, 1, &author, "first", Some(4)).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        db.create_review(&second, 1, &author, "second", None).unwrap();
        db.create_reply(&Uuid::new_v4().to_string(), &first, &author, "thanks").unwrap();

        let reviews = db.reviews_for_website(1).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].content, "second");
        assert_eq!(reviews[0].rating, None);
        assert_eq!(reviews[1].rating, Some(4));
        assert_eq!(reviews[1].replies.len(), 1);
        assert_eq!(reviews[1].author_name.as_deref(), Some("Tester"));
    }

    #[test]
    fn test_rating_out_of_range_is_rejected() {
        let (_dir, db) = create_test_db();
        db.upsert_website(&site(1, "PollPay", "https://pollpay.com")).unwrap();
        let author = add_user(&db, "r@example.com");

        assert!(db.create_review(&Uuid::new_v4().to_string(), 1, &author, "bad", Some(6)).is_err());
    }

    #[test]
    fn test_find_or_create_verification_request_reuses_row() {
        let (_dir, db) = create_test_db();
        db.upsert_website(&site(1, "PollPay", "https://pollpay.com")).unwrap();
        let user = add_user(&db, "c@example.com");

        let a = db.find_or_create_verification_request(&Uuid::new_v4().to_string(), &user, 1).unwrap();
        let b = db.find_or_create_verification_request(&Uuid::new_v4().to_string(), &user, 1).unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(db.count_verification_requests().unwrap(), 1);

        let detail = db.get_verification_detail(&a.id).unwrap().unwrap();
        assert_eq!(detail.user.email, "c@example.com");
        assert_eq!(detail.website.s_no, 1);
        assert!(db.get_verification_detail("unknown").unwrap().is_none());
    }

    #[test]
    fn test_backfill_website_ids() {
        let (_dir, db) = create_test_db();
        db.upsert_website(&site(1, "PollPay", "https://pollpay.com")).unwrap();
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO websites (s_no, website_name) VALUES (2, 'Legacy'), (3, 'Older')",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        assert_eq!(db.backfill_website_ids().unwrap(), 2);
        assert_eq!(db.backfill_website_ids().unwrap(), 0);
        assert!(db.list_websites().unwrap().iter().all(|w| w.id.is_some()));
    }
}
