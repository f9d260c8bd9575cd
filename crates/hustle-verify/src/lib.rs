//! Website ownership verification: the embed snippet a claimant publishes,
//! the headless fetch that looks for it, and the notification emails of the
//! manual review path.

pub mod embed;
pub mod fetch;
pub mod mail;
pub mod templates;

pub use fetch::{FetchError, PageFetcher, WebDriverFetcher};
pub use mail::{MailError, Mailer, OutgoingEmail, SmtpMailer, SmtpSettings};
