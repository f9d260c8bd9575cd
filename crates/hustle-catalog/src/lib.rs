//! Catalog logic shared by the listing, category and review pages.
//!
//! Everything in this crate is pure: it takes website and review records
//! already loaded from the datastore and narrows, orders or summarises them.

pub mod category;
pub mod filter;
pub mod matching;
pub mod parse;
pub mod rating;
pub mod sample;
pub mod sort;
pub mod text;
pub mod window;

pub use filter::FilterCriteria;
pub use rating::RatingSummary;
pub use sort::SortOption;
pub use window::LoadMore;
