//! Query modules for the price comparison SDK.
//!
//! Each module provides a query struct that borrows from a [`Connection`](crate::connection::Connection)
//! and exposes methods returning typed `Result<T>` payloads.

pub mod categories;
pub mod detail;
pub mod feed;
pub mod history;
pub mod offers;
pub mod products;
pub mod reviews;
pub mod specifications;

pub use categories::CategoryQuery;
pub use detail::DetailQuery;
pub use feed::FeedQuery;
pub use history::HistoryQuery;
pub use offers::OfferQuery;
pub use products::ProductQuery;
pub use reviews::ReviewQuery;
pub use specifications::SpecificationQuery;
