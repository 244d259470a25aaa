pub mod detail;
pub mod history;
pub mod offer;
pub mod product;
pub mod review;

pub use detail::*;
pub use history::*;
pub use offer::*;
pub use product::*;
pub use review::*;

/// Shown for a missing discount or delivery estimate.
pub const NOT_AVAILABLE: &str = "N/A";
/// Shown for a review without a resolvable author.
pub const ANONYMOUS: &str = "Anonymous";
/// Avatar initial for a review without a resolvable author.
pub const UNKNOWN_INITIAL: &str = "U";
