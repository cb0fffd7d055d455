//! Business logic: accounts and listings.

pub mod account;
pub mod listing;

pub use account::{AccountService, CurrentIdentity};
pub use listing::ListingService;
