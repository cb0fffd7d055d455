//! Data models for accounts and listings.

pub mod account;
pub mod hackathon;
pub mod job;
pub mod listing;

pub use account::*;
pub use hackathon::*;
pub use job::*;
pub use listing::*;
