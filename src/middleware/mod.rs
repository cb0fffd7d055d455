//! Request pipeline: CORS, authentication gate, route authorization policy.

pub mod auth;
pub mod cors;
pub mod policy;

pub use auth::{authenticate, AuthUser, MaybeUser};
pub use cors::cors_layer;
pub use policy::{authorize, Access, RoutePolicy, Rule};
