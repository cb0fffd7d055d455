//! Authentication: token codec, request identity, password hashing, account endpoints.

mod handlers;
mod identity;
mod jwt;
mod service;

pub use handlers::{current_user, login, register, LoginRequest, RegisterRequest};
pub use identity::{Identity, ATTR_USER_EMAIL, ATTR_USER_ID, ATTR_USER_TYPE, ROLE_USER};
pub use jwt::{Claims, TokenCodec};
pub use service::AuthAppService;
