//! Authentication Module
//! Mission: Password login, JWT issuance and bearer-token gating of protected routes

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod user_store;

pub use api::AuthState;
pub use jwt::{JwtHandler, TokenError};
pub use middleware::{AuthError, AuthGate};
pub use models::{AuthenticatedUser, Claims, User, UserRole};
pub use user_store::UserStore;
