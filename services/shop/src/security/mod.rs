//! Authentication and authorization

pub mod middleware;
pub mod password;
pub mod policy;
pub mod remember_me;

pub use middleware::{REMEMBER_ME_COOKIE, SESSION_COOKIE, session_middleware};
pub use password::PasswordEncoder;
pub use remember_me::{RememberMeConfig, RememberMeService};
