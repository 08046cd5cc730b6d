//! Authentication: accounts, password hashing, bearer tokens and the request gate

pub mod account;
pub mod password;
pub mod service;
pub mod token;

// Re-export main components
pub use account::{Account, Confirmation, Identity, NewAccount};
pub use service::AuthService;
pub use token::{extract_bearer_token, Claims, TokenManager};
