//! Auth module: login against stored users and password hashing.

pub mod domain;
pub mod errors;
pub mod password;
pub mod service;

pub use service::AuthService;
