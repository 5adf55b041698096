//! User accounts: wire types, persistence seam, and the CRUD service.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::UserService;
