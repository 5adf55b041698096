//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access behind repository traits.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod auth;
pub mod user;
pub mod product;
#[cfg(test)]
pub mod test_support;
