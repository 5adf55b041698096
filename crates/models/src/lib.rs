//! Persistence layer: sea-orm entities for the marketplace tables, their
//! field rules, and connection helpers.

pub mod errors;
pub mod db;
pub mod user;
pub mod product;
