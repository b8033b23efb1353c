//! Service layer providing the catalog and rating operations on top of models.
//! - Separates business logic from data access through repository traits.
//! - Reuses validation and entity definitions in `models` crate.
//! - Ships SeaORM-backed and in-memory repositories.

pub mod errors;
pub mod patch;
pub mod catalog;
pub mod rating;
pub mod seed;
#[cfg(test)]
pub mod test_support;
