//! Catalog entities and their field rules.
//!
//! Each entity module holds the SeaORM row definition, the loosely typed
//! input accepted from clients, and the validated draft handed to storage.

pub mod errors;
pub mod db;
pub mod validation;
pub mod search;
pub mod categoria;
pub mod produto;

#[cfg(test)]
mod tests;
