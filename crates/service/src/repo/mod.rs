//! Store-backed repository implementations.

pub mod seaorm;

pub use seaorm::{SeaOrmCategoriaRepository, SeaOrmProdutoRepository};
