use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::repo::{SeaOrmCategoriaRepository, SeaOrmProdutoRepository};
use service::repository::mock::InMemoryStore;
use service::repository::{CategoriaRepository, ProdutoRepository};
use service::{CategoriaService, ProdutoService};

pub type DynCategoriaService = CategoriaService<dyn CategoriaRepository>;
pub type DynProdutoService = ProdutoService<dyn ProdutoRepository, dyn CategoriaRepository>;

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub categorias: Arc<DynCategoriaService>,
    pub produtos: Arc<DynProdutoService>,
}

impl ServerState {
    pub fn new(
        categorias: Arc<dyn CategoriaRepository>,
        produtos: Arc<dyn ProdutoRepository>,
    ) -> Self {
        Self {
            produtos: Arc::new(ProdutoService::new(produtos, Arc::clone(&categorias))),
            categorias: Arc::new(CategoriaService::new(categorias)),
        }
    }

    pub fn from_db(db: DatabaseConnection) -> Self {
        let categorias: Arc<dyn CategoriaRepository> =
            Arc::new(SeaOrmCategoriaRepository::new(db.clone()));
        let produtos: Arc<dyn ProdutoRepository> = Arc::new(SeaOrmProdutoRepository::new(db));
        Self::new(categorias, produtos)
    }

    /// State backed by a process-local store, used by tests and demos.
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let categorias: Arc<dyn CategoriaRepository> = store.clone();
        let produtos: Arc<dyn ProdutoRepository> = store;
        Self::new(categorias, produtos)
    }
}
