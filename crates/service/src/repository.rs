use async_trait::async_trait;
use models::categoria::{self, CategoriaDraft};
use models::produto::{Produto, ProdutoDraft};

use crate::errors::ServiceError;

/// Persistence contract for categories.
#[async_trait]
pub trait CategoriaRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<categoria::Model>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<categoria::Model>, ServiceError>;
    /// Insert when `id` is `None`, otherwise replace the whole row.
    /// Replacing a missing row fails with `NotFound`.
    async fn save(
        &self,
        id: Option<i64>,
        draft: &CategoriaDraft,
    ) -> Result<categoria::Model, ServiceError>;
    /// Returns whether a row was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    /// Case-insensitive substring match on `nome`.
    async fn find_all_by_nome_containing_ignore_case(
        &self,
        nome: &str,
    ) -> Result<Vec<categoria::Model>, ServiceError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

/// Persistence contract for products. Reads come back with the category resolved.
#[async_trait]
pub trait ProdutoRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Produto>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Produto>, ServiceError>;
    /// Insert when `id` is `None`, otherwise replace the whole row.
    /// Replacing a missing row fails with `NotFound`.
    async fn save(&self, id: Option<i64>, draft: &ProdutoDraft) -> Result<Produto, ServiceError>;
    /// Returns whether a row was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    /// Case-insensitive substring match on `nome`.
    async fn find_all_by_nome_containing_ignore_case(
        &self,
        nome: &str,
    ) -> Result<Vec<Produto>, ServiceError>;
}

/// In-memory store for tests and local wiring. Implements both repository
/// traits over shared tables so the category foreign key can be enforced
/// the way the database does it.
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    use models::produto;
    use models::search::contains_folded;

    #[derive(Default)]
    struct Tables {
        categorias: BTreeMap<i64, categoria::Model>,
        produtos: BTreeMap<i64, produto::Model>,
        next_categoria_id: i64,
        next_produto_id: i64,
    }

    impl Tables {
        fn resolve(&self, row: &produto::Model) -> Produto {
            let cat = row.categoria_id.and_then(|cid| self.categorias.get(&cid).cloned());
            Produto::from_parts(row.clone(), cat)
        }
    }

    #[derive(Default)]
    pub struct InMemoryStore {
        tables: Mutex<Tables>,
    }

    impl InMemoryStore {
        pub fn new() -> Self { Self::default() }

        fn lock(&self) -> Result<MutexGuard<'_, Tables>, ServiceError> {
            self.tables.lock().map_err(|_| ServiceError::Db("in-memory store lock poisoned".into()))
        }

        pub fn produto_count(&self) -> usize {
            self.tables.lock().map(|t| t.produtos.len()).unwrap_or_default()
        }

        pub fn categoria_count(&self) -> usize {
            self.tables.lock().map(|t| t.categorias.len()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl CategoriaRepository for InMemoryStore {
        async fn find_all(&self) -> Result<Vec<categoria::Model>, ServiceError> {
            Ok(self.lock()?.categorias.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<categoria::Model>, ServiceError> {
            Ok(self.lock()?.categorias.get(&id).cloned())
        }

        async fn save(
            &self,
            id: Option<i64>,
            draft: &CategoriaDraft,
        ) -> Result<categoria::Model, ServiceError> {
            let mut t = self.lock()?;
            let id = match id {
                Some(id) if !t.categorias.contains_key(&id) => {
                    return Err(ServiceError::not_found("categoria", id))
                }
                Some(id) => id,
                None => {
                    t.next_categoria_id += 1;
                    t.next_categoria_id
                }
            };
            let row = draft.clone().into_model(id);
            t.categorias.insert(id, row.clone());
            Ok(row)
        }

        async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            let mut t = self.lock()?;
            if t.produtos.values().any(|p| p.categoria_id == Some(id)) {
                return Err(ServiceError::Constraint(format!(
                    "categoria {} is referenced by produtos",
                    id
                )));
            }
            Ok(t.categorias.remove(&id).is_some())
        }

        async fn find_all_by_nome_containing_ignore_case(
            &self,
            nome: &str,
        ) -> Result<Vec<categoria::Model>, ServiceError> {
            Ok(self
                .lock()?
                .categorias
                .values()
                .filter(|c| contains_folded(&c.nome, nome))
                .cloned()
                .collect())
        }
    }

    #[async_trait]
    impl ProdutoRepository for InMemoryStore {
        async fn find_all(&self) -> Result<Vec<Produto>, ServiceError> {
            let t = self.lock()?;
            Ok(t.produtos.values().map(|p| t.resolve(p)).collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Produto>, ServiceError> {
            let t = self.lock()?;
            Ok(t.produtos.get(&id).map(|p| t.resolve(p)))
        }

        async fn save(
            &self,
            id: Option<i64>,
            draft: &ProdutoDraft,
        ) -> Result<Produto, ServiceError> {
            let mut t = self.lock()?;
            if let Some(cid) = draft.categoria_id() {
                if !t.categorias.contains_key(&cid) {
                    return Err(ServiceError::Constraint(format!(
                        "categoria {} does not exist",
                        cid
                    )));
                }
            }
            let id = match id {
                Some(id) if !t.produtos.contains_key(&id) => {
                    return Err(ServiceError::not_found("produto", id))
                }
                Some(id) => id,
                None => {
                    t.next_produto_id += 1;
                    t.next_produto_id
                }
            };
            let row = draft.clone().into_model(id);
            t.produtos.insert(id, row.clone());
            Ok(t.resolve(&row))
        }

        async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.lock()?.produtos.remove(&id).is_some())
        }

        async fn find_all_by_nome_containing_ignore_case(
            &self,
            nome: &str,
        ) -> Result<Vec<Produto>, ServiceError> {
            let t = self.lock()?;
            Ok(t.produtos
                .values()
                .filter(|p| contains_folded(&p.nome, nome))
                .map(|p| t.resolve(p))
                .collect())
        }
    }
}
