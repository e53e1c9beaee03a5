use std::sync::Arc;

use models::produto::{Produto, ProdutoDraft, ProdutoInput};
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::repository::{CategoriaRepository, ProdutoRepository};
use crate::require_update_id;

/// Application service for products.
/// Besides field validation it checks that a referenced category exists
/// before writing, so a dangling reference is a validation error rather
/// than a store failure.
pub struct ProdutoService<P: ?Sized + ProdutoRepository, C: ?Sized + CategoriaRepository> {
    produtos: Arc<P>,
    categorias: Arc<C>,
}

impl<P, C> ProdutoService<P, C>
where
    P: ?Sized + ProdutoRepository,
    C: ?Sized + CategoriaRepository,
{
    pub fn new(produtos: Arc<P>, categorias: Arc<C>) -> Self { Self { produtos, categorias } }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Produto>, ServiceError> {
        self.produtos.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<Produto, ServiceError> {
        self.produtos
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("produto", id))
    }

    /// Empty `nome` returns every product.
    #[instrument(skip(self))]
    pub async fn search_by_nome(&self, nome: &str) -> Result<Vec<Produto>, ServiceError> {
        if nome.is_empty() {
            return self.produtos.find_all().await;
        }
        self.produtos.find_all_by_nome_containing_ignore_case(nome).await
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: ProdutoInput) -> Result<Produto, ServiceError> {
        let draft = input.validate()?;
        self.ensure_categoria(&draft).await?;
        let created = self.produtos.save(None, &draft).await?;
        info!(id = created.id, categoria_id = ?draft.categoria_id(), "produto_created");
        Ok(created)
    }

    /// Validate, check the row exists, then replace it entirely.
    #[instrument(skip(self, input), fields(id = ?input.id))]
    pub async fn update(&self, input: ProdutoInput) -> Result<Produto, ServiceError> {
        let id = require_update_id(input.id, input.violations())?;
        let draft = input.validate()?;

        if self.produtos.find_by_id(id).await?.is_none() {
            return Err(ServiceError::not_found("produto", id));
        }
        self.ensure_categoria(&draft).await?;
        let updated = self.produtos.save(Some(id), &draft).await?;
        info!(id, "produto_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if self.produtos.find_by_id(id).await?.is_none() {
            return Err(ServiceError::not_found("produto", id));
        }
        if !self.produtos.delete_by_id(id).await? {
            // removed concurrently between the check and the delete
            return Err(ServiceError::not_found("produto", id));
        }
        info!(id, "produto_deleted");
        Ok(())
    }

    async fn ensure_categoria(&self, draft: &ProdutoDraft) -> Result<(), ServiceError> {
        let Some(cid) = draft.categoria_id() else { return Ok(()) };
        if self.categorias.exists_by_id(cid).await? {
            return Ok(());
        }
        warn!(categoria_id = cid, "produto references unknown categoria");
        Err(ServiceError::violation("categoria", format!("A Categoria {} não existe.", cid)))
    }
}
