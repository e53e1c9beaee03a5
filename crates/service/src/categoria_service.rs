use std::sync::Arc;

use models::categoria::{self, CategoriaInput};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::require_update_id;
use crate::repository::CategoriaRepository;

/// Application service for categories: CRUD plus name search.
pub struct CategoriaService<R: ?Sized + CategoriaRepository> {
    repo: Arc<R>,
}

impl<R: ?Sized + CategoriaRepository> CategoriaService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<categoria::Model>, ServiceError> {
        self.repo.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<categoria::Model, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("categoria", id))
    }

    /// Empty `nome` returns every category.
    #[instrument(skip(self))]
    pub async fn search_by_nome(&self, nome: &str) -> Result<Vec<categoria::Model>, ServiceError> {
        if nome.is_empty() {
            return self.repo.find_all().await;
        }
        self.repo.find_all_by_nome_containing_ignore_case(nome).await
    }

    /// Validate and insert; any `id` in the input is ignored.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::CategoriaService;
    /// use service::repository::mock::InMemoryStore;
    /// use models::categoria::CategoriaInput;
    ///
    /// let svc = CategoriaService::new(Arc::new(InMemoryStore::new()));
    /// let input = CategoriaInput { id: Some(99), nome: Some("Estratégia".into()) };
    /// let created = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(created.id, 1);
    /// assert_eq!(created.nome, "Estratégia");
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CategoriaInput) -> Result<categoria::Model, ServiceError> {
        let draft = input.validate()?;
        let created = self.repo.save(None, &draft).await?;
        info!(id = created.id, "categoria_created");
        Ok(created)
    }

    /// Validate, check the row exists, then replace it entirely.
    #[instrument(skip(self, input), fields(id = ?input.id))]
    pub async fn update(&self, input: CategoriaInput) -> Result<categoria::Model, ServiceError> {
        let id = require_update_id(input.id, input.violations())?;
        let draft = input.validate()?;

        if !self.repo.exists_by_id(id).await? {
            return Err(ServiceError::not_found("categoria", id));
        }
        let updated = self.repo.save(Some(id), &draft).await?;
        info!(id, "categoria_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(ServiceError::not_found("categoria", id));
        }
        if !self.repo.delete_by_id(id).await? {
            // removed concurrently between the check and the delete
            return Err(ServiceError::not_found("categoria", id));
        }
        info!(id, "categoria_deleted");
        Ok(())
    }
}
