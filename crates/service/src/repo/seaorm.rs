use async_trait::async_trait;
use sea_orm::sea_query::{Expr, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IdenStatic, QueryFilter,
    QueryOrder,
};

use models::categoria::{self, CategoriaDraft};
use models::produto::{self, Produto, ProdutoDraft};
use models::search;

use crate::errors::ServiceError;
use crate::repository::{CategoriaRepository, ProdutoRepository};

/// Escapes `LIKE` wildcards so user input is matched literally.
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// `<table>.<col> LIKE '%<folded needle>%'` against a stored folded key,
/// qualified so it stays unambiguous when the query joins another table.
/// Folding happens in Rust on both sides, so every backend agrees on which
/// letters match.
fn folded_contains<E, C>(entity: E, column: C, needle: &str) -> SimpleExpr
where
    E: IdenStatic + 'static,
    C: ColumnTrait + IdenStatic + 'static,
{
    let pattern = format!("%{}%", escape_like(&search::fold(needle)));
    Expr::col((entity, column)).like(LikeExpr::new(pattern).escape('\\'))
}

fn replace_err(entity: &'static str, id: i64) -> impl FnOnce(DbErr) -> ServiceError {
    move |e| match e {
        DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => ServiceError::not_found(entity, id),
        other => other.into(),
    }
}

/// SeaORM-backed category repository.
pub struct SeaOrmCategoriaRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCategoriaRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl CategoriaRepository for SeaOrmCategoriaRepository {
    async fn find_all(&self) -> Result<Vec<categoria::Model>, ServiceError> {
        let rows = categoria::Entity::find()
            .order_by_asc(categoria::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<categoria::Model>, ServiceError> {
        Ok(categoria::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn save(
        &self,
        id: Option<i64>,
        draft: &CategoriaDraft,
    ) -> Result<categoria::Model, ServiceError> {
        match id {
            None => Ok(draft.active_model(None).insert(&self.db).await?),
            Some(id) => draft
                .active_model(Some(id))
                .update(&self.db)
                .await
                .map_err(replace_err("categoria", id)),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let res = categoria::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn find_all_by_nome_containing_ignore_case(
        &self,
        nome: &str,
    ) -> Result<Vec<categoria::Model>, ServiceError> {
        let rows = categoria::Entity::find()
            .filter(folded_contains(categoria::Entity, categoria::Column::NomeBusca, nome))
            .order_by_asc(categoria::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }
}

/// SeaORM-backed product repository. Every read joins `tb_categorias`.
pub struct SeaOrmProdutoRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProdutoRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn with_categoria(&self, row: produto::Model) -> Result<Produto, ServiceError> {
        let cat = match row.categoria_id {
            Some(cid) => categoria::Entity::find_by_id(cid).one(&self.db).await?,
            None => None,
        };
        Ok(Produto::from_parts(row, cat))
    }
}

#[async_trait]
impl ProdutoRepository for SeaOrmProdutoRepository {
    async fn find_all(&self) -> Result<Vec<Produto>, ServiceError> {
        let rows = produto::Entity::find()
            .find_also_related(categoria::Entity)
            .order_by_asc(produto::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|(p, c)| Produto::from_parts(p, c)).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Produto>, ServiceError> {
        let found = produto::Entity::find_by_id(id)
            .find_also_related(categoria::Entity)
            .one(&self.db)
            .await?;
        Ok(found.map(|(p, c)| Produto::from_parts(p, c)))
    }

    async fn save(&self, id: Option<i64>, draft: &ProdutoDraft) -> Result<Produto, ServiceError> {
        let row = match id {
            None => draft.active_model(None).insert(&self.db).await?,
            Some(id) => draft
                .active_model(Some(id))
                .update(&self.db)
                .await
                .map_err(replace_err("produto", id))?,
        };
        self.with_categoria(row).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let res = produto::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn find_all_by_nome_containing_ignore_case(
        &self,
        nome: &str,
    ) -> Result<Vec<Produto>, ServiceError> {
        let rows = produto::Entity::find()
            .find_also_related(categoria::Entity)
            .filter(folded_contains(produto::Entity, produto::Column::NomeBusca, nome))
            .order_by_asc(produto::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|(p, c)| Produto::from_parts(p, c)).collect())
    }
}
