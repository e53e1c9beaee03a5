use sea_orm::{entity::prelude::*, ActiveValue::NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{FieldViolation, ModelError};
use crate::produto;
use crate::search;
use crate::validation::Violations;

pub const MSG_NOME_REQUIRED: &str = "Você deve atribuir um NOME para a Categoria.";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tb_categorias")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub nome: String,
    /// Folded copy of `nome` used by name search.
    #[sea_orm(column_type = "Text")]
    #[serde(skip)]
    pub nome_busca: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Produto,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Produto => Entity::has_many(produto::Entity).into(),
        }
    }
}

impl Related<produto::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Produto.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Category as received from a client. `id` is ignored on create and
/// required on update.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoriaInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub nome: Option<String>,
}

impl CategoriaInput {
    pub fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        if let Some(nome) = v.required("nome", &self.nome, MSG_NOME_REQUIRED) {
            v.not_blank("nome", nome, MSG_NOME_REQUIRED);
        }
        v.into_vec()
    }

    pub fn validate(self) -> Result<CategoriaDraft, ModelError> {
        let violations = self.violations();
        match self.nome {
            Some(nome) if violations.is_empty() => Ok(CategoriaDraft { nome }),
            _ => Err(ModelError::Validation(violations)),
        }
    }
}

/// A category that passed validation and may be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoriaDraft {
    nome: String,
}

impl CategoriaDraft {
    pub fn nome(&self) -> &str { &self.nome }

    /// Active model for an insert (`id == None`) or a full replace.
    pub fn active_model(&self, id: Option<i64>) -> ActiveModel {
        ActiveModel {
            id: id.map_or(NotSet, Set),
            nome: Set(self.nome.clone()),
            nome_busca: Set(search::fold(&self.nome)),
        }
    }

    pub fn into_model(self, id: i64) -> Model {
        Model { id, nome_busca: search::fold(&self.nome), nome: self.nome }
    }
}
