use sea_orm::{entity::prelude::*, ActiveValue::NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::categoria;
use crate::errors::{FieldViolation, ModelError};
use crate::search;
use crate::validation::Violations;

pub const NOME_MIN: usize = 5;
pub const NOME_MAX: usize = 50;
pub const DESCRICAO_MIN: usize = 5;
pub const DESCRICAO_MAX: usize = 100;

/// `preco` is stored as `decimal(16, 2)`: 14 integer digits, 2 fractional.
pub const PRECO_PRECISION: u32 = 16;
pub const PRECO_SCALE: u32 = 2;

/// Largest price the `preco` column holds.
pub fn preco_max() -> Decimal {
    Decimal::new(9_999_999_999_999_999, PRECO_SCALE)
}

pub const MSG_NOME_REQUIRED: &str = "Você deve atribuir um NOME para o Produto.";
pub const MSG_NOME_SIZE: &str =
    "O NOME do Produto deve conter no mínimo 5 e no máximo 50 caracteres.";
pub const MSG_DESCRICAO_REQUIRED: &str = "Você deve atribuir uma DESCRIÇÃO para o Produto.";
pub const MSG_DESCRICAO_SIZE: &str =
    "A DESCRIÇÃO do Produto deve conter no mínimo 5 e no máximo 100 caracteres.";
pub const MSG_QUANTIDADE_REQUIRED: &str = "Você deve atribuir a QUANTIDADE do Produto.";
pub const MSG_PRECO_REQUIRED: &str = "Você deve atribuir o PREÇO do Produto.";
pub const MSG_PRECO_POSITIVE: &str = "O preço deve ser maior do que zero!";
pub const MSG_PRECO_MAX: &str = "O PREÇO do Produto deve ser no máximo 99999999999999.99.";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tb_produtos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nome: String,
    pub descricao: String,
    pub quantidade: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub preco: Decimal,
    pub categoria_id: Option<i64>,
    /// Folded copy of `nome` used by name search.
    #[sea_orm(column_type = "Text")]
    #[serde(skip)]
    pub nome_busca: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Categoria,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Categoria => Entity::belongs_to(categoria::Entity)
                .from(Column::CategoriaId)
                .to(categoria::Column::Id)
                .into(),
        }
    }
}

impl Related<categoria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categoria.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Product as returned to clients, with its category resolved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Produto {
    pub id: i64,
    pub nome: String,
    pub descricao: String,
    pub quantidade: i32,
    pub preco: Decimal,
    pub categoria: Option<categoria::Model>,
}

impl Produto {
    /// Joins a row with the category it points at. A row whose category was
    /// not loaded comes back with `categoria: None`.
    pub fn from_parts(row: Model, categoria: Option<categoria::Model>) -> Self {
        Self {
            id: row.id,
            nome: row.nome,
            descricao: row.descricao,
            quantidade: row.quantidade,
            preco: row.preco,
            categoria,
        }
    }
}

/// Reference to an existing category inside a product payload. Only `id`
/// is read; anything else the client echoes back is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoriaRef {
    pub id: i64,
}

/// Product as received from a client.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProdutoInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub quantidade: Option<i32>,
    #[serde(default)]
    pub preco: Option<Decimal>,
    #[serde(default)]
    pub categoria: Option<CategoriaRef>,
}

impl ProdutoInput {
    pub fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        if let Some(nome) = v.required("nome", &self.nome, MSG_NOME_REQUIRED) {
            v.not_blank("nome", nome, MSG_NOME_REQUIRED);
            v.length_between("nome", nome, NOME_MIN, NOME_MAX, MSG_NOME_SIZE);
        }
        if let Some(descricao) = v.required("descricao", &self.descricao, MSG_DESCRICAO_REQUIRED) {
            v.not_blank("descricao", descricao, MSG_DESCRICAO_REQUIRED);
            v.length_between(
                "descricao",
                descricao,
                DESCRICAO_MIN,
                DESCRICAO_MAX,
                MSG_DESCRICAO_SIZE,
            );
        }
        v.required("quantidade", &self.quantidade, MSG_QUANTIDADE_REQUIRED);
        if let Some(preco) = v.required("preco", &self.preco, MSG_PRECO_REQUIRED) {
            v.positive("preco", preco, MSG_PRECO_POSITIVE);
            v.at_most("preco", preco, preco_max(), MSG_PRECO_MAX);
        }
        v.into_vec()
    }

    pub fn validate(self) -> Result<ProdutoDraft, ModelError> {
        let violations = self.violations();
        match (self.nome, self.descricao, self.quantidade, self.preco) {
            (Some(nome), Some(descricao), Some(quantidade), Some(preco))
                if violations.is_empty() =>
            {
                Ok(ProdutoDraft {
                    nome,
                    descricao,
                    quantidade,
                    preco,
                    categoria_id: self.categoria.map(|c| c.id),
                })
            }
            _ => Err(ModelError::Validation(violations)),
        }
    }
}

/// A product that passed validation and may be written.
#[derive(Clone, Debug, PartialEq)]
pub struct ProdutoDraft {
    nome: String,
    descricao: String,
    quantidade: i32,
    preco: Decimal,
    categoria_id: Option<i64>,
}

impl ProdutoDraft {
    pub fn nome(&self) -> &str { &self.nome }
    pub fn preco(&self) -> Decimal { self.preco }
    pub fn categoria_id(&self) -> Option<i64> { self.categoria_id }

    /// Active model for an insert (`id == None`) or a full replace.
    pub fn active_model(&self, id: Option<i64>) -> ActiveModel {
        ActiveModel {
            id: id.map_or(NotSet, Set),
            nome: Set(self.nome.clone()),
            descricao: Set(self.descricao.clone()),
            quantidade: Set(self.quantidade),
            preco: Set(self.preco),
            categoria_id: Set(self.categoria_id),
            nome_busca: Set(search::fold(&self.nome)),
        }
    }

    pub fn into_model(self, id: i64) -> Model {
        Model {
            id,
            nome_busca: search::fold(&self.nome),
            nome: self.nome,
            descricao: self.descricao,
            quantidade: self.quantidade,
            preco: self.preco,
            categoria_id: self.categoria_id,
        }
    }
}
