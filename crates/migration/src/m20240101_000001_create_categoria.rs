//! Create `tb_categorias` table.
//!
//! Referenced by `tb_produtos.categoria_id`. `nome_busca` holds the
//! lowercased name that search matches against.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categoria::Table)
                    .if_not_exists()
                    .col(big_integer(Categoria::Id).auto_increment().primary_key())
                    .col(text(Categoria::Nome).not_null())
                    .col(text(Categoria::NomeBusca).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Categoria::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Categoria {
    #[sea_orm(iden = "tb_categorias")]
    Table,
    Id,
    Nome,
    NomeBusca,
}
