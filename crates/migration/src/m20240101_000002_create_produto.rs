//! Create `tb_produtos` table.
//! A product optionally belongs to one category; deleting a referenced
//! category is refused by the store.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Produto::Table)
                    .if_not_exists()
                    .col(big_integer(Produto::Id).auto_increment().primary_key())
                    .col(string_len(Produto::Nome, 50).not_null())
                    .col(string_len(Produto::Descricao, 100).not_null())
                    .col(integer(Produto::Quantidade).not_null())
                    // 16 digits is the widest decimal SQLite accepts
                    .col(decimal_len(Produto::Preco, 16, 2).not_null())
                    .col(big_integer_null(Produto::CategoriaId))
                    .col(text(Produto::NomeBusca).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_produto_categoria")
                            .from(Produto::Table, Produto::CategoriaId)
                            .to(Categoria::Table, Categoria::Id)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookups by category when listing or guarding deletes
        manager
            .create_index(
                Index::create()
                    .name("idx_produto_categoria")
                    .table(Produto::Table)
                    .col(Produto::CategoriaId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Produto::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Produto {
    #[sea_orm(iden = "tb_produtos")]
    Table,
    Id,
    Nome,
    Descricao,
    Quantidade,
    Preco,
    CategoriaId,
    NomeBusca,
}

#[derive(DeriveIden)]
enum Categoria {
    #[sea_orm(iden = "tb_categorias")]
    Table,
    Id,
}
