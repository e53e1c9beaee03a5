//! Migrator registering the catalog tables in dependency order.
//! `tb_categorias` must exist before `tb_produtos` references it.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_categoria;
mod m20240101_000002_create_produto;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_categoria::Migration),
            Box::new(m20240101_000002_create_produto::Migration),
        ]
    }
}
