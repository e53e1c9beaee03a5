use migration::MigratorTrait;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait};

use crate::db::{connect_with_config, DatabaseConfig};
use crate::{categoria, produto};

async fn fresh_db() -> anyhow::Result<DatabaseConnection> {
    let db = connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn produto_input(nome: &str, categoria_id: Option<i64>) -> produto::ProdutoInput {
    produto::ProdutoInput {
        id: None,
        nome: Some(nome.to_string()),
        descricao: Some("Jogo de tabuleiro moderno".to_string()),
        quantidade: Some(3),
        preco: Some(Decimal::new(12_50, 2)),
        categoria: categoria_id.map(|id| produto::CategoriaRef { id }),
    }
}

#[tokio::test]
async fn insert_assigns_ids_and_loads_relation() -> anyhow::Result<()> {
    let db = fresh_db().await?;

    let cat = categoria::CategoriaInput { id: None, nome: Some("Tabuleiro".into()) }
        .validate()?
        .active_model(None)
        .insert(&db)
        .await?;
    assert!(cat.id > 0);

    let p = produto_input("Catan Deluxe", Some(cat.id))
        .validate()?
        .active_model(None)
        .insert(&db)
        .await?;
    assert!(p.id > 0);
    assert_eq!(p.categoria_id, Some(cat.id));
    assert_eq!(p.preco, Decimal::new(12_50, 2));

    let (row, rel) = produto::Entity::find_by_id(p.id)
        .find_also_related(categoria::Entity)
        .one(&db)
        .await?
        .expect("row exists");
    assert_eq!(row.nome, "Catan Deluxe");
    assert_eq!(rel, Some(cat.clone()));

    let children = cat.find_related(produto::Entity).all(&db).await?;
    assert_eq!(children.len(), 1);
    Ok(())
}

#[tokio::test]
async fn ids_are_unique_across_inserts() -> anyhow::Result<()> {
    let db = fresh_db().await?;
    let a = produto_input("Primeiro", None).validate()?.active_model(None).insert(&db).await?;
    let b = produto_input("Segundo", None).validate()?.active_model(None).insert(&db).await?;
    assert_ne!(a.id, b.id);
    Ok(())
}

#[tokio::test]
async fn dangling_categoria_is_refused_by_store() -> anyhow::Result<()> {
    let db = fresh_db().await?;
    let res = produto_input("Orfao Produto", Some(999))
        .validate()?
        .active_model(None)
        .insert(&db)
        .await;
    assert!(res.is_err());
    assert!(produto::Entity::find().all(&db).await?.is_empty());
    Ok(())
}
