use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::produto::{Produto, ProdutoInput};
use tracing::info;

use crate::errors::JsonApiError;
use crate::openapi::{ErrorDoc, ProdutoDoc, ProdutoInputDoc};
use crate::state::ServerState;

#[utoipa::path(
    get,
    path = "/produtos",
    tag = "produtos",
    responses((status = 200, description = "All products", body = [ProdutoDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Produto>>, JsonApiError> {
    let list = state.produtos.list().await?;
    info!(count = list.len(), "list produtos");
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/produtos/{id}",
    tag = "produtos",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProdutoDoc),
        (status = 404, description = "No product with this id", body = ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Produto>, JsonApiError> {
    Ok(Json(state.produtos.get_by_id(id).await?))
}

#[utoipa::path(
    get,
    path = "/produtos/nome/{nome}",
    tag = "produtos",
    params(("nome" = String, Path, description = "Case-insensitive fragment of the name")),
    responses((status = 200, description = "Matching products", body = [ProdutoDoc]))
)]
pub async fn search(
    State(state): State<ServerState>,
    Path(nome): Path<String>,
) -> Result<Json<Vec<Produto>>, JsonApiError> {
    let list = state.produtos.search_by_nome(&nome).await?;
    info!(%nome, count = list.len(), "search produtos");
    Ok(Json(list))
}

#[utoipa::path(
    post,
    path = "/produtos",
    tag = "produtos",
    request_body = ProdutoInputDoc,
    responses(
        (status = 201, description = "Product created", body = ProdutoDoc),
        (status = 400, description = "Invalid product", body = ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<ProdutoInput>,
) -> Result<(StatusCode, Json<Produto>), JsonApiError> {
    let created = state.produtos.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/produtos",
    tag = "produtos",
    request_body = ProdutoInputDoc,
    responses(
        (status = 200, description = "Product replaced", body = ProdutoDoc),
        (status = 400, description = "Invalid product or missing id", body = ErrorDoc),
        (status = 404, description = "No product with this id", body = ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Json(input): Json<ProdutoInput>,
) -> Result<Json<Produto>, JsonApiError> {
    Ok(Json(state.produtos.update(input).await?))
}

#[utoipa::path(
    delete,
    path = "/produtos/{id}",
    tag = "produtos",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "No product with this id", body = ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, JsonApiError> {
    state.produtos.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
