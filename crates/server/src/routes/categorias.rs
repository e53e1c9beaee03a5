use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::categoria::{self, CategoriaInput};
use tracing::info;

use crate::errors::JsonApiError;
use crate::openapi::{CategoriaDoc, CategoriaInputDoc, ErrorDoc};
use crate::state::ServerState;

#[utoipa::path(
    get,
    path = "/categorias",
    tag = "categorias",
    responses((status = 200, description = "All categories", body = [CategoriaDoc]))
)]
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<categoria::Model>>, JsonApiError> {
    let list = state.categorias.list().await?;
    info!(count = list.len(), "list categorias");
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/categorias/{id}",
    tag = "categorias",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found", body = CategoriaDoc),
        (status = 404, description = "No category with this id", body = ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<categoria::Model>, JsonApiError> {
    Ok(Json(state.categorias.get_by_id(id).await?))
}

#[utoipa::path(
    get,
    path = "/categorias/nome/{nome}",
    tag = "categorias",
    params(("nome" = String, Path, description = "Case-insensitive fragment of the name")),
    responses((status = 200, description = "Matching categories", body = [CategoriaDoc]))
)]
pub async fn search(
    State(state): State<ServerState>,
    Path(nome): Path<String>,
) -> Result<Json<Vec<categoria::Model>>, JsonApiError> {
    let list = state.categorias.search_by_nome(&nome).await?;
    info!(%nome, count = list.len(), "search categorias");
    Ok(Json(list))
}

#[utoipa::path(
    post,
    path = "/categorias",
    tag = "categorias",
    request_body = CategoriaInputDoc,
    responses(
        (status = 201, description = "Category created", body = CategoriaDoc),
        (status = 400, description = "Invalid category", body = ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CategoriaInput>,
) -> Result<(StatusCode, Json<categoria::Model>), JsonApiError> {
    let created = state.categorias.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/categorias",
    tag = "categorias",
    request_body = CategoriaInputDoc,
    responses(
        (status = 200, description = "Category replaced", body = CategoriaDoc),
        (status = 400, description = "Invalid category or missing id", body = ErrorDoc),
        (status = 404, description = "No category with this id", body = ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Json(input): Json<CategoriaInput>,
) -> Result<Json<categoria::Model>, JsonApiError> {
    Ok(Json(state.categorias.update(input).await?))
}

#[utoipa::path(
    delete,
    path = "/categorias/{id}",
    tag = "categorias",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "No category with this id", body = ErrorDoc),
        (status = 409, description = "Category still referenced by products", body = ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, JsonApiError> {
    state.categorias.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
