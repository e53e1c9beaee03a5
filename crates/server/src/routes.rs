pub mod categorias;
pub mod produtos;

use axum::{
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: catalog resources, health and API docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let produtos = Router::new()
        .route(
            "/produtos",
            get(produtos::list).post(produtos::create).put(produtos::update),
        )
        .route("/produtos/:id", get(produtos::get).delete(produtos::delete))
        .route("/produtos/nome/:nome", get(produtos::search));

    let categorias = Router::new()
        .route(
            "/categorias",
            get(categorias::list).post(categorias::create).put(categorias::update),
        )
        .route("/categorias/:id", get(categorias::get).delete(categorias::delete))
        .route("/categorias/nome/:nome", get(categorias::search));

    Router::new()
        .route("/health", get(health))
        .merge(produtos)
        .merge(categorias)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        build_router(ServerState::in_memory(), CorsLayer::very_permissive())
    }

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(b) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        call(app, Method::GET, uri, None).await
    }

    async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
        call(app, Method::DELETE, uri, None).await
    }

    async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        call(app, Method::POST, uri, Some(body)).await
    }

    async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        call(app, Method::PUT, uri, Some(body)).await
    }

    fn controller(categoria: Option<i64>) -> Value {
        let mut v = json!({
            "nome": "Controle Sem Fio",
            "descricao": "Controle bluetooth para console",
            "quantidade": 10,
            "preco": 199.9
        });
        if let Some(id) = categoria {
            v["categoria"] = json!({ "id": id });
        }
        v
    }

    fn fields(body: &Value) -> Vec<String> {
        body["violations"]
            .as_array()
            .into_iter()
            .flatten()
            .map(|v| v["field"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[tokio::test]
    async fn health_ok() {
        let (status, body) = get(&app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn produto_lifecycle() {
        let app = app();
        let (status, cat) = post(&app, "/categorias", json!({"nome": "Acessórios"})).await;
        assert_eq!(status, StatusCode::CREATED);
        let cat_id = cat["id"].as_i64().unwrap();

        let (status, created) = post(&app, "/produtos", controller(Some(cat_id))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["categoria"]["nome"], "Acessórios");
        assert!(created["preco"].is_number());
        let id = created["id"].as_i64().unwrap();

        let (status, found) = get(&app, &format!("/produtos/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found, created);

        let (status, hits) = get(&app, "/produtos/nome/SEM%20FIO").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(hits.as_array().map(Vec::len), Some(1));

        let mut replacement = controller(None);
        replacement["id"] = json!(id);
        replacement["quantidade"] = json!(3);
        let (status, updated) = put(&app, "/produtos", replacement).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["quantidade"], 3);
        assert!(updated["categoria"].is_null());

        let (status, _) = delete(&app, &format!("/produtos/{id}")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = get(&app, &format!("/produtos/{id}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, all) = get(&app, "/produtos").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all, json!([]));
    }

    #[tokio::test]
    async fn invalid_produto_reports_every_field() {
        let app = app();
        let (status, body) = post(&app, "/produtos", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation Error");
        assert_eq!(fields(&body), ["nome", "descricao", "quantidade", "preco"]);

        let (_, all) = get(&app, "/produtos").await;
        assert_eq!(all, json!([]));
    }

    #[tokio::test]
    async fn preco_beyond_column_range_is_bad_request() {
        let app = app();
        let mut body = controller(None);
        body["preco"] = json!(1e17);
        let (status, err) = post(&app, "/produtos", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(fields(&err), ["preco"]);
        assert_eq!(get(&app, "/produtos").await.1, json!([]));
    }

    #[tokio::test]
    async fn long_categoria_nome_is_accepted() {
        let nome = "c".repeat(300);
        let (status, created) = post(&app(), "/categorias", json!({ "nome": nome })).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["nome"].as_str().map(str::len), Some(300));
    }

    #[tokio::test]
    async fn update_without_id_is_bad_request() {
        let (status, body) = put(&app(), "/produtos", controller(None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(fields(&body), ["id"]);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let app = app();
        for uri in ["/produtos/42", "/categorias/42"] {
            let (status, body) = get(&app, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["error"], "Not Found");
            let (status, _) = delete(&app, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
        }
        let mut missing = controller(None);
        missing["id"] = json!(42);
        let (status, _) = put(&app, "/produtos", missing).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn dangling_categoria_is_rejected() {
        let (status, body) = post(&app(), "/produtos", controller(Some(7))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(fields(&body), ["categoria"]);
    }

    #[tokio::test]
    async fn referenced_categoria_cannot_be_deleted() {
        let app = app();
        let (_, cat) = post(&app, "/categorias", json!({"nome": "Consoles"})).await;
        let cat_id = cat["id"].as_i64().unwrap();
        let (status, _) = post(&app, "/produtos", controller(Some(cat_id))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = delete(&app, &format!("/categorias/{cat_id}")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Conflict");
    }

    #[tokio::test]
    async fn categoria_search_and_update() {
        let app = app();
        for nome in ["Estratégia", "Esportes", "RPG"] {
            let (status, _) = post(&app, "/categorias", json!({ "nome": nome })).await;
            assert_eq!(status, StatusCode::CREATED);
        }
        let (_, hits) = get(&app, "/categorias/nome/es").await;
        let nomes: Vec<_> = hits.as_array().unwrap().iter().map(|c| c["nome"].clone()).collect();
        assert_eq!(nomes, [json!("Estratégia"), json!("Esportes")]);

        let (_, hits) = get(&app, "/categorias/nome/ESTRAT%C3%89GIA").await;
        assert_eq!(hits.as_array().map(Vec::len), Some(1));

        let renamed = json!({"id": 3, "nome": "Role Playing"});
        let (status, updated) = put(&app, "/categorias", renamed).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated, json!({"id": 3, "nome": "Role Playing"}));

        let (status, body) = put(&app, "/categorias", json!({"id": 3, "nome": "  "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(fields(&body), ["nome"]);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, doc) = get(&app(), "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"]["/produtos"].is_object());
        assert!(doc["paths"]["/categorias/nome/{nome}"].is_object());
    }
}
