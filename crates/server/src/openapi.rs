use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CategoriaDoc {
    pub id: i64,
    pub nome: String,
}

#[derive(ToSchema)]
pub struct CategoriaInputDoc {
    /// Required on update, ignored on create.
    pub id: Option<i64>,
    pub nome: String,
}

#[derive(ToSchema)]
pub struct CategoriaRefDoc { pub id: i64 }

#[derive(ToSchema)]
pub struct ProdutoDoc {
    pub id: i64,
    pub nome: String,
    pub descricao: String,
    pub quantidade: i32,
    /// Two decimal places.
    pub preco: f64,
    pub categoria: Option<CategoriaDoc>,
}

#[derive(ToSchema)]
pub struct ProdutoInputDoc {
    /// Required on update, ignored on create.
    pub id: Option<i64>,
    /// 5 to 50 characters.
    pub nome: String,
    /// 5 to 100 characters.
    pub descricao: String,
    pub quantidade: i32,
    /// Strictly positive.
    pub preco: f64,
    pub categoria: Option<CategoriaRefDoc>,
}

#[derive(ToSchema)]
pub struct FieldViolationDoc {
    pub field: String,
    pub message: String,
}

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub error: String,
    pub message: Option<String>,
    pub violations: Option<Vec<FieldViolationDoc>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::produtos::list,
        crate::routes::produtos::get,
        crate::routes::produtos::search,
        crate::routes::produtos::create,
        crate::routes::produtos::update,
        crate::routes::produtos::delete,
        crate::routes::categorias::list,
        crate::routes::categorias::get,
        crate::routes::categorias::search,
        crate::routes::categorias::create,
        crate::routes::categorias::update,
        crate::routes::categorias::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CategoriaDoc,
            CategoriaInputDoc,
            CategoriaRefDoc,
            ProdutoDoc,
            ProdutoInputDoc,
            FieldViolationDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "produtos"),
        (name = "categorias")
    )
)]
pub struct ApiDoc;
