use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorResponse { pub message: String }

#[derive(ToSchema)]
pub struct TokenResponse { pub token: String }

#[derive(ToSchema)]
pub struct RegisterRequest { pub email: String, pub password: String, pub name: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ProductDoc {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image_url: Option<String>,
}

/// Multipart (or JSON) product fields; `price` may be a number or a numeric string.
#[derive(ToSchema)]
pub struct ProductFormDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

#[derive(ToSchema)]
pub struct ServiceDoc {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub duration: i64,
}

#[derive(ToSchema)]
pub struct ServiceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub duration: Option<i64>,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::me,
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete,
        crate::routes::services::list,
        crate::routes::services::get,
        crate::routes::services::create,
        crate::routes::services::update,
        crate::routes::services::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            TokenResponse,
            RegisterRequest,
            LoginRequest,
            ProductDoc,
            ProductFormDoc,
            ServiceDoc,
            ServiceRequest,
            crate::routes::auth::MeOutput,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "products"),
        (name = "services")
    )
)]
pub struct ApiDoc;
