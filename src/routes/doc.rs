use utoipa::{
    Modify, OpenApi,
    openapi::{
        self, OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{AuthResponse, GoogleLoginRequest, LoginRequest, SignupRequest},
        errors::{InternalErrorBody, NotFoundBody, ValidationErrorBody},
        favorites::{FavoriteToggle, ToggleFavoriteRequest, ToggleStatus},
        orders::CreateOrderRequest,
        reviews::CreateReviewRequest,
    },
    middleware::auth::SESSION_COOKIE,
    models::{Favorite, Order, OrderStatus, Product, ProductCondition, Review, User},
    routes::{auth, favorites, health, orders, products, reviews},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::signup,
        auth::login,
        auth::me,
        auth::logout,
        auth::google,
        products::list_products,
        products::get_product,
        favorites::list_favorites,
        favorites::toggle_favorite,
        reviews::list_for_product,
        reviews::create_review,
        orders::list_orders,
        orders::create_order
    ),
    components(
        schemas(
            User,
            Product,
            ProductCondition,
            Order,
            OrderStatus,
            Favorite,
            Review,
            SignupRequest,
            LoginRequest,
            GoogleLoginRequest,
            AuthResponse,
            ToggleFavoriteRequest,
            ToggleStatus,
            FavoriteToggle,
            CreateReviewRequest,
            CreateOrderRequest,
            ValidationErrorBody,
            NotFoundBody,
            InternalErrorBody,
            health::HealthData
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Signup, login and session endpoints"),
        (name = "Products", description = "Listing endpoints"),
        (name = "Favorites", description = "Favorite endpoints"),
        (name = "Reviews", description = "Product review endpoints"),
        (name = "Orders", description = "Order endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
