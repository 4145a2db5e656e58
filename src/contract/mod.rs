//! The API contract: one table naming every operation the storefront calls.
//!
//! Each [`Operation`] pairs a method and `:param` path template with the schema
//! its body must match and the schema expected for each response status. The
//! HTTP router mounts handlers from this table, and clients use it to build
//! URLs and check payloads.

use std::fmt::{self, Display};

use axum::http::Method;
use serde_json::Value;

pub mod path;
pub mod schema;

pub use path::{PathError, build_url, to_axum_path, try_build_url};
pub use schema::{Schema, SchemaError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }

    pub fn to_http(self) -> Method {
        match self {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The schema a response with `status` carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub schema: Schema,
}

const fn respond(status: u16, schema: Schema) -> Response {
    Response { status, schema }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub input: Option<Schema>,
    pub responses: &'static [Response],
}

impl Operation {
    pub fn response_schema(&self, status: u16) -> Option<Schema> {
        self.responses
            .iter()
            .find(|response| response.status == status)
            .map(|response| response.schema)
    }

    pub fn check_input(&self, body: &Value) -> Result<(), SchemaError> {
        match self.input {
            Some(schema) => schema.check(body),
            None => Err(SchemaError::NoInput {
                operation: self.name,
            }),
        }
    }

    pub fn check_response(&self, status: u16, body: &Value) -> Result<(), SchemaError> {
        match self.response_schema(status) {
            Some(schema) => schema.check(body),
            None => Err(SchemaError::UndeclaredStatus {
                operation: self.name,
                status,
            }),
        }
    }

    /// Builds this operation's URL, failing if a placeholder has no value.
    pub fn url<K, V>(&self, params: &[(K, V)]) -> Result<String, PathError>
    where
        K: AsRef<str>,
        V: Display,
    {
        try_build_url(self.path, params)
    }

    /// The path template in axum's `{param}` capture syntax.
    pub fn axum_path(&self) -> String {
        to_axum_path(self.path)
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.method, self.path)
    }
}

pub mod auth {
    use super::{HttpMethod, Operation, Schema, respond};

    pub const SIGNUP: Operation = Operation {
        name: "auth.signup",
        method: HttpMethod::Post,
        path: "/api/auth/signup",
        input: Some(Schema::SignupInput),
        responses: &[
            respond(201, Schema::User),
            respond(400, Schema::ValidationError),
        ],
    };

    pub const LOGIN: Operation = Operation {
        name: "auth.login",
        method: HttpMethod::Post,
        path: "/api/auth/login",
        input: Some(Schema::LoginInput),
        responses: &[
            respond(200, Schema::AuthResponse),
            respond(400, Schema::ValidationError),
            respond(401, Schema::ValidationError),
        ],
    };

    pub const ME: Operation = Operation {
        name: "auth.me",
        method: HttpMethod::Get,
        path: "/api/auth/me",
        input: None,
        responses: &[
            respond(200, Schema::User),
            respond(401, Schema::ValidationError),
        ],
    };

    pub const LOGOUT: Operation = Operation {
        name: "auth.logout",
        method: HttpMethod::Post,
        path: "/api/auth/logout",
        input: None,
        responses: &[respond(204, Schema::Empty)],
    };

    pub const GOOGLE: Operation = Operation {
        name: "auth.google",
        method: HttpMethod::Post,
        path: "/api/auth/google",
        input: Some(Schema::GoogleLoginInput),
        responses: &[
            respond(200, Schema::AuthResponse),
            respond(400, Schema::ValidationError),
            respond(401, Schema::ValidationError),
        ],
    };
}

pub mod products {
    use super::{HttpMethod, Operation, Schema, respond};

    pub const LIST: Operation = Operation {
        name: "products.list",
        method: HttpMethod::Get,
        path: "/api/products",
        input: None,
        responses: &[respond(200, Schema::ProductList)],
    };

    pub const GET: Operation = Operation {
        name: "products.get",
        method: HttpMethod::Get,
        path: "/api/products/:id",
        input: None,
        responses: &[
            respond(200, Schema::Product),
            respond(404, Schema::NotFound),
        ],
    };
}

pub mod favorites {
    use super::{HttpMethod, Operation, Schema, respond};

    pub const LIST: Operation = Operation {
        name: "favorites.list",
        method: HttpMethod::Get,
        path: "/api/favorites",
        input: None,
        responses: &[
            respond(200, Schema::FavoriteList),
            respond(401, Schema::ValidationError),
        ],
    };

    pub const TOGGLE: Operation = Operation {
        name: "favorites.toggle",
        method: HttpMethod::Post,
        path: "/api/favorites",
        input: Some(Schema::ToggleFavoriteInput),
        responses: &[
            respond(200, Schema::FavoriteToggle),
            respond(400, Schema::ValidationError),
            respond(401, Schema::ValidationError),
            respond(404, Schema::NotFound),
        ],
    };
}

pub mod reviews {
    use super::{HttpMethod, Operation, Schema, respond};

    pub const LIST_FOR_PRODUCT: Operation = Operation {
        name: "reviews.listForProduct",
        method: HttpMethod::Get,
        path: "/api/products/:id/reviews",
        input: None,
        responses: &[
            respond(200, Schema::ReviewList),
            respond(404, Schema::NotFound),
        ],
    };

    pub const CREATE: Operation = Operation {
        name: "reviews.create",
        method: HttpMethod::Post,
        path: "/api/products/:id/reviews",
        input: Some(Schema::CreateReviewInput),
        responses: &[
            respond(201, Schema::Review),
            respond(400, Schema::ValidationError),
            respond(401, Schema::ValidationError),
            respond(404, Schema::NotFound),
        ],
    };
}

pub mod orders {
    use super::{HttpMethod, Operation, Schema, respond};

    pub const LIST: Operation = Operation {
        name: "orders.list",
        method: HttpMethod::Get,
        path: "/api/orders",
        input: None,
        responses: &[
            respond(200, Schema::OrderList),
            respond(401, Schema::ValidationError),
        ],
    };

    pub const CREATE: Operation = Operation {
        name: "orders.create",
        method: HttpMethod::Post,
        path: "/api/orders",
        input: Some(Schema::CreateOrderInput),
        responses: &[
            respond(201, Schema::Order),
            respond(400, Schema::ValidationError),
            respond(401, Schema::ValidationError),
        ],
    };
}

pub static OPERATIONS: [Operation; 13] = [
    auth::SIGNUP,
    auth::LOGIN,
    auth::ME,
    auth::LOGOUT,
    auth::GOOGLE,
    products::LIST,
    products::GET,
    favorites::LIST,
    favorites::TOGGLE,
    reviews::LIST_FOR_PRODUCT,
    reviews::CREATE,
    orders::LIST,
    orders::CREATE,
];

pub fn operations() -> &'static [Operation] {
    &OPERATIONS
}

pub fn operation(name: &str) -> Option<&'static Operation> {
    OPERATIONS.iter().find(|op| op.name == name)
}
