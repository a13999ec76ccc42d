//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::user_handler;
use crate::domain::{User, UserInput};
use crate::types::{PaginatedUsers, PaginationMeta};

/// OpenAPI documentation for the users API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User API",
        version = "0.1.0",
        description = "Minimal users CRUD REST API",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        user_handler::list_users,
        user_handler::get_user,
        user_handler::create_user,
        user_handler::replace_user,
        user_handler::delete_user,
    ),
    components(
        schemas(User, UserInput, PaginatedUsers, PaginationMeta)
    ),
    tags(
        (name = "Users", description = "CRUD operations on the users collection")
    )
)]
pub struct ApiDoc;
