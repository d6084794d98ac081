//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::user_handler::{
    MessageResponse, RegisterRequest, UpdateResponse, UpdateUserRequest,
};
use domain::UserRecord;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::register,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::delete_user,
    ),
    components(
        schemas(
            RegisterRequest,
            UpdateUserRequest,
            UserRecord,
            MessageResponse,
            UpdateResponse,
        )
    ),
    tags(
        (name = "Users", description = "User records in MySQL or MongoDB, chosen per request"),
    )
)]
pub struct ApiDoc;
