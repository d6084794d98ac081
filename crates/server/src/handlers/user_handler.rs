//! User handlers.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{
    parse_date, DomainError, EditUser, NewUser, StoreKind, UserRecord, FIELD_EDIT_IMAGE,
    FIELD_IMAGE,
};

use crate::extractors::{resolve_store, FileField, Selector, SelectorQuery, UserForm};
use crate::state::AppState;
use crate::uploads::UploadedFile;

/// Create request. Accepts JSON, urlencoded or multipart with an `image` file.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(required, length(min = 1))]
    #[schema(example = "Hola mundo")]
    pub text_field: Option<String>,
    #[validate(required, length(min = 1))]
    #[schema(example = "secreto")]
    pub password: Option<String>,
    /// `YYYY-MM-DD`
    #[schema(example = "2024-05-01")]
    pub date_field: Option<String>,
    pub opinion: Option<String>,
    /// `mysql` or `mongodb`
    #[schema(example = "mysql")]
    pub database: Option<String>,
}

impl FileField for RegisterRequest {
    const FILE_FIELD: &'static str = FIELD_IMAGE;
}

/// Update request. Accepts JSON, urlencoded or multipart with an `edit_image` file.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub edit_text_field: Option<String>,
    pub edit_password: Option<String>,
    /// `YYYY-MM-DD`; blank counts as absent
    pub edit_date_field: Option<String>,
    pub edit_opinion: Option<String>,
    /// `mysql` or `mongodb`
    #[schema(example = "mongodb")]
    pub database: Option<String>,
}

impl FileField for UpdateUserRequest {
    const FILE_FIELD: &'static str = FIELD_EDIT_IMAGE;
}

/// Acknowledgement body
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Update acknowledgement; errors on the update route also carry `success`
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateResponse {
    pub success: bool,
    pub message: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/get-users", get(list_users))
        .route("/get-user/:id", get(get_user))
        .route("/update-user/:id", put(update_user))
        .route("/delete-user/:id", delete(delete_user))
}

fn optional_date(raw: Option<&str>) -> AppResult<Option<chrono::NaiveDate>> {
    Ok(raw.map(parse_date).transpose()?.flatten())
}

async fn store_upload(state: &AppState, file: Option<UploadedFile>) -> AppResult<Option<String>> {
    match file {
        Some(file) => Ok(Some(state.uploads.persist(file).await?)),
        None => Ok(None),
    }
}

/// Create a user in the selected store
#[utoipa::path(
    post,
    path = "/register",
    tag = "Users",
    request_body(
        content = RegisterRequest,
        description = "Form fields; multipart bodies may add an `image` file",
        content_type = "multipart/form-data"
    ),
    responses(
        (status = 200, description = "Record stored", body = MessageResponse),
        (status = 400, description = "Missing fields, selector or invalid date"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    UserForm { fields, file }: UserForm<RegisterRequest>,
) -> AppResult<Json<MessageResponse>> {
    fields.validate().map_err(|_| DomainError::required_fields())?;
    let store = resolve_store(fields.database.as_deref())?;
    let date_field = optional_date(fields.date_field.as_deref())?;
    let image = store_upload(&state, file).await?;

    let user = NewUser {
        text_field: fields.text_field.unwrap_or_default(),
        password: fields.password.unwrap_or_default(),
        image,
        date_field,
        opinion: fields.opinion,
    };

    let record = state.users.create_user(store, user).await?;
    info!(%store, id = %record.id, "User registered");

    Ok(Json(MessageResponse::new(format!("Registro guardado en {}", store))))
}

/// List every user of the selected store
#[utoipa::path(
    get,
    path = "/get-users",
    tag = "Users",
    params(SelectorQuery),
    responses(
        (status = 200, description = "All records, in store order", body = Vec<UserRecord>),
        (status = 400, description = "Missing or unknown selector"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Selector(store): Selector,
) -> AppResult<Json<Vec<UserRecord>>> {
    let users = state.users.list_users(store).await?;
    Ok(Json(users))
}

/// Get one user
#[utoipa::path(
    get,
    path = "/get-user/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "Integer id (MySQL) or ObjectId hex (MongoDB)"),
        SelectorQuery
    ),
    responses(
        (status = 200, description = "User record", body = UserRecord),
        (status = 400, description = "Missing or unknown selector"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Selector(store): Selector,
) -> AppResult<Json<UserRecord>> {
    let user = state.users.get_user(store, &id).await?;
    Ok(Json(user))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/update-user/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "Integer id (MySQL) or ObjectId hex (MongoDB)")
    ),
    request_body(
        content = UpdateUserRequest,
        description = "Form fields; multipart bodies may add an `edit_image` file",
        content_type = "multipart/form-data"
    ),
    responses(
        (status = 200, description = "User updated", body = UpdateResponse),
        (status = 400, description = "Missing or unknown selector, invalid date"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<UserForm<UpdateUserRequest>, AppError>,
) -> Response {
    let result = match form {
        Ok(form) => apply_update(&state, &id, form).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(store) => Json(UpdateResponse {
            success: true,
            message: format!("Usuario actualizado en {}", store),
        })
        .into_response(),
        Err(e) => e.response_with(Some(false)),
    }
}

async fn apply_update(
    state: &AppState,
    id: &str,
    UserForm { fields, file }: UserForm<UpdateUserRequest>,
) -> AppResult<StoreKind> {
    let store = resolve_store(fields.database.as_deref())?;
    let date_field = optional_date(fields.edit_date_field.as_deref())?;
    let image = store_upload(state, file).await?;

    let edit = EditUser {
        text_field: fields.edit_text_field,
        password: fields.edit_password,
        image,
        date_field,
        opinion: fields.edit_opinion,
    };

    let record = state.users.update_user(store, id, edit).await?;
    info!(%store, id = %record.id, "User updated");

    Ok(store)
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/delete-user/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "Integer id (MySQL) or ObjectId hex (MongoDB)"),
        SelectorQuery
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Missing or unknown selector"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Selector(store): Selector,
) -> AppResult<Json<MessageResponse>> {
    state.users.delete_user(store, &id).await?;
    info!(%store, %id, "User deleted");

    Ok(Json(MessageResponse::new(format!("Usuario eliminado de {}", store))))
}
