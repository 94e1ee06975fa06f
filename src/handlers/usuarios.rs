use super::{found, some, IdResponse, ListResponse, OneResponse};
use crate::error::ErrorBody;
use crate::extractors::{ApiJson, IdPath};
use crate::models::{ActualizarUsuario, NuevoUsuario, Usuario};
use crate::response::{changed, created, success_many, success_one_ok, RowId, SuccessMany, SuccessOne};
use crate::service::{UsuarioService, Validate};
use crate::state::AppState;
use axum::extract::State;
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/api/usuarios",
    responses((status = 200, description = "Users with role name; passwords never included", body = SuccessMany<Usuario>)),
    security(("bearer" = [])),
    tag = "usuarios"
)]
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> ListResponse<Usuario> {
    Ok(success_many(UsuarioService::list(&state.pool).await?))
}

#[utoipa::path(
    get,
    path = "/api/usuarios/{id}",
    params(("id" = i32, Path, description = "pk_id_usuario")),
    responses((status = 200, body = SuccessOne<Usuario>), (status = 404, body = ErrorBody)),
    security(("bearer" = [])),
    tag = "usuarios"
)]
#[instrument(skip(state))]
pub async fn get(State(state): State<AppState>, IdPath(id): IdPath) -> OneResponse<Usuario> {
    let usuario = some(UsuarioService::get(&state.pool, id).await?, "usuario", id)?;
    Ok(success_one_ok(usuario))
}

#[utoipa::path(
    post,
    path = "/api/usuarios",
    request_body = NuevoUsuario,
    responses(
        (status = 201, body = SuccessOne<RowId>),
        (status = 400, description = "Invalid body or unknown role", body = ErrorBody),
        (status = 409, description = "Login name taken", body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "usuarios"
)]
#[instrument(skip_all, fields(usuario = %body.usuario))]
pub async fn create(State(state): State<AppState>, ApiJson(body): ApiJson<NuevoUsuario>) -> IdResponse {
    body.validate()?;
    let id = UsuarioService::create(&state.pool, &body).await?;
    Ok(created(id, "Usuario creado"))
}

#[utoipa::path(
    put,
    path = "/api/usuarios/{id}",
    params(("id" = i32, Path, description = "pk_id_usuario")),
    request_body = ActualizarUsuario,
    responses(
        (status = 200, body = SuccessOne<RowId>),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "usuarios"
)]
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(body): ApiJson<ActualizarUsuario>,
) -> IdResponse {
    body.validate()?;
    found(UsuarioService::update(&state.pool, id, &body).await?, "usuario", id)?;
    Ok(changed(id, "Usuario actualizado"))
}

#[utoipa::path(
    delete,
    path = "/api/usuarios/{id}",
    params(("id" = i32, Path, description = "pk_id_usuario")),
    responses((status = 200, description = "Deactivated (estado = 0)", body = SuccessOne<RowId>), (status = 404, body = ErrorBody)),
    security(("bearer" = [])),
    tag = "usuarios"
)]
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> IdResponse {
    found(UsuarioService::deactivate(&state.pool, id).await?, "usuario", id)?;
    Ok(changed(id, "Usuario desactivado"))
}
