//! Profile view over users whose role is `admin`.

use super::{found, IdResponse, ListResponse};
use crate::error::ErrorBody;
use crate::extractors::{ApiJson, IdPath};
use crate::models::{ActualizarAdministrador, PerfilAdministrador};
use crate::response::{changed, success_many, RowId, SuccessMany, SuccessOne};
use crate::service::{UsuarioService, Validate};
use crate::state::AppState;
use axum::extract::State;
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/api/administrador",
    responses((status = 200, body = SuccessMany<PerfilAdministrador>)),
    security(("bearer" = [])),
    tag = "administrador"
)]
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> ListResponse<PerfilAdministrador> {
    Ok(success_many(UsuarioService::list_administradores(&state.pool).await?))
}

#[utoipa::path(
    put,
    path = "/api/administrador/{id}",
    params(("id" = i32, Path, description = "pk_id_usuario of an admin")),
    request_body = ActualizarAdministrador,
    responses(
        (status = 200, body = SuccessOne<RowId>),
        (status = 400, body = ErrorBody),
        (status = 404, description = "No admin with that id", body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "administrador"
)]
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(body): ApiJson<ActualizarAdministrador>,
) -> IdResponse {
    body.validate()?;
    found(UsuarioService::update_administrador(&state.pool, id, &body).await?, "administrador", id)?;
    Ok(changed(id, "Administrador actualizado"))
}
