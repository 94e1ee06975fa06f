use crate::auth::{verify_dummy, verify_password};
use crate::error::{AppError, ErrorBody};
use crate::extractors::ApiJson;
use crate::models::{LoginRequest, LoginResponse, ESTADO_ACTIVO};
use crate::service::{UsuarioService, Validate};
use crate::state::AppState;
use axum::{extract::State, Json};
use tracing::instrument;

/// Exchange credentials for a bearer token.
///
/// Unknown login, deactivated account, and wrong password all answer the same 401.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
    ),
    tag = "auth"
)]
#[instrument(skip_all, fields(usuario = %body.usuario))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    body.validate()?;
    let Some(creds) = UsuarioService::find_credentials(&state.pool, &body.usuario).await? else {
        verify_dummy(&body.contrasena).await;
        return Err(AppError::InvalidCredentials);
    };

    let stored = creds.contrasena.as_deref().unwrap_or_default();
    let password_ok = verify_password(&body.contrasena, stored).await;
    if creds.estado != ESTADO_ACTIVO {
        tracing::warn!("login attempt on deactivated account");
        return Err(AppError::InvalidCredentials);
    }
    if !password_ok {
        tracing::warn!("wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let token = state.auth.issue(creds.pk_id_usuario, &creds.usuario)?;
    tracing::info!(id = creds.pk_id_usuario, puesto = %creds.puesto, "login ok");
    Ok(Json(LoginResponse {
        token,
        nombre: creds.nombre_completo,
        puesto: creds.puesto,
    }))
}
