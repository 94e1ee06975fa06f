//! `/api` resource routes. Booking and the two availability lists are public;
//! everything else sits behind `require_token`.

use crate::auth::require_token;
use crate::handlers::{administrador, empleados, horarios, login, mesas, reservaciones, usuarios};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    let public = Router::new()
        .route("/login", post(login::login))
        .route("/mesasDisp", get(mesas::disponibles))
        .route("/horariosDisp", get(horarios::disponibles))
        .route("/reservaciones", post(reservaciones::create));

    let protected = Router::new()
        .route("/mesas", get(mesas::list).post(mesas::create))
        .route("/mesas/:id", get(mesas::get).put(mesas::update).delete(mesas::delete))
        .route("/horarios", get(horarios::list).post(horarios::create))
        .route(
            "/horarios/:id",
            get(horarios::get).put(horarios::update).delete(horarios::delete),
        )
        .route("/reservaciones", get(reservaciones::list))
        .route(
            "/reservaciones/:id",
            get(reservaciones::get)
                .put(reservaciones::update)
                .delete(reservaciones::cancel),
        )
        .route("/empleados", get(empleados::list).post(empleados::create))
        .route("/empleadosTabla", get(empleados::tabla))
        .route(
            "/empleados/:id",
            get(empleados::get).put(empleados::update).delete(empleados::delete),
        )
        .route("/usuarios", get(usuarios::list).post(usuarios::create))
        .route(
            "/usuarios/:id",
            get(usuarios::get).put(usuarios::update).delete(usuarios::delete),
        )
        .route("/administrador", get(administrador::list))
        .route("/administrador/:id", put(administrador::update))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

    Router::new().merge(public).merge(protected).with_state(state)
}
