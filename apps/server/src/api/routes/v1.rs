//! `/v1` routes.
//!
//! Registration of IT staff and both logins are public. Everything else runs
//! behind [`auth_middleware`]; role checks happen in the services.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::api::handlers::{patients, records, staff};
use crate::auth::auth_middleware;
use crate::state::AppState;

pub fn v1_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/user/it/register", post(staff::register_it))
        .route("/user/it/login", post(staff::login_it))
        .route("/user/nurse/login", post(staff::login_nurse));

    let protected = Router::new()
        .route("/user", get(staff::search_users))
        .route("/user/nurse/register", post(staff::register_nurse))
        .route(
            "/user/nurse/:user_id",
            put(staff::update_nurse).delete(staff::delete_nurse),
        )
        .route("/user/nurse/:user_id/access", post(staff::grant_access))
        .route(
            "/medical/patient",
            post(patients::register_patient).get(patients::search_patients),
        )
        .route(
            "/medical/record",
            post(records::create_record).get(records::search_records),
        )
        // route_layer so unknown paths stay 404 instead of 401
        .route_layer(from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}
