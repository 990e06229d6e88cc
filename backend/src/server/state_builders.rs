//! Builders wiring Diesel repositories into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use records_backend::inbound::http::state::HttpState;
use records_backend::outbound::persistence::{
    DbPool, DieselMarkRepository, DieselStudentRepository, DieselSubjectRepository,
};

/// Build handler state backed by PostgreSQL repositories sharing `pool`.
pub(crate) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    web::Data::new(HttpState::from_repositories(
        Arc::new(DieselStudentRepository::new(pool.clone())),
        Arc::new(DieselSubjectRepository::new(pool.clone())),
        Arc::new(DieselMarkRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    ))
}
