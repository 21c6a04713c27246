//! Builders wiring adapters into the HTTP state.
//!
//! A database pool selects the Diesel repositories; without one every
//! repository port is served by a shared in-memory store. The Google
//! geocoder is used when configured, otherwise the fixture geocoder.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use backend::domain::ports::{
    CampgroundRepository, CommentRepository, FixtureGeocoder, Geocoder, UserRepository,
};
use backend::domain::{AccountService, CampgroundService, CommentService};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::memory::InMemoryStore;
use backend::outbound::password::Argon2PasswordHasher;
use backend::outbound::persistence::{
    DieselCampgroundRepository, DieselCommentRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Build the HTTP state for `config`.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.geocoder {
        Some(geocoder) => {
            info!("geocoding through the Google Geocoding API");
            with_geocoder(config, geocoder.clone())
        }
        None => {
            info!("no geocoder API key configured; using the fixture geocoder");
            with_geocoder(config, Arc::new(FixtureGeocoder))
        }
    };
    web::Data::new(state)
}

fn with_geocoder<G>(config: &ServerConfig, geocoder: Arc<G>) -> HttpState
where
    G: Geocoder + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match &config.db_pool {
        Some(pool) => build_ports(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselCampgroundRepository::new(pool.clone())),
            Arc::new(DieselCommentRepository::new(pool.clone())),
            geocoder,
            clock,
        ),
        None => {
            info!("no database configured; data is kept in memory");
            let store = Arc::new(InMemoryStore::new());
            build_ports(store.clone(), store.clone(), store, geocoder, clock)
        }
    }
}

/// Assemble the use-case services over one set of driven adapters.
pub(crate) fn build_ports<U, C, M, G>(
    users: Arc<U>,
    campgrounds: Arc<C>,
    comments: Arc<M>,
    geocoder: Arc<G>,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    U: UserRepository + 'static,
    C: CampgroundRepository + 'static,
    M: CommentRepository + 'static,
    G: Geocoder + 'static,
{
    let login = Arc::new(AccountService::new(
        users,
        Arc::new(Argon2PasswordHasher::default()),
    ));
    let campground_service = Arc::new(CampgroundService::new(
        campgrounds,
        comments.clone(),
        geocoder,
        clock.clone(),
    ));
    let comment_service = Arc::new(CommentService::new(comments, clock));

    HttpState::new(HttpStatePorts {
        login,
        campgrounds: campground_service.clone(),
        campgrounds_command: campground_service,
        comments: comment_service.clone(),
        comments_command: comment_service,
    })
}
