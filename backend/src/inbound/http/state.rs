//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CampgroundsCommand, CampgroundsQuery, CommentsCommand, CommentsQuery, LoginService,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub campgrounds: Arc<dyn CampgroundsQuery>,
    pub campgrounds_command: Arc<dyn CampgroundsCommand>,
    pub comments: Arc<dyn CommentsQuery>,
    pub comments_command: Arc<dyn CommentsCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub campgrounds: Arc<dyn CampgroundsQuery>,
    pub campgrounds_command: Arc<dyn CampgroundsCommand>,
    pub comments: Arc<dyn CommentsQuery>,
    pub comments_command: Arc<dyn CommentsCommand>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            campgrounds,
            campgrounds_command,
            comments,
            comments_command,
        } = ports;
        Self {
            login,
            campgrounds,
            campgrounds_command,
            comments,
            comments_command,
        }
    }
}

impl HttpState {
    /// Construct state from the bundled ports.
    pub fn new(ports: HttpStatePorts) -> Self {
        ports.into()
    }
}
