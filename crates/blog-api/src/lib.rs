//! # blog-api
//!
//! Transport-neutral front of the blog backend.
//!
//! A [`Request`] (method, path, query, JSON body and the caller's
//! authorization flag) is routed through an explicit dispatch table to one
//! [`Operation`], executed against [`BlogService`], and every outcome is
//! normalized into a [`blog_core::responses::Envelope`]. The HTTP framework
//! (or the `blogctl` binary) only has to build requests and print envelopes.

pub mod dispatch;
pub mod error;
mod handlers;
pub mod method;
mod normalize;
pub mod request;
pub mod route;

pub use dispatch::Operation;
pub use error::ApiError;
pub use method::Method;
pub use request::Request;
pub use route::Route;

use blog_config::BlogConfig;
use blog_core::responses::Envelope;
use blog_db::error::DatabaseError;
use blog_db::service::BlogService;

/// Request handler bound to one store.
pub struct Api {
    service: BlogService,
    expose_error_detail: bool,
}

impl Api {
    #[must_use]
    pub const fn new(service: BlogService, expose_error_detail: bool) -> Self {
        Self {
            service,
            expose_error_detail,
        }
    }

    /// Open the configured store and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the store cannot be opened or migrated.
    pub async fn from_config(config: &BlogConfig) -> Result<Self, DatabaseError> {
        let service = BlogService::new_local(&config.database.path, config.blog.clone()).await?;
        Ok(Self::new(service, config.general.expose_error_detail))
    }

    #[must_use]
    pub const fn service(&self) -> &BlogService {
        &self.service
    }

    /// Route, authorize, execute and normalize one request.
    pub async fn handle(&self, request: &Request) -> Envelope {
        let operation =
            Route::parse(&request.path).and_then(|route| Operation::resolve(route, request.method));
        let Some(operation) = operation else {
            return normalize::unsupported(&request.path, request.method);
        };
        if operation.requires_authorization() && !request.authorized {
            return normalize::unauthorized(&operation);
        }

        match handlers::execute(&self.service, &operation, request).await {
            Ok(reply) => normalize::success(reply),
            Err(error) => normalize::failure(
                &operation,
                error,
                request.authorized || self.expose_error_detail,
            ),
        }
    }
}
