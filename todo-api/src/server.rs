//! HTTP server for the todo API
//!
//! Builds the axum router (`/api/v1/todos...` and `/health`) and serves it
//! until a shutdown signal resolves.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::{future::Future, net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    handler::{self, AppState},
    request_logger::request_logging_middleware,
};
use todo_core::TodoRepository;

/// Todo API server
pub struct TodoServer<R> {
    state: AppState<R>,
}

impl<R: TodoRepository + 'static> TodoServer<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            state: AppState::new(repository),
        }
    }

    /// Override the version reported by `/health`
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.state = self.state.with_version(version);
        self
    }

    /// Bind `addr` and serve until `shutdown` resolves
    pub async fn serve<F>(self, addr: &str, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let socket_addr: SocketAddr = addr.parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid address '{addr}': {e}"),
            )
        })?;

        let listener = TcpListener::bind(socket_addr).await?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    ///
    /// In-flight requests are allowed to finish after the signal.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("Starting todo API server on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Todo API server stopped");
        Ok(())
    }

    /// Create the router with all endpoints
    pub fn router(self) -> Router {
        let api = Router::new()
            .route(
                "/todos",
                post(handler::create_todo::<R>).get(handler::list_todos::<R>),
            )
            .route(
                "/todos/:id",
                get(handler::get_todo::<R>)
                    .patch(handler::update_todo::<R>)
                    .delete(handler::delete_todo::<R>),
            );

        Router::new()
            .nest("/api/v1", api)
            .route("/health", get(handler::health::<R>))
            .fallback(handler::fallback)
            .layer(middleware::from_fn(request_logging_middleware))
            .with_state(self.state)
    }
}
