/// HTTP surface for the questionnaire
pub mod download;
pub mod form;
pub mod pages;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::ExpungementService;
use crate::validation::InputValidator;

#[derive(Clone)]
pub struct AppState {
    pub(crate) service: Arc<ExpungementService>,
    pub(crate) validator: Arc<InputValidator>,
}

impl AppState {
    pub fn new(service: Arc<ExpungementService>) -> Self {
        Self {
            service,
            validator: Arc::new(InputValidator::new()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(form::index))
        .route("/check", post(form::check))
        .route("/download/:file_id", get(download::download))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
}
