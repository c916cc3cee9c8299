use axum::{Form, extract::State, response::Html};

use super::AppState;
use super::pages;
use crate::error::Result;
use crate::models::EligibilityForm;

pub async fn index() -> Html<String> {
    Html(pages::form_page())
}

/// Validate the submission, run the pipeline once, and show the result
pub async fn check(
    State(state): State<AppState>,
    Form(form): Form<EligibilityForm>,
) -> Result<Html<String>> {
    let request = state.validator.to_request(form)?;
    let evaluation = state.service.evaluate(&request).await?;
    Ok(Html(pages::result_page(&evaluation)))
}
