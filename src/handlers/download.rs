use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};

use super::AppState;
use crate::error::Result;

/// Serve an exported summary as an attachment
pub async fn download(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<impl IntoResponse> {
    let (file_name, bytes) = state.service.exporter().open(&file_id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    ))
}
