use axum::{extract::State, Json};
use serde::Serialize;

use crate::cv::assemble::{assemble_cv_page, CvPage};
use crate::cv::store;
use crate::errors::AppError;
use crate::models::profile::ProfileRow;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub profile: Option<ProfileRow>,
}

/// GET /
/// Landing page context: the profile alone, no child collections.
pub async fn handle_home(State(state): State<AppState>) -> Result<Json<HomePage>, AppError> {
    let profile = store::first_profile(&state.db).await?;
    Ok(Json(HomePage { profile }))
}

/// GET /cv
/// Full CV page context. An empty database yields an all-empty bundle,
/// never an error.
pub async fn handle_cv_page(State(state): State<AppState>) -> Result<Json<CvPage>, AppError> {
    let profile = store::first_profile(&state.db).await?;
    let page = assemble_cv_page(&state.db, profile).await?;
    Ok(Json(page))
}
