use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

#[utoipa::path(get, path = "/categories", tag = "categories", responses((status = 200, description = "Distinct categories, sorted", body = crate::openapi::CategoriesDoc)))]
pub async fn list_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let categories = state.questions.list_categories().await;
    Json(CategoriesResponse { categories })
}
