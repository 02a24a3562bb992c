use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use models::question::{validate_count, DEFAULT_COUNT};
use models::{NewQuestion, Question};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::metrics;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub count: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    pub questions: Vec<Question>,
    pub total: usize,
    pub category: Option<String>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/questions",
    tag = "questions",
    params(
        ("category" = Option<String>, Query, description = "Filter by category, case-insensitive"),
        ("count" = Option<i64>, Query, description = "Number of questions (1-50, default 10)")
    ),
    responses(
        (status = 200, description = "Random sample of matching questions", body = crate::openapi::QuestionListDoc),
        (status = 422, description = "count out of range")
    )
)]
pub async fn list_questions(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<QuestionListResponse>, JsonApiError> {
    let Query(q) = query?;
    let raw = q.count.unwrap_or(DEFAULT_COUNT as i64);
    // negative values fall through to the range check as 0
    let count = validate_count(usize::try_from(raw).unwrap_or(0))?;

    let questions = state.questions.list_questions(q.category.as_deref(), count).await;
    metrics::QUESTIONS_LISTED_TOTAL.inc_by(questions.len() as u64);
    Ok(Json(QuestionListResponse {
        total: questions.len(),
        questions,
        category: q.category,
        count,
    }))
}

#[utoipa::path(
    post,
    path = "/questions",
    tag = "questions",
    request_body = crate::openapi::NewQuestionDoc,
    responses(
        (status = 200, description = "Created question with its generated id", body = crate::openapi::QuestionDoc),
        (status = 400, description = "Answer is not one of the choices, or malformed JSON"),
        (status = 422, description = "Missing field, blank field or fewer than 3 choices")
    )
)]
pub async fn create_question(
    State(state): State<AppState>,
    payload: Result<Json<NewQuestion>, JsonRejection>,
) -> Result<Json<Question>, JsonApiError> {
    let Json(input) = payload?;
    input.validate_shape()?;
    let created = state.questions.create_question(input).await?;
    metrics::QUESTIONS_CREATED_TOTAL.inc();
    Ok(Json(created))
}

#[utoipa::path(
    get,
    path = "/questions/{id}",
    tag = "questions",
    params(("id" = Uuid, Path, description = "Question id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::QuestionDoc),
        (status = 400, description = "id is not a UUID"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_question(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Question>, JsonApiError> {
    let Path(id) = id?;
    state
        .questions
        .get_question_by_id(id)
        .await
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("question"))
}

#[utoipa::path(
    delete,
    path = "/questions/{id}",
    tag = "questions",
    params(("id" = Uuid, Path, description = "Question id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 400, description = "id is not a UUID"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_question(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    let Path(id) = id?;
    if !state.questions.delete_question_by_id(id).await? {
        info!(%id, "delete of unknown question");
        return Err(JsonApiError::not_found("question"));
    }
    metrics::QUESTIONS_DELETED_TOTAL.inc();
    Ok(Json(MessageResponse { message: "question deleted".into() }))
}
