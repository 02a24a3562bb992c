use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct QuestionDoc {
    pub id: Uuid,
    pub question_text: String,
    pub choices: Vec<String>,
    pub answer: String,
    pub category: String,
}

#[derive(ToSchema)]
pub struct NewQuestionDoc {
    pub question_text: String,
    /// At least 3 items; `answer` must be one of them.
    pub choices: Vec<String>,
    pub answer: String,
    pub category: String,
}

#[derive(ToSchema)]
pub struct QuestionListDoc {
    pub questions: Vec<QuestionDoc>,
    pub total: usize,
    pub category: Option<String>,
    pub count: usize,
}

#[derive(ToSchema)]
pub struct CategoriesDoc { pub categories: Vec<String> }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(OpenApi)]
#[openapi(
    info(title = "Trivia API", description = "Serves trivia quiz questions"),
    paths(
        crate::routes::health,
        crate::routes::questions::list_questions,
        crate::routes::questions::create_question,
        crate::routes::questions::get_question,
        crate::routes::questions::delete_question,
        crate::routes::categories::list_categories,
    ),
    components(
        schemas(
            HealthResponse,
            QuestionDoc,
            NewQuestionDoc,
            QuestionListDoc,
            CategoriesDoc,
            MessageDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "questions"),
        (name = "categories")
    )
)]
pub struct ApiDoc;
