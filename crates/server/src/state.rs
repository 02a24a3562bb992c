use std::sync::Arc;

use service::question::{QuestionService, QuestionStore};

/// Shared router state: the question service over whichever store the
/// composition root picked.
#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<QuestionService<dyn QuestionStore>>,
}

impl AppState {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { questions: Arc::new(QuestionService::new(store)) }
    }
}
