use std::collections::BTreeSet;
use std::sync::Arc;

use models::{NewQuestion, Question};
use rand::seq::SliceRandom;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::question::store::QuestionStore;

/// Application service for the question collection: filtering, sampling,
/// answer validation and id lookup on top of a [`QuestionStore`].
///
/// Shape rules on create input (non-empty fields, at least three choices)
/// are enforced by the caller; this layer only checks that the answer is one
/// of the choices.
pub struct QuestionService<S: QuestionStore + ?Sized> {
    store: Arc<S>,
}

impl<S: QuestionStore + ?Sized> QuestionService<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    /// Questions in `category` (case-insensitive), or all when `None`.
    /// More than `count` matches are reduced to a random sample of `count`
    /// distinct questions; otherwise matches come back in stored order.
    pub async fn list_questions(&self, category: Option<&str>, count: usize) -> Vec<Question> {
        let category = category.filter(|c| !c.is_empty());
        let all = self.store.snapshot().await;
        let matching: Vec<Question> = match category {
            Some(c) => all.into_iter().filter(|q| q.in_category(c)).collect(),
            None => all,
        };
        debug!(category = ?category, matching = matching.len(), count, "list questions");
        sample(matching, count)
    }

    pub async fn get_question_by_id(&self, id: Uuid) -> Option<Question> {
        self.store.get(id).await
    }

    #[instrument(skip(self, input), fields(category = %input.category))]
    pub async fn create_question(&self, input: NewQuestion) -> Result<Question, ServiceError> {
        if !input.choices.iter().any(|c| *c == input.answer) {
            warn!(answer = %input.answer, "answer not among choices");
            return Err(ServiceError::InvalidAnswer(input.answer));
        }
        let question = Question::from_new(input);
        self.store.insert(question.clone()).await?;
        info!(id = %question.id, category = %question.category, "question created");
        Ok(question)
    }

    #[instrument(skip(self))]
    pub async fn delete_question_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        let existed = self.store.remove(id).await?;
        if existed {
            info!(%id, "question deleted");
        }
        Ok(existed)
    }

    /// Distinct categories, sorted. Identity is case-sensitive.
    pub async fn list_categories(&self) -> Vec<String> {
        self.store
            .snapshot()
            .await
            .into_iter()
            .map(|q| q.category)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn sample(items: Vec<Question>, count: usize) -> Vec<Question> {
    if items.len() <= count {
        return items;
    }
    let mut rng = rand::thread_rng();
    items.choose_multiple(&mut rng, count).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::store::{FileQuestionStore, MemoryQuestionStore};
    use std::collections::HashSet;

    fn new_question(text: &str, answer: &str, category: &str) -> NewQuestion {
        NewQuestion {
            question_text: text.into(),
            choices: vec!["3".into(), "4".into(), "5".into()],
            answer: answer.into(),
            category: category.into(),
        }
    }

    fn seeded(n: usize, category: &str) -> Vec<Question> {
        (0..n)
            .map(|i| Question::from_new(new_question(&format!("q{i}"), "4", category)))
            .collect()
    }

    #[tokio::test]
    async fn list_returns_min_of_count_and_matches_without_duplicates() {
        let mut questions = seeded(30, "Sains");
        questions.extend(seeded(5, "Sejarah"));
        let svc = QuestionService::new(MemoryQuestionStore::with_questions(questions));

        for count in [1usize, 5, 10, 29, 30, 31, 50] {
            let all = svc.list_questions(None, count).await;
            assert_eq!(all.len(), count.min(35));
            let ids: HashSet<_> = all.iter().map(|q| q.id).collect();
            assert_eq!(ids.len(), all.len());

            let sains = svc.list_questions(Some("sains"), count).await;
            assert_eq!(sains.len(), count.min(30));
            assert!(sains.iter().all(|q| q.category == "Sains"));
        }
    }

    #[tokio::test]
    async fn small_result_keeps_stored_order() {
        let questions = seeded(4, "Sains");
        let svc = QuestionService::new(MemoryQuestionStore::with_questions(questions.clone()));
        assert_eq!(svc.list_questions(None, 10).await, questions);
    }

    #[tokio::test]
    async fn sampling_can_reach_every_question_and_leaves_store_intact() {
        let questions = seeded(6, "Umum");
        let store = MemoryQuestionStore::with_questions(questions.clone());
        let svc = QuestionService::new(store.clone());

        let mut seen = HashSet::new();
        for _ in 0..500 {
            for q in svc.list_questions(None, 2).await {
                seen.insert(q.id);
            }
        }
        assert_eq!(seen.len(), 6);
        assert_eq!(store.snapshot().await, questions);
    }

    #[tokio::test]
    async fn category_filter_ignores_case_and_empty_filter_means_all() {
        let mut questions = seeded(2, "Sains");
        questions.extend(seeded(1, "sains"));
        questions.extend(seeded(3, "Sejarah"));
        let svc = QuestionService::new(MemoryQuestionStore::with_questions(questions));

        assert_eq!(svc.list_questions(Some("SAINS"), 10).await.len(), 3);
        assert_eq!(svc.list_questions(Some(""), 10).await.len(), 6);
        assert!(svc.list_questions(Some("Olahraga"), 10).await.is_empty());
    }

    #[tokio::test]
    async fn categories_are_sorted_distinct_and_case_sensitive() {
        let mut questions = seeded(2, "Sejarah");
        questions.extend(seeded(1, "Sains"));
        questions.extend(seeded(1, "sains"));
        questions.extend(seeded(2, "Geografi"));
        let svc = QuestionService::new(MemoryQuestionStore::with_questions(questions));

        assert_eq!(
            svc.list_categories().await,
            vec!["Geografi", "Sains", "Sejarah", "sains"]
        );
    }

    #[tokio::test]
    async fn create_then_get_returns_equal_question() -> Result<(), anyhow::Error> {
        let svc = QuestionService::new(MemoryQuestionStore::with_questions(Vec::new()));
        let created = svc.create_question(new_question("2+2?", "4", "Math")).await?;
        assert_eq!(created.question_text, "2+2?");
        assert_eq!(svc.get_question_by_id(created.id).await, Some(created));
        assert!(svc.get_question_by_id(Uuid::new_v4()).await.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn invalid_answer_leaves_collection_and_file_untouched() -> Result<(), anyhow::Error> {
        let path = std::env::temp_dir().join(format!("svc_invalid_answer_{}.json", Uuid::new_v4()));
        let store = FileQuestionStore::open(&path).await?;
        let svc = QuestionService::new(store.clone());

        svc.create_question(new_question("2+2?", "4", "Math")).await?;
        let before_file = tokio::fs::read(&path).await?;

        let err = svc.create_question(new_question("3+3?", "6", "Math")).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidAnswer(ref a) if a == "6"));
        assert_eq!(store.snapshot().await.len(), 1);
        assert_eq!(tokio::fs::read(&path).await?, before_file);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_and_is_idempotent() -> Result<(), anyhow::Error> {
        let questions = seeded(3, "Umum");
        let target = questions[1].id;
        let svc = QuestionService::new(MemoryQuestionStore::with_questions(questions.clone()));

        assert!(svc.delete_question_by_id(target).await?);
        let remaining = svc.list_questions(None, 50).await;
        assert_eq!(remaining, vec![questions[0].clone(), questions[2].clone()]);

        assert!(!svc.delete_question_by_id(target).await?);
        assert_eq!(svc.list_questions(None, 50).await.len(), 2);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_creates_and_deletes_all_reach_the_file() -> Result<(), anyhow::Error> {
        let path = std::env::temp_dir().join(format!("svc_concurrent_{}.json", Uuid::new_v4()));
        let svc = Arc::new(QuestionService::new(FileQuestionStore::open(&path).await?));

        let mut doomed = Vec::new();
        for i in 0..16 {
            let q = svc.create_question(new_question(&format!("old{i}"), "4", "Lama")).await?;
            doomed.push(q.id);
        }

        let mut creates = Vec::new();
        for i in 0..64 {
            let svc = svc.clone();
            creates.push(tokio::spawn(async move {
                svc.create_question(new_question(&format!("new{i}"), "4", "Baru")).await
            }));
        }
        let mut deletes = Vec::new();
        for id in doomed.iter().copied() {
            let svc = svc.clone();
            deletes.push(tokio::spawn(async move { svc.delete_question_by_id(id).await }));
        }

        let mut expected = HashSet::new();
        for handle in creates {
            expected.insert(handle.await??.id);
        }
        for handle in deletes {
            assert!(handle.await??);
        }
        assert_eq!(expected.len(), 64);

        let in_memory: HashSet<_> = svc.list_questions(None, 50).await.iter().map(|q| q.id).collect();
        assert!(in_memory.is_subset(&expected));

        let reloaded = FileQuestionStore::open(&path).await?.snapshot().await;
        assert_eq!(reloaded.len(), 64);
        let on_disk: HashSet<_> = reloaded.iter().map(|q| q.id).collect();
        assert_eq!(on_disk, expected);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn empty_store_walkthrough_persists_to_file() -> Result<(), anyhow::Error> {
        let path = std::env::temp_dir().join(format!("svc_walkthrough_{}.json", Uuid::new_v4()));
        let svc = QuestionService::new(FileQuestionStore::open(&path).await?);

        assert!(svc.list_categories().await.is_empty());

        let created = svc.create_question(NewQuestion {
            question_text: "2+2?".into(),
            choices: vec!["3".into(), "4".into(), "5".into()],
            answer: "4".into(),
            category: "Math".into(),
        }).await?;

        let listed = svc.list_questions(Some("math"), 10).await;
        assert_eq!(listed, vec![created.clone()]);

        // a fresh load sees the persisted question
        let reloaded = QuestionService::new(FileQuestionStore::open(&path).await?);
        assert_eq!(reloaded.get_question_by_id(created.id).await, Some(created.clone()));

        assert!(svc.delete_question_by_id(created.id).await?);
        assert!(svc.get_question_by_id(created.id).await.is_none());

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
