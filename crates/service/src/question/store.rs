use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use models::Question;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::storage::json_list_store::{Change, JsonListStore};

/// Trait abstraction for the question collection.
/// Implementations can be file-backed or purely in memory.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// All questions in stored order.
    async fn snapshot(&self) -> Vec<Question>;
    async fn get(&self, id: Uuid) -> Option<Question>;
    /// Append a question; its id must not already be present.
    async fn insert(&self, question: Question) -> Result<(), ServiceError>;
    /// Remove by id; returns whether an entry existed.
    async fn remove(&self, id: Uuid) -> Result<bool, ServiceError>;
}

fn insert_into(items: &mut Vec<Question>, question: Question) -> Result<Change<()>, ServiceError> {
    if items.iter().any(|q| q.id == question.id) {
        return Err(ServiceError::DuplicateId(question.id));
    }
    items.push(question);
    Ok(Change::Changed(()))
}

fn remove_from(items: &mut Vec<Question>, id: Uuid) -> Change<bool> {
    match items.iter().position(|q| q.id == id) {
        Some(idx) => {
            items.remove(idx);
            Change::Changed(true)
        }
        None => Change::Unchanged(false),
    }
}

/// Question store persisted as a JSON array in a single file.
pub struct FileQuestionStore {
    store: JsonListStore<Question>,
}

impl FileQuestionStore {
    /// Load from the given path. A missing file means an empty collection;
    /// malformed content or duplicate ids fail.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonListStore::<Question>::open(path).await?;
        let duplicate = store
            .read(|items| {
                let mut seen = HashSet::with_capacity(items.len());
                items.iter().map(|q| q.id).find(|id| !seen.insert(*id))
            })
            .await;
        if let Some(id) = duplicate {
            return Err(ServiceError::storage(store.path(), format!("duplicate question id {id}")));
        }
        Ok(Arc::new(Self { store }))
    }
}

#[async_trait]
impl QuestionStore for FileQuestionStore {
    async fn snapshot(&self) -> Vec<Question> {
        self.store.snapshot().await
    }

    async fn get(&self, id: Uuid) -> Option<Question> {
        self.store.read(|items| items.iter().find(|q| q.id == id).cloned()).await
    }

    async fn insert(&self, question: Question) -> Result<(), ServiceError> {
        self.store.update(|items| insert_into(items, question)).await
    }

    async fn remove(&self, id: Uuid) -> Result<bool, ServiceError> {
        self.store.update(|items| Ok(remove_from(items, id))).await
    }
}

/// In-memory question store without a backing file.
#[derive(Default)]
pub struct MemoryQuestionStore {
    inner: RwLock<Vec<Question>>,
}

impl MemoryQuestionStore {
    pub fn with_questions(questions: Vec<Question>) -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(questions) })
    }
}

#[async_trait]
impl QuestionStore for MemoryQuestionStore {
    async fn snapshot(&self) -> Vec<Question> {
        self.inner.read().await.clone()
    }

    async fn get(&self, id: Uuid) -> Option<Question> {
        self.inner.read().await.iter().find(|q| q.id == id).cloned()
    }

    async fn insert(&self, question: Question) -> Result<(), ServiceError> {
        let mut items = self.inner.write().await;
        insert_into(&mut items, question).map(|_| ())
    }

    async fn remove(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut items = self.inner.write().await;
        Ok(match remove_from(&mut items, id) {
            Change::Changed(r) | Change::Unchanged(r) => r,
        })
    }
}
