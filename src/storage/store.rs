use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use super::persistence::JsonSnapshot;
use crate::core::{ID_LENGTH, StoreError, StoreResult, Toy, ToyDraft, make_id};
use crate::query::{ToyFilter, ToyPage, run_query};

/// Operations the HTTP layer needs from a toy collection.
#[async_trait]
pub trait ToyRepository: Send + Sync {
    async fn query(&self, filter: ToyFilter) -> StoreResult<ToyPage>;
    async fn get(&self, id: &str) -> StoreResult<Toy>;
    /// Creates when `draft.id` is `None`, otherwise merges into the existing toy.
    async fn save(&self, draft: ToyDraft) -> StoreResult<Toy>;
    async fn remove(&self, id: &str) -> StoreResult<()>;
}

/// File-backed toy collection.
///
/// The collection is loaded once by [`ToyStore::open`]. Each mutation holds
/// the write lock across "stage, persist, commit", so writers are serialized
/// and memory only changes after the file write succeeded.
#[derive(Debug)]
pub struct ToyStore {
    snapshot: JsonSnapshot,
    toys: RwLock<Vec<Toy>>,
}

impl ToyStore {
    pub async fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let snapshot = JsonSnapshot::new(path);
        let loader = snapshot.clone();
        let toys = tokio::task::spawn_blocking(move || loader.load()).await??;

        info!(
            path = %snapshot.path().display(),
            count = toys.len(),
            "toy collection loaded"
        );

        Ok(Self {
            snapshot,
            toys: RwLock::new(toys),
        })
    }

    pub fn path(&self) -> &Path {
        self.snapshot.path()
    }

    /// Copy of the current collection, newest first.
    pub async fn list(&self) -> Vec<Toy> {
        self.toys.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.toys.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.toys.read().await.is_empty()
    }

    async fn persist(&self, toys: &[Toy]) -> StoreResult<()> {
        let bytes = JsonSnapshot::encode(toys)?;
        let writer = self.snapshot.clone();
        let result = tokio::task::spawn_blocking(move || writer.write(&bytes))
            .await
            .map_err(StoreError::from)
            .and_then(|written| written);

        if let Err(err) = &result {
            error!(path = %self.path().display(), error = %err, "failed to persist toys");
        }
        result
    }

    async fn create(&self, draft: ToyDraft) -> StoreResult<Toy> {
        let mut toys = self.toys.write().await;
        let toy = draft.into_new_toy(fresh_id(&toys), Utc::now().timestamp_millis())?;

        let mut staged = Vec::with_capacity(toys.len() + 1);
        staged.push(toy.clone());
        staged.extend(toys.iter().cloned());

        self.persist(&staged).await?;
        *toys = staged;

        debug!(id = %toy.id, name = %toy.name, "toy created");
        Ok(toy)
    }

    async fn update(&self, id: String, draft: ToyDraft) -> StoreResult<Toy> {
        let mut toys = self.toys.write().await;
        let idx = toys
            .iter()
            .position(|toy| toy.id == id)
            .ok_or_else(|| StoreError::not_found(id.as_str()))?;
        let updated = draft.merge_into(&toys[idx])?;

        let mut staged = toys.clone();
        staged[idx] = updated.clone();

        self.persist(&staged).await?;
        *toys = staged;

        debug!(id = %updated.id, "toy updated");
        Ok(updated)
    }
}

#[async_trait]
impl ToyRepository for ToyStore {
    async fn query(&self, filter: ToyFilter) -> StoreResult<ToyPage> {
        let toys = self.toys.read().await;
        Ok(run_query(&toys, &filter))
    }

    async fn get(&self, id: &str) -> StoreResult<Toy> {
        self.toys
            .read()
            .await
            .iter()
            .find(|toy| toy.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn save(&self, draft: ToyDraft) -> StoreResult<Toy> {
        match draft.id.clone() {
            Some(id) => self.update(id, draft).await,
            None => self.create(draft).await,
        }
    }

    async fn remove(&self, id: &str) -> StoreResult<()> {
        let mut toys = self.toys.write().await;
        let idx = toys
            .iter()
            .position(|toy| toy.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;

        let mut staged = toys.clone();
        staged.remove(idx);

        self.persist(&staged).await?;
        *toys = staged;

        debug!(id, "toy removed");
        Ok(())
    }
}

// Draws ids until one is unused; collisions are rare at this id length.
fn fresh_id(toys: &[Toy]) -> String {
    loop {
        let id = make_id(ID_LENGTH);
        if !toys.iter().any(|toy| toy.id == id) {
            return id;
        }
    }
}
