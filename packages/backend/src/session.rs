//! The live study session
//!
//! Owns the in-memory document and is its only writer. Every action goes
//! through the reducer under the write lock, then the new document is saved.
//! A failed save keeps the new in-memory state and reports `persisted: false`;
//! a failed load never replaces the current state.

use std::sync::Arc;

use chrono::NaiveDate;
use flashdeck_algo::{reduce, Action, AlgoResult, Document};
use tokio::sync::RwLock;

use crate::store::{DocumentStore, StoreError, StoreResult};

pub type Clock = fn() -> NaiveDate;

#[derive(Debug, Clone)]
pub struct Dispatched {
    pub document: Document,
    pub persisted: bool,
}

pub struct Session {
    doc: RwLock<Document>,
    store: Arc<dyn DocumentStore>,
    clock: Clock,
}

impl Session {
    pub fn new(doc: Document, store: Arc<dyn DocumentStore>, clock: Clock) -> Self {
        Self {
            doc: RwLock::new(doc),
            store,
            clock,
        }
    }

    /// Start from whatever the store holds.
    ///
    /// A missing document starts from the starter deck. An unreadable or
    /// invalid one is logged and left on disk untouched until the next
    /// successful change overwrites it.
    pub async fn open(store: Arc<dyn DocumentStore>, clock: Clock) -> Self {
        let doc = match store.load().await {
            Ok(doc) => {
                tracing::info!(
                    location = %store.describe(),
                    decks = doc.decks.len(),
                    cards = doc.card_count(),
                    "document loaded"
                );
                doc
            }
            Err(StoreError::NotFound(_)) => {
                tracing::info!(location = %store.describe(), "no document yet, using starter deck");
                Document::starter(clock())
            }
            Err(err) => {
                tracing::warn!(
                    location = %store.describe(),
                    error = %err,
                    "document unusable, starting from starter deck"
                );
                Document::starter(clock())
            }
        };
        Self::new(doc, store, clock)
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub async fn snapshot(&self) -> Document {
        self.doc.read().await.clone()
    }

    /// Snapshot as seen today: counters left over from an earlier day read
    /// as a fresh day. The stored document is not touched.
    pub async fn current(&self) -> Document {
        let mut doc = self.snapshot().await;
        doc.daily_progress.roll_over(self.today());
        doc
    }

    pub async fn dispatch(&self, action: Action) -> AlgoResult<Dispatched> {
        let action_name = action.name();
        let today = self.today();

        let mut guard = self.doc.write().await;
        let next = match reduce(&guard, action, today) {
            Ok(next) => next,
            Err(err) => {
                tracing::debug!(action = action_name, error = %err, "action rejected");
                return Err(err);
            }
        };
        *guard = next;

        let persisted = match self.store.save(&guard).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(
                    action = action_name,
                    location = %self.store.describe(),
                    error = %err,
                    "save failed, keeping in-memory state"
                );
                false
            }
        };

        Ok(Dispatched {
            document: guard.clone(),
            persisted,
        })
    }

    /// Re-read the store, adopting the result only if it loads cleanly.
    pub async fn reload(&self) -> StoreResult<Document> {
        let loaded = self.store.load().await?;
        let mut guard = self.doc.write().await;
        *guard = loaded.clone();
        tracing::info!(location = %self.store.describe(), "document reloaded");
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use flashdeck_algo::document::DEFAULT_DECK;
    use flashdeck_algo::Grade;
    use std::sync::Mutex;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    /// Store that can be told to fail, recording what was saved.
    #[derive(Default)]
    struct FlakyStore {
        fail_saves: bool,
        stored: Mutex<Option<Document>>,
        saves: Mutex<usize>,
    }

    #[async_trait]
    impl DocumentStore for FlakyStore {
        async fn load(&self) -> StoreResult<Document> {
            match self.stored.lock().unwrap().clone() {
                Some(doc) => Ok(doc),
                None => Err(StoreError::Parse("corrupt".into())),
            }
        }

        async fn save(&self, doc: &Document) -> StoreResult<()> {
            *self.saves.lock().unwrap() += 1;
            if self.fail_saves {
                return Err(StoreError::Io(std::io::Error::other("read-only")));
            }
            *self.stored.lock().unwrap() = Some(doc.clone());
            Ok(())
        }

        fn describe(&self) -> String {
            "memory".to_string()
        }
    }

    fn review(card_id: u64) -> Action {
        Action::ReviewCard {
            deck_name: DEFAULT_DECK.to_string(),
            card_id,
            grade: Grade::Good,
        }
    }

    #[tokio::test]
    async fn test_dispatch_saves_every_change() {
        let store = Arc::new(FlakyStore::default());
        let session = Session::new(Document::starter(fixed_today()), store.clone(), fixed_today);

        let out = session.dispatch(review(1)).await.unwrap();
        assert!(out.persisted);
        assert_eq!(*store.saves.lock().unwrap(), 1);
        assert_eq!(store.stored.lock().unwrap().as_ref(), Some(&out.document));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_memory_state() {
        let store = Arc::new(FlakyStore {
            fail_saves: true,
            ..Default::default()
        });
        let session = Session::new(Document::starter(fixed_today()), store, fixed_today);

        let out = session.dispatch(review(1)).await.unwrap();
        assert!(!out.persisted);
        assert_eq!(session.snapshot().await.stats.total_reviews, 1);
    }

    #[tokio::test]
    async fn test_rejected_action_does_not_save() {
        let store = Arc::new(FlakyStore::default());
        let session = Session::new(Document::starter(fixed_today()), store.clone(), fixed_today);

        assert!(session.dispatch(review(99)).await.is_err());
        assert_eq!(*store.saves.lock().unwrap(), 0);
        assert_eq!(session.snapshot().await, Document::starter(fixed_today()));
    }

    #[tokio::test]
    async fn test_bad_reload_keeps_state() {
        let session = Session::new(
            Document::empty(fixed_today()),
            Arc::new(FlakyStore::default()),
            fixed_today,
        );
        assert!(session.reload().await.is_err());
        assert_eq!(session.snapshot().await, Document::empty(fixed_today()));
    }

    #[tokio::test]
    async fn test_reload_adopts_stored_document() {
        let store = Arc::new(FlakyStore::default());
        *store.stored.lock().unwrap() = Some(Document::starter(fixed_today()));
        let session = Session::new(Document::empty(fixed_today()), store, fixed_today);

        session.reload().await.unwrap();
        assert_eq!(session.snapshot().await.card_count(), 3);
    }

    #[tokio::test]
    async fn test_current_starts_a_new_day() {
        fn next_day() -> NaiveDate {
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        }

        let store = Arc::new(FlakyStore::default());
        let mut doc = Document::starter(fixed_today());
        doc.daily_progress.new_cards_learned = 1;
        doc.daily_progress.reviews_done = 1;
        let session = Session::new(doc, store.clone(), next_day);

        let current = session.current().await;
        assert_eq!(current.daily_progress.date, next_day());
        assert_eq!(current.daily_progress.reviews_done, 0);

        // held state and store are untouched by a read
        assert_eq!(session.snapshot().await.daily_progress.reviews_done, 1);
        assert_eq!(*store.saves.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_open_falls_back_to_starter() {
        let session = Session::open(Arc::new(FlakyStore::default()), fixed_today).await;
        assert_eq!(session.snapshot().await, Document::starter(fixed_today()));
    }
}
