pub mod db;
pub mod memory;
pub mod mongo;
pub mod repository;
pub mod timestamp;

use std::sync::Arc;

use mongodb::Client;

pub use db::connect_to_mongo;
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use repository::{CommentRepository, PostRepository, StoreError, UserRepository};

/// Handles to the three collections, shared by every worker.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl Repositories {
    pub async fn mongo(client: &Client, database: &str) -> Self {
        let store = Arc::new(MongoStore::new(client, database));
        store.ensure_indexes().await;
        Self::from_store(store)
    }

    pub fn memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::new()))
    }

    /// Use one store for all three collections
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepository + PostRepository + CommentRepository + 'static,
    {
        Self {
            users: store.clone(),
            posts: store.clone(),
            comments: store,
        }
    }
}
