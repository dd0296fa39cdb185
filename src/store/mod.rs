//! The document persistence boundary.
//!
//! Three independent collections: identities, creators, works. Works
//! reference creators by id; the store enforces no foreign keys, so a
//! dangling reference is only possible through external tampering. Record
//! constructors validate shape before anything reaches a collection.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A write violated a collection constraint, e.g. a unique index.
    #[error("document violates the unique `{field}` constraint")]
    Constraint { field: &'static str },

    /// A record failed boundary validation before reaching a collection.
    #[error("malformed `{field}`: {reason}")]
    Malformed {
        field: &'static str,
        reason: &'static str,
    },

    /// The backend itself failed.
    #[error("store backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// The offending field, when the failure names one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            StoreError::Constraint { field } | StoreError::Malformed { field, .. } => Some(*field),
            StoreError::Backend(_) => None,
        }
    }
}

/// The single authenticated-user record. The mutation path guarantees at
/// most one of these exists at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub id: String,
    pub handle: String,
    pub favorite_genre: String,
}

impl IdentityRecord {
    pub fn new(handle: String, favorite_genre: String) -> Result<Self, StoreError> {
        if handle.is_empty() {
            return Err(StoreError::Malformed {
                field: "handle",
                reason: "must not be empty",
            });
        }
        if favorite_genre.is_empty() {
            return Err(StoreError::Malformed {
                field: "favoriteGenre",
                reason: "must not be empty",
            });
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            handle,
            favorite_genre,
        })
    }
}

/// An author. The name is a lookup key, not a unique index: two concurrent
/// find-or-create paths may legitimately mint creators with the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorRecord {
    pub id: String,
    pub name: String,
    pub born: Option<i32>,
}

impl CreatorRecord {
    pub fn new(name: String) -> Result<Self, StoreError> {
        if name.is_empty() {
            return Err(StoreError::Malformed {
                field: "author",
                reason: "must not be empty",
            });
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            born: None,
        })
    }
}

/// A book. References exactly one creator by id; never mutated or deleted
/// once inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRecord {
    pub id: String,
    pub title: String,
    pub published: i32,
    pub genres: Vec<String>,
    pub creator_id: String,
}

impl WorkRecord {
    pub fn new(
        title: String,
        published: i32,
        genres: Vec<String>,
        creator_id: String,
    ) -> Result<Self, StoreError> {
        if title.is_empty() {
            return Err(StoreError::Malformed {
                field: "title",
                reason: "must not be empty",
            });
        }
        // Duplicates within the set are allowed, an empty set is not.
        if genres.is_empty() {
            return Err(StoreError::Malformed {
                field: "genres",
                reason: "must not be empty",
            });
        }
        if genres.iter().any(String::is_empty) {
            return Err(StoreError::Malformed {
                field: "genres",
                reason: "must not contain empty entries",
            });
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title,
            published,
            genres,
            creator_id,
        })
    }
}

/// Async document operations over the three collections. Every call is a
/// suspension point; multi-step mutations sequence these calls in written
/// order with no locking across calls.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_identity_by_id(&self, id: &str) -> Result<Option<IdentityRecord>, StoreError>;
    async fn find_identity_by_handle(
        &self,
        handle: &str,
    ) -> Result<Option<IdentityRecord>, StoreError>;
    async fn delete_all_identities(&self) -> Result<(), StoreError>;
    async fn insert_identity(
        &self,
        identity: IdentityRecord,
    ) -> Result<IdentityRecord, StoreError>;

    async fn find_creator_by_id(&self, id: &str) -> Result<Option<CreatorRecord>, StoreError>;
    async fn find_creator_by_name(&self, name: &str)
        -> Result<Option<CreatorRecord>, StoreError>;
    async fn insert_creator(&self, creator: CreatorRecord) -> Result<CreatorRecord, StoreError>;
    /// Full-record overwrite keyed by id. `None` when the id is gone.
    async fn update_creator(
        &self,
        creator: CreatorRecord,
    ) -> Result<Option<CreatorRecord>, StoreError>;
    async fn list_creators(&self) -> Result<Vec<CreatorRecord>, StoreError>;
    async fn count_creators(&self) -> Result<usize, StoreError>;

    async fn insert_work(&self, work: WorkRecord) -> Result<WorkRecord, StoreError>;
    async fn list_works(&self) -> Result<Vec<WorkRecord>, StoreError>;
    async fn count_works(&self) -> Result<usize, StoreError>;
}
