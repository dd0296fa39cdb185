//! Resolver errors and their GraphQL projection.
//!
//! Every failure reaching the caller carries a stable machine-readable
//! `code` extension, plus an `invalidArgs` extension naming the offending
//! field when the store reported one. Nothing here retries; a failure is
//! terminal for the request.

use async_graphql::ErrorExtensions;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ResolverError {
    /// A gated operation was invoked without an authenticated identity.
    #[error("not authenticated")]
    Unauthenticated,

    /// Credential issuance was attempted with an unknown handle or a wrong
    /// secret. Deliberately indistinguishable from the outside.
    #[error("wrong credentials")]
    WrongCredentials,

    /// The bearer credential was present but malformed or unverifiable.
    /// Reads degrade to anonymous instead of surfacing this; gated
    /// mutations surface it.
    #[error("invalid credential: {reason}")]
    InvalidCredential { reason: String },

    /// The store rejected a write on a mutation input.
    #[error("invalid input: {source}")]
    InvalidInput {
        field: Option<&'static str>,
        source: StoreError,
    },

    /// The store rejected an identity insertion.
    #[error("creating identity failed: {source}")]
    PersistenceConflict {
        field: Option<&'static str>,
        source: StoreError,
    },

    /// A work references a creator that no longer exists. Normal mutation
    /// paths cannot produce this; it indicates external tampering.
    #[error("work `{title}` references a missing creator")]
    DanglingCreatorReference { title: String },

    /// A store operation failed on a read path.
    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),

    /// Credential signing failed.
    #[error("signing credential failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

impl ResolverError {
    /// Store rejection on a mutation input, echoing the offending field.
    pub fn invalid_input(source: StoreError) -> Self {
        ResolverError::InvalidInput {
            field: source.field(),
            source,
        }
    }

    /// Store rejection on the identity collection.
    pub fn persistence_conflict(source: StoreError) -> Self {
        ResolverError::PersistenceConflict {
            field: source.field(),
            source,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ResolverError::Unauthenticated | ResolverError::WrongCredentials => "UNAUTHENTICATED",
            ResolverError::InvalidCredential { .. } => "INVALID_CREDENTIAL",
            ResolverError::InvalidInput { .. } => "BAD_USER_INPUT",
            ResolverError::PersistenceConflict { .. } => "PERSISTENCE_CONFLICT",
            ResolverError::DanglingCreatorReference { .. }
            | ResolverError::Store(_)
            | ResolverError::Signing(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn invalid_args(&self) -> Option<&'static str> {
        match self {
            ResolverError::InvalidInput { field, .. }
            | ResolverError::PersistenceConflict { field, .. } => *field,
            _ => None,
        }
    }
}

impl ErrorExtensions for ResolverError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, extensions| {
            extensions.set("code", self.code());
            if let Some(field) = self.invalid_args() {
                extensions.set("invalidArgs", field);
            }
        })
    }
}
