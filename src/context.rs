//! Per-request identity context.
//!
//! The `Authorization` header is resolved exactly once, before any resolver
//! runs, and the outcome is threaded unchanged through the whole request.
//! Tests inject a [`RequestContext`] directly instead of simulating a
//! network request.

use std::sync::Arc;

use crate::auth::CredentialSigner;
use crate::auth::BEARER_PREFIX;
use crate::error::ResolverError;
use crate::store::IdentityRecord;
use crate::store::Store;
use crate::store::StoreError;

/// Outcome of resolving the bearer credential, fixed for the request.
#[derive(Debug, Clone, Default)]
enum CredentialStatus {
    /// No credential, or a credential whose identity no longer exists.
    #[default]
    Anonymous,
    /// A credential was present but malformed or unverifiable. Reads treat
    /// this as anonymous; the gate does not.
    Invalid { reason: String },
    Authenticated(IdentityRecord),
}

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    credential: CredentialStatus,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(identity: IdentityRecord) -> Self {
        Self {
            credential: CredentialStatus::Authenticated(identity),
        }
    }

    pub fn current_identity(&self) -> Option<&IdentityRecord> {
        match &self.credential {
            CredentialStatus::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    /// The authentication gate. Called by every mutation except identity
    /// creation and credential issuance, before any side effect.
    pub fn require_identity(&self) -> Result<&IdentityRecord, ResolverError> {
        match &self.credential {
            CredentialStatus::Authenticated(identity) => Ok(identity),
            CredentialStatus::Anonymous => Err(ResolverError::Unauthenticated),
            CredentialStatus::Invalid { reason } => Err(ResolverError::InvalidCredential {
                reason: reason.clone(),
            }),
        }
    }
}

/// Builds one [`RequestContext`] per incoming request.
pub struct ContextBuilder {
    store: Arc<dyn Store>,
    signer: Arc<CredentialSigner>,
}

impl ContextBuilder {
    pub fn new(store: Arc<dyn Store>, signer: Arc<CredentialSigner>) -> Self {
        Self { store, signer }
    }

    pub async fn build(&self, authorization: Option<&str>) -> Result<RequestContext, StoreError> {
        let Some(header) = authorization else {
            return Ok(RequestContext::anonymous());
        };
        let Some(token) = header.strip_prefix(BEARER_PREFIX) else {
            return Ok(RequestContext::anonymous());
        };
        let claims = match self.signer.verify(token) {
            Ok(claims) => claims,
            Err(error) => {
                tracing::debug!(%error, "unverifiable bearer credential");
                return Ok(RequestContext {
                    credential: CredentialStatus::Invalid {
                        reason: error.to_string(),
                    },
                });
            }
        };
        match self.store.find_identity_by_id(&claims.id).await? {
            Some(identity) => Ok(RequestContext::authenticated(identity)),
            // Stale credential: valid signature, identity since replaced.
            None => Ok(RequestContext::anonymous()),
        }
    }
}
