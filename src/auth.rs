//! Credential signing and verification.
//!
//! A credential is an HS256 JWT binding an identity's handle and id. This
//! module only signs and verifies; resolving a verified claim back to a
//! stored identity is the context builder's job.

use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::Error as JwtError;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

/// Only headers carrying this prefix are treated as credentials; anything
/// else resolves to anonymous.
pub const BEARER_PREFIX: &str = "Bearer ";

/// The fixed system password checked at credential issuance.
#[derive(Debug, Clone)]
pub struct SystemSecret(pub String);

/// The signed payload. Opaque to every resolver except verify/sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub handle: String,
    pub id: String,
}

pub struct CredentialSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl CredentialSigner {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Claims carry no expiry, only handle and id.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation).map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims() -> Claims {
        Claims {
            handle: "mluukkai".into(),
            id: "7f9c".into(),
        }
    }

    #[test]
    fn signed_claims_verify_back_to_themselves() {
        let signer = CredentialSigner::new("sekret");
        let token = signer.sign(&claims()).unwrap();
        assert_eq!(signer.verify(&token).unwrap(), claims());
    }

    #[test]
    fn verification_rejects_a_foreign_signature() {
        let signer = CredentialSigner::new("sekret");
        let other = CredentialSigner::new("not-sekret");
        let token = other.sign(&claims()).unwrap();
        assert!(signer.verify(&token).is_err());
    }

    #[test]
    fn verification_rejects_garbage() {
        let signer = CredentialSigner::new("sekret");
        assert!(signer.verify("not-a-jwt").is_err());
    }
}
