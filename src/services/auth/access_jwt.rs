use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::Value;
use std::{error::Error as StdError, fmt};

use super::claims::{AccessClaims, ClaimsError};

const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

// Errors returned by access-token verification + claim decoding.
#[derive(Debug)]
pub enum AccessJwtError {
    EmptySecret,
    Jwt(jsonwebtoken::errors::Error),
    UnexpectedSigningMethod,
    UsedBeforeIssued,
    InvalidToken,
    Claims(ClaimsError),
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySecret => write!(f, "jwt secret must be non-empty"),
            // verifier の文言をそのままクライアントへ返す
            Self::Jwt(e) => write!(f, "{}", e),
            Self::UnexpectedSigningMethod => write!(f, "unexpected signing method"),
            Self::UsedBeforeIssued => write!(f, "Token used before issued"),
            Self::InvalidToken => write!(f, "invalid token"),
            Self::Claims(e) => write!(f, "{}", e),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            Self::Claims(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessJwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

impl From<ClaimsError> for AccessJwtError {
    fn from(e: ClaimsError) -> Self {
        Self::Claims(e)
    }
}

/// HMAC (HS256/HS384/HS512) access-token verifier.
///
/// - Holds the process-wide secret; read-only after construction, shared via `Arc`.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

// jsonwebtoken does not look at `iat`; a token issued in the future is not valid yet.
fn issued_in_future(claims: &Value, leeway_seconds: u64) -> bool {
    let Some(iat) = claims.get("iat").and_then(Value::as_f64) else {
        return false;
    };
    let now = jsonwebtoken::get_current_timestamp() as f64;
    iat > now + leeway_seconds as f64
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: &[u8], leeway_seconds: u64) -> Result<Self, AccessJwtError> {
        if secret.is_empty() {
            return Err(AccessJwtError::EmptySecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        // Registered claims are optional; exp/nbf are only checked when present.
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Verify the signature and return the raw claim set.
    ///
    /// The algorithm family is checked on the header before the signature so a
    /// non-HMAC token reports `unexpected signing method` instead of a generic error.
    pub fn verify(&self, token: &str) -> Result<Value, AccessJwtError> {
        let header = jsonwebtoken::decode_header(token)?;
        if !HMAC_ALGORITHMS.contains(&header.alg) {
            tracing::debug!(alg = ?header.alg, "rejecting non-HMAC token");
            return Err(AccessJwtError::UnexpectedSigningMethod);
        }

        let data = jsonwebtoken::decode::<Value>(token, &self.decoding_key, &self.validation)?;
        if issued_in_future(&data.claims, self.validation.leeway) {
            return Err(AccessJwtError::UsedBeforeIssued);
        }
        Ok(data.claims)
    }

    /// Verify + decode into an application-friendly type.
    ///
    /// This is the entry-point for the credential gate.
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, AccessJwtError> {
        let claims = self.verify(token)?;
        let map = claims.as_object().ok_or(AccessJwtError::InvalidToken)?;

        Ok(AccessClaims::from_claim_set(map)?)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use serde_json::json;

    fn service() -> AuthService {
        AuthService::new(TEST_SECRET, 0).expect("auth service")
    }

    fn now() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock after epoch")
            .as_secs()
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        assert!(matches!(
            AuthService::new(b"", 0),
            Err(AccessJwtError::EmptySecret)
        ));
    }

    #[test]
    fn test_verify_access_valid_token() {
        let token = sign(&json!({"user_id": 7, "permission": "admin"}));

        let claims = service().verify_access(&token).expect("verified token");
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.permission, "admin");
    }

    #[test]
    fn test_all_hmac_algorithms_accepted() {
        for alg in [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512] {
            let token = sign_with(alg, &json!({"user_id": 1}), TEST_SECRET);
            assert!(service().verify_access(&token).is_ok(), "{:?}", alg);
        }
    }

    #[test]
    fn test_wrong_secret() {
        let token = sign_with(
            Algorithm::HS256,
            &json!({"user_id": 7}),
            b"wrong-secret-key-that-is-different",
        );

        let err = service().verify_access(&token).expect_err("must fail");
        assert!(matches!(err, AccessJwtError::Jwt(_)));
    }

    #[test]
    fn test_malformed_token() {
        let err = service().verify_access("not-a-valid-jwt").expect_err("must fail");
        assert!(matches!(err, AccessJwtError::Jwt(_)));
    }

    #[test]
    fn test_non_hmac_algorithm() {
        for alg in ["RS256", "ES256", "EdDSA", "PS512"] {
            let token = foreign_alg_token(alg, &json!({"user_id": 7}));

            let err = service().verify_access(&token).expect_err("must fail");
            assert!(matches!(err, AccessJwtError::UnexpectedSigningMethod));
            assert_eq!(err.to_string(), "unexpected signing method");
        }
    }

    #[test]
    fn test_alg_none_is_rejected() {
        let token = foreign_alg_token("none", &json!({"user_id": 7}));
        assert!(service().verify_access(&token).is_err());
    }

    #[test]
    fn test_expired_token() {
        let token = sign(&json!({"user_id": 7, "exp": now() - 600}));

        let err = service().verify_access(&token).expect_err("must fail");
        assert!(matches!(err, AccessJwtError::Jwt(_)));
    }

    #[test]
    fn test_leeway_accepts_recently_expired_token() {
        let token = sign(&json!({"user_id": 7, "exp": now() - 10}));
        let lenient = AuthService::new(TEST_SECRET, 60).expect("auth service");

        assert!(lenient.verify_access(&token).is_ok());
    }

    #[test]
    fn test_not_yet_valid_token() {
        let token = sign(&json!({"user_id": 7, "nbf": now() + 600}));
        assert!(service().verify_access(&token).is_err());
    }

    #[test]
    fn test_token_issued_in_future_is_rejected() {
        let token = sign(&json!({"user_id": 7, "iat": now() + 3600}));

        let err = service().verify_access(&token).expect_err("must fail");
        assert!(matches!(err, AccessJwtError::UsedBeforeIssued));
        assert_eq!(err.to_string(), "Token used before issued");
    }

    #[test]
    fn test_iat_within_leeway_or_past_is_accepted() {
        let lenient = AuthService::new(TEST_SECRET, 60).expect("auth service");
        let token = sign(&json!({"user_id": 7, "iat": now() + 10}));
        assert!(lenient.verify_access(&token).is_ok());

        let token = sign(&json!({"user_id": 7, "iat": now() - 10}));
        assert!(service().verify_access(&token).is_ok());
    }

    #[test]
    fn test_future_exp_and_audience_are_accepted() {
        let token = sign(&json!({"user_id": 7, "exp": now() + 600, "aud": "somebody"}));
        assert!(service().verify_access(&token).is_ok());
    }

    #[test]
    fn test_string_user_id() {
        let token = sign(&json!({"user_id": "7"}));

        let err = service().verify_access(&token).expect_err("must fail");
        assert!(matches!(
            err,
            AccessJwtError::Claims(ClaimsError::InvalidUserId)
        ));
    }

    #[test]
    fn test_debug_hides_key() {
        let printed = format!("{:?}", service());
        assert!(!printed.contains("test-secret-key"));
    }
}
