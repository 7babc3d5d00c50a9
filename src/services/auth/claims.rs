/*
 * Responsibility
 * - 検証済み JWT payload (untyped な key/value) を AccessClaims に一括で変換する
 * - 必須: user_id (数値) / 任意: permission (文字列, 無ければ "")
 */
use serde_json::{Map, Value};
use std::fmt;

pub type ClaimSet = Map<String, Value>;

pub const USER_ID_CLAIM: &str = "user_id";
pub const PERMISSION_CLAIM: &str = "permission";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimsError {
    /// `user_id` missing, not a number, negative or not finite.
    InvalidUserId,
}

impl fmt::Display for ClaimsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUserId => write!(f, "invalid '{}' claim", USER_ID_CLAIM),
        }
    }
}

impl std::error::Error for ClaimsError {}

/// Identity carried by a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessClaims {
    pub user_id: u64,
    pub permission: String,
}

impl AccessClaims {
    pub fn from_claim_set(claims: &ClaimSet) -> Result<Self, ClaimsError> {
        let user_id = claims
            .get(USER_ID_CLAIM)
            .and_then(numeric_user_id)
            .ok_or(ClaimsError::InvalidUserId)?;

        // permission は失敗しない
        let permission = match claims.get(PERMISSION_CLAIM) {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        };

        Ok(Self {
            user_id,
            permission,
        })
    }
}

// Issuers encode numbers as JSON floats, so `7.0` is accepted and fractions truncate.
fn numeric_user_id(value: &Value) -> Option<u64> {
    let Value::Number(n) = value else {
        return None;
    };

    if let Some(v) = n.as_u64() {
        return Some(v);
    }

    let f = n.as_f64()?;
    if !f.is_finite() || f < 0.0 || f >= u64::MAX as f64 {
        return None;
    }
    Some(f.trunc() as u64)
}
