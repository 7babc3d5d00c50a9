/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - Credential Gate が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - request ごとに生成され、request と共に破棄される (request 間で共有しない)
 */
use serde::Serialize;

use crate::services::auth::AccessClaims;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は token issuer が採番した数値ID
/// - `permission` は coarse-grained な権限文字列（claim が無ければ空文字）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthCtx {
    pub user_id: u64,
    pub permission: String,
}

impl From<AccessClaims> for AuthCtx {
    fn from(claims: AccessClaims) -> Self {
        Self {
            user_id: claims.user_id,
            permission: claims.permission,
        }
    }
}
