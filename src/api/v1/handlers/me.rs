/*
 * Responsibility
 * - GET /me: gate が載せた AuthCtx (user_id / permission) をそのまま返す
 */
use axum::Json;

use crate::api::v1::extractors::{AuthCtx, AuthCtxExtractor};

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<AuthCtx> {
    Json(ctx)
}
