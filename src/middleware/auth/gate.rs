//! Credential Gate: cookie/header → HMAC JWT 検証 → AuthCtx を extensions に入れる
//!
//! 失敗時はこの場で `{"error": ...}` を返し、後続の handler / middleware は実行しない。
//! - credential 無し / 署名・形式不正 / HMAC 以外 / claim set 不正: 401
//! - 署名は正しいが user_id が数値でない: 500 (issuer 側の不整合)

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use super::credential;
use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// 保護対象の routes に Credential Gate を掛ける。
///
/// 例：
/// ```ignore
/// let protected = Router::new().route("/me", get(me));
/// let protected = middleware::auth::gate::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // route_layer: マッチしない path は 404 のまま (gate を通さない)
    router.route_layer(middleware::from_fn_with_state(state, credential_gate))
}

async fn credential_gate(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = credential::extract(req.headers()) else {
        tracing::warn!("request rejected: missing credential");
        return Err(AppError::MissingCredential);
    };

    let claims = match state.auth.verify_access(&token) {
        Ok(claims) => claims,
        Err(err) => {
            let err = AppError::from(err);
            tracing::warn!(
                error = %err,
                status = err.status().as_u16(),
                "access token verification failed"
            );
            return Err(err);
        }
    };

    tracing::debug!(user_id = claims.user_id, "request authenticated");

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::from(claims));

    Ok(next.run(req).await)
}
