/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: Credential Gate (cookie/header → JWT 検証 → AuthCtx)
 * - http: request id / access log / body limit / timeout
 */
pub mod auth;
pub mod http;
