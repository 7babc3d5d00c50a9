//! 認証済みコンテキスト (AuthCtx) と、それを handler に渡す extractor。
//!
//! Credential Gate (`middleware::auth::gate`) が検証後に request extensions へ
//! `AuthCtx { user_id, permission }` を insert し、handler は `AuthCtxExtractor` で受け取る。
//! gate を通っていない route で使うと 401 になる。

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::AuthCtx;
