//! Credential extraction.
//!
//! Precedence is part of the contract: the `auth_token` cookie wins, the raw
//! `Authorization` header value is the fallback. No `Bearer ` prefix is stripped.

use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::CookieJar;

pub const AUTH_COOKIE_NAME: &str = "auth_token";

/// Locate the credential on a request, or `None` if neither source carries a value.
pub fn extract(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(AUTH_COOKIE_NAME) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_owned());
        }
    }

    // non-ASCII でも捨てずに verifier へ渡す (401 は verifier 側のエラーになる)
    headers
        .get(header::AUTHORIZATION)
        .filter(|v| !v.is_empty())
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(header::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).expect("header value"));
        }
        map
    }

    #[test]
    fn test_nothing_present() {
        assert_eq!(extract(&HeaderMap::new()), None);
    }

    #[test]
    fn test_cookie_only() {
        let map = headers(&[(header::COOKIE, "theme=dark; auth_token=abc.def.ghi")]);
        assert_eq!(extract(&map).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_header_only_is_taken_raw() {
        let map = headers(&[(header::AUTHORIZATION, "Bearer abc.def.ghi")]);
        assert_eq!(extract(&map).as_deref(), Some("Bearer abc.def.ghi"));
    }

    #[test]
    fn test_cookie_wins_over_header() {
        let map = headers(&[
            (header::COOKIE, "auth_token=from-cookie"),
            (header::AUTHORIZATION, "from-header"),
        ]);
        assert_eq!(extract(&map).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_empty_cookie_falls_back_to_header() {
        let map = headers(&[
            (header::COOKIE, "auth_token="),
            (header::AUTHORIZATION, "from-header"),
        ]);
        assert_eq!(extract(&map).as_deref(), Some("from-header"));
    }

    #[test]
    fn test_other_cookies_do_not_count() {
        let map = headers(&[(header::COOKIE, "session=abc")]);
        assert_eq!(extract(&map), None);
    }

    #[test]
    fn test_non_ascii_header_is_passed_on() {
        let mut map = HeaderMap::new();
        map.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"caf\xe9").expect("obs-text header value"),
        );

        assert_eq!(extract(&map).as_deref(), Some("caf\u{FFFD}"));
    }

    #[test]
    fn test_empty_header() {
        let map = headers(&[(header::AUTHORIZATION, "")]);
        assert_eq!(extract(&map), None);
    }
}
