// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use poem::{http::header::AUTHORIZATION, Request};

/// Whether the request carries `Authorization: Bearer <token>` with a known token.
///
/// The pages resource only needs to tell anonymous callers from known ones;
/// accounts and sessions live in the platform in front of this service.
pub fn is_authenticated(request: &Request, tokens: &[String]) -> bool {
    let Some(token) = bearer_token(request) else {
        return false;
    };
    tokens.iter().any(|known| !known.is_empty() && known == token)
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> Vec<String> {
        vec!["secret".to_string()]
    }

    #[test]
    fn test_anonymous() {
        let request = Request::builder().finish();
        assert!(!is_authenticated(&request, &tokens()));
    }

    #[test]
    fn test_known_token() {
        let request = Request::builder()
            .header(AUTHORIZATION, "Bearer secret")
            .finish();
        assert!(is_authenticated(&request, &tokens()));
    }

    #[test]
    fn test_unknown_or_malformed() {
        let request = Request::builder()
            .header(AUTHORIZATION, "Bearer other")
            .finish();
        assert!(!is_authenticated(&request, &tokens()));

        let request = Request::builder()
            .header(AUTHORIZATION, "Basic c2VjcmV0")
            .finish();
        assert!(!is_authenticated(&request, &tokens()));

        let request = Request::builder().header(AUTHORIZATION, "Bearer ").finish();
        assert!(!is_authenticated(&request, &[String::new()]));
    }
}
