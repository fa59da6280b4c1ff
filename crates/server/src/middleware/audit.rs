//! Audit trail of writes to user data

use axum::{
    body::Body,
    extract::{MatchedPath, Request},
    http::Method,
    middleware::Next,
    response::Response,
};

use super::request_id::RequestId;

/// Path placeholder naming the user a route belongs to
const USER_ID_PARAM: &str = "{user_id}";

/// The `{user_id}` segment of `path` under route `template`, if it has one
pub fn user_id_segment<'a>(template: &str, path: &'a str) -> Option<&'a str> {
    template
        .split('/')
        .zip(path.split('/'))
        .find(|(pattern, _)| *pattern == USER_ID_PARAM)
        .map(|(_, segment)| segment)
        .filter(|segment| !segment.is_empty())
}

/// Log every POST/PUT/DELETE under the `audit` target once it has a status.
///
/// Entries carry the route template and, for user-scoped routes such as
/// `/medical-history/{user_id}`, the user the write touched.
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    if !matches!(method, Method::POST | Method::PUT | Method::DELETE) {
        return next.run(request).await;
    }

    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|m| m.as_str().to_string());
    let user_id = route
        .as_deref()
        .and_then(|template| user_id_segment(template, request.uri().path()))
        .map(String::from);
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let response = next.run(request).await;

    tracing::info!(
        target: "audit",
        request_id = %request_id,
        method = %method,
        route = route.as_deref().unwrap_or("unmatched"),
        user_id = user_id.as_deref(),
        status = response.status().as_u16(),
        "User data write"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_scoped_routes_yield_user() {
        assert_eq!(
            user_id_segment("/medical-history/{user_id}", "/medical-history/auth0%7Cabc"),
            Some("auth0%7Cabc")
        );
        assert_eq!(user_id_segment("/personal-info", "/personal-info"), None);
        assert_eq!(user_id_segment("/search", "/search"), None);
    }
}
