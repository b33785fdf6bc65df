use std::net::{IpAddr, SocketAddr};
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, header::ACCEPT_LANGUAGE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{error, warn};
use uuid::Uuid;

use crate::application::error::ErrorReport;
use crate::domain::i18n::Locale;

pub const LOCALE_COOKIE: &str = "lang";
const LOCALE_QUERY_PARAM: &str = "lang";

#[derive(Clone)]
pub struct RequestContext {
    pub request_id: String,
    /// Connecting peer; absent when the router runs without connect info.
    pub peer: Option<IpAddr>,
}

pub async fn set_request_context(mut request: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let ctx = RequestContext { request_id, peer };
    request.extensions_mut().insert(ctx.clone());

    let mut response = next.run(request).await;
    response.extensions_mut().insert(ctx);
    response
}

pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let request_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id.clone())
        .unwrap_or_default();
    let locale = request
        .extensions()
        .get::<Locale>()
        .copied()
        .unwrap_or_default();

    let mut response = next.run(request).await;
    let status = response.status();

    if status.is_client_error() || status.is_server_error() {
        let elapsed_ms = start.elapsed().as_millis();
        let report = response.extensions_mut().remove::<ErrorReport>();
        let (source, messages) = match report {
            Some(report) => (report.source, report.messages),
            None => ("unknown", Vec::new()),
        };
        let detail = messages
            .first()
            .cloned()
            .unwrap_or_else(|| "no diagnostic available".to_string());

        if status.is_server_error() {
            error!(
                target = "vantage::http::response",
                status = status.as_u16(),
                method = %method,
                path = %uri.path(),
                query = uri.query().unwrap_or(""),
                elapsed_ms = elapsed_ms,
                source = source,
                detail = %detail,
                chain = ?messages,
                request_id = request_id,
                locale = locale.as_str(),
                "request failed",
            );
        } else {
            warn!(
                target = "vantage::http::response",
                status = status.as_u16(),
                method = %method,
                path = %uri.path(),
                query = uri.query().unwrap_or(""),
                elapsed_ms = elapsed_ms,
                source = source,
                detail = %detail,
                chain = ?messages,
                request_id = request_id,
                locale = locale.as_str(),
                "client request error",
            );
        }
    }

    response
}

/// Resolve the visitor's locale and expose it to handlers as an extension.
///
/// Order: `?lang=`, the `lang` cookie, `Accept-Language`, then the configured
/// default. An explicit `?lang=` is remembered in the cookie.
pub async fn resolve_locale(
    State(default_locale): State<Locale>,
    jar: CookieJar,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let explicit = request.uri().query().and_then(locale_from_query);

    let locale = explicit
        .or_else(|| {
            jar.get(LOCALE_COOKIE)
                .and_then(|cookie| Locale::parse(cookie.value()))
        })
        .or_else(|| {
            request
                .headers()
                .get(ACCEPT_LANGUAGE)
                .and_then(|value| value.to_str().ok())
                .and_then(Locale::from_accept_language)
        })
        .unwrap_or(default_locale);

    request.extensions_mut().insert(locale);
    let response = next.run(request).await;

    match explicit {
        Some(chosen) => (jar.add(locale_cookie(chosen)), response).into_response(),
        None => response,
    }
}

fn locale_from_query(query: &str) -> Option<Locale> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == LOCALE_QUERY_PARAM)
        .and_then(|(_, value)| Locale::parse(&value))
}

fn locale_cookie(locale: Locale) -> Cookie<'static> {
    Cookie::build((LOCALE_COOKIE, locale.as_str()))
        .path("/")
        .same_site(SameSite::Lax)
        .http_only(true)
        .permanent()
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_locale_ignores_unknown_values() {
        assert_eq!(locale_from_query("search=x&lang=es"), Some(Locale::Es));
        assert_eq!(locale_from_query("lang=de"), None);
        assert_eq!(locale_from_query("search=lang"), None);
    }

    #[test]
    fn locale_cookie_is_site_wide() {
        let cookie = locale_cookie(Locale::Fr);
        assert_eq!(cookie.value(), "fr");
        assert_eq!(cookie.path(), Some("/"));
    }
}
