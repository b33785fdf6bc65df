use std::{convert::Infallible, net::IpAddr, sync::Arc, time::Duration};

use async_stream::stream;
use axum::{
    Extension, Form, Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header::RETRY_AFTER},
    middleware,
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, post},
};
use axum_extra::extract::Query;
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;
use vantage_api_types::{ContactRequest, ContactResponse};

use crate::{
    application::{
        carousel::{CarouselCommand, CarouselHub},
        chrome::ChromeService,
        contact::{ContactOutcome, ContactService},
        error::{AppError, ErrorReport, HttpError},
        listing::{ListingKind, ListingService, ListingSignals, build_datastar_results_response},
        pages::{ContactFormState, ContentPage, PageService},
    },
    config::Settings,
    domain::{content::SiteContent, i18n::Locale, query::FilterState},
    presentation::views::{
        ContactTemplate, ContentPageTemplate, DetailTemplate, HomeTemplate, LayoutContext,
        ListingResultsPartial, ListingTemplate, render_not_found_response,
        render_template_response,
    },
};

use super::{
    DATASTAR_REQUEST_HEADER,
    middleware::{RequestContext, log_responses, resolve_locale, set_request_context},
    rate_limit::RateLimiter,
};

const SOURCE: &str = "infra::http::public";
const FORWARDED_FOR: &str = "x-forwarded-for";
const UNKNOWN_CLIENT: &str = "unknown";

#[derive(Clone)]
pub struct HttpState {
    pub chrome: Arc<ChromeService>,
    pub listings: Arc<ListingService>,
    pub pages: Arc<PageService>,
    pub contact: Arc<ContactService>,
    pub contact_limiter: RateLimiter,
    pub carousel: Arc<CarouselHub>,
    pub default_locale: Locale,
    pub trusted_proxies: Arc<[IpAddr]>,
}

impl HttpState {
    pub fn new(settings: &Settings, content: Arc<SiteContent>) -> Self {
        let listings = ListingService::new(Arc::clone(&content));
        let carousel = Arc::new(CarouselHub::new(
            settings.carousel,
            content.testimonials.clone(),
        ));
        let pages = PageService::new(Arc::clone(&content), listings.clone(), Arc::clone(&carousel));

        Self {
            chrome: Arc::new(ChromeService::new(settings.site.public_url.clone())),
            listings: Arc::new(listings),
            pages: Arc::new(pages),
            contact: Arc::new(ContactService::new()),
            contact_limiter: RateLimiter::new(
                Duration::from_secs(u64::from(settings.contact.window_seconds.get())),
                settings.contact.max_requests.get(),
            ),
            carousel,
            default_locale: settings.site.default_locale,
            trusted_proxies: settings.server.trusted_proxies.clone().into(),
        }
    }
}

pub fn build_router(state: HttpState) -> Router {
    let default_locale = state.default_locale;

    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/services", get(services))
        .route("/industries", get(industries))
        .route("/careers", get(careers))
        .route("/contact", get(contact_page).post(contact_form))
        .route("/api/contact", post(contact_api))
        .route("/{listing}", get(listing_page))
        .route("/{listing}/{id}", get(listing_detail))
        .route("/ui/listings/{listing}", get(listing_results))
        .route("/ui/testimonials/stream", get(testimonial_stream))
        .route("/ui/testimonials/{session}/{action}", post(testimonial_step))
        .route(
            "/ui/testimonials/{session}/select/{index}",
            post(testimonial_select),
        )
        .route("/static/{*path}", get(crate::infra::assets::serve_static))
        .route("/_health", get(health))
        .fallback(fallback)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn_with_state(default_locale, resolve_locale))
        .layer(middleware::from_fn(set_request_context))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListingParams {
    search: Option<String>,
    category: Option<String>,
    tag: Vec<String>,
    datastar: Option<String>,
}

impl ListingParams {
    fn into_filter(self) -> FilterState {
        let signals = self
            .datastar
            .as_deref()
            .and_then(ListingSignals::parse)
            .unwrap_or_default();
        let search = signals.search.or(self.search);
        let category = signals.category.or(self.category);
        FilterState::new(search.as_deref(), category.as_deref(), self.tag)
    }
}

async fn home(State(state): State<HttpState>, Extension(locale): Extension<Locale>) -> Response {
    let chrome = state.chrome.load(locale, "/");
    match state.pages.home(locale) {
        Ok(content) => render_template_response(
            HomeTemplate {
                view: LayoutContext::new(chrome, content),
            },
            StatusCode::OK,
        ),
        Err(err) => err.into_response(),
    }
}

async fn about(state: State<HttpState>, locale: Extension<Locale>) -> Response {
    content_page(state, locale, ContentPage::About)
}

async fn services(state: State<HttpState>, locale: Extension<Locale>) -> Response {
    content_page(state, locale, ContentPage::Services)
}

async fn industries(state: State<HttpState>, locale: Extension<Locale>) -> Response {
    content_page(state, locale, ContentPage::Industries)
}

async fn careers(state: State<HttpState>, locale: Extension<Locale>) -> Response {
    content_page(state, locale, ContentPage::Careers)
}

fn content_page(
    State(state): State<HttpState>,
    Extension(locale): Extension<Locale>,
    page: ContentPage,
) -> Response {
    let content = state.pages.content_page(page, locale);
    let chrome = state
        .chrome
        .load(locale, page.path())
        .with_page_title(&content.title);
    render_template_response(
        ContentPageTemplate {
            view: LayoutContext::new(chrome, content),
        },
        StatusCode::OK,
    )
}

async fn listing_page(
    State(state): State<HttpState>,
    Extension(locale): Extension<Locale>,
    Path(slug): Path<String>,
    Query(params): Query<ListingParams>,
) -> Response {
    let Some(kind) = ListingKind::from_slug(&slug) else {
        return render_not_found_response(state.chrome.load(locale, &format!("/{slug}")));
    };

    let filter = params.into_filter();
    match state.listings.listing(kind, &filter, locale) {
        Ok(content) => {
            let chrome = state
                .chrome
                .load(locale, &filter.href(kind.path()))
                .with_page_title(&content.heading);
            render_template_response(
                ListingTemplate {
                    view: LayoutContext::new(chrome, content),
                },
                StatusCode::OK,
            )
        }
        Err(err) => err.into_response(),
    }
}

async fn listing_results(
    State(state): State<HttpState>,
    Extension(locale): Extension<Locale>,
    headers: HeaderMap,
    Path(slug): Path<String>,
    Query(params): Query<ListingParams>,
) -> Result<Response, HttpError> {
    let kind = ListingKind::from_slug(&slug).ok_or_else(|| {
        HttpError::new(
            "infra::http::listing_results",
            StatusCode::NOT_FOUND,
            "Unknown listing",
            format!("no listing named `{slug}`"),
        )
    })?;

    let filter = params.into_filter();
    let results = state.listings.results(kind, &filter, locale);

    if headers.contains_key(DATASTAR_REQUEST_HEADER) {
        let filters = state.listings.filters(kind, &filter, locale);
        return build_datastar_results_response(kind, &filter, results, filters);
    }

    Ok(render_template_response(
        ListingResultsPartial { results },
        StatusCode::OK,
    ))
}

async fn listing_detail(
    State(state): State<HttpState>,
    Extension(locale): Extension<Locale>,
    Path((slug, id)): Path<(String, String)>,
) -> Response {
    let path = format!("/{slug}/{id}");
    let chrome = state.chrome.load(locale, &path);

    let detail = ListingKind::from_slug(&slug)
        .zip(id.parse().ok())
        .and_then(|(kind, id)| state.listings.detail(kind, id, locale));

    match detail {
        Some(content) => {
            let chrome = chrome.with_page_title(&content.title);
            render_template_response(
                DetailTemplate {
                    view: LayoutContext::new(chrome, content),
                },
                StatusCode::OK,
            )
        }
        None => render_not_found_response(chrome),
    }
}

async fn contact_page(
    State(state): State<HttpState>,
    Extension(locale): Extension<Locale>,
) -> Response {
    render_contact(&state, locale, ContactFormState::default(), StatusCode::OK)
}

async fn contact_form(
    State(state): State<HttpState>,
    Extension(locale): Extension<Locale>,
    Extension(ctx): Extension<RequestContext>,
    headers: HeaderMap,
    Form(request): Form<ContactRequest>,
) -> Response {
    let outcome = submit_contact(&state, &ctx, &headers, &request);
    let status = contact_status(&outcome);
    let text = outcome.message(locale).to_string();

    let form = if outcome.is_accepted() {
        ContactFormState {
            status: Some((true, text)),
            ..ContactFormState::default()
        }
    } else {
        ContactFormState {
            email: request.email,
            message: request.message,
            status: Some((false, text)),
        }
    };

    let mut response = render_contact(&state, locale, form, status);
    if !outcome.is_accepted() {
        ErrorReport::from_message(
            "infra::http::contact_form",
            status,
            format!("contact submission {}", outcome_label(&outcome)),
        )
        .attach(&mut response);
    }
    with_retry_after(&state, &outcome, response)
}

async fn contact_api(
    State(state): State<HttpState>,
    Extension(locale): Extension<Locale>,
    Extension(ctx): Extension<RequestContext>,
    headers: HeaderMap,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let status = rejection.status();
            let mut response =
                (status, Json(ContactResponse::rejected(rejection.body_text()))).into_response();
            ErrorReport::from_error("infra::http::contact_api", status, &rejection)
                .attach(&mut response);
            return response;
        }
    };

    let outcome = submit_contact(&state, &ctx, &headers, &request);
    let status = contact_status(&outcome);
    let mut response = (status, Json(outcome.to_response(locale))).into_response();
    if !outcome.is_accepted() {
        ErrorReport::from_message(
            "infra::http::contact_api",
            status,
            format!("contact submission {}", outcome_label(&outcome)),
        )
        .attach(&mut response);
    }
    with_retry_after(&state, &outcome, response)
}

fn submit_contact(
    state: &HttpState,
    ctx: &RequestContext,
    headers: &HeaderMap,
    request: &ContactRequest,
) -> ContactOutcome {
    let client = client_key(ctx.peer, headers, &state.trusted_proxies);
    if state.contact_limiter.allow(&client) {
        state.contact.submit(request)
    } else {
        state.contact.rate_limited(&client)
    }
}

fn contact_status(outcome: &ContactOutcome) -> StatusCode {
    match outcome {
        ContactOutcome::Accepted => StatusCode::OK,
        ContactOutcome::Rejected(_) => StatusCode::BAD_REQUEST,
        ContactOutcome::RateLimited => StatusCode::TOO_MANY_REQUESTS,
    }
}

fn outcome_label(outcome: &ContactOutcome) -> String {
    match outcome {
        ContactOutcome::Accepted => "accepted".to_string(),
        ContactOutcome::Rejected(reason) => format!("rejected: {reason}"),
        ContactOutcome::RateLimited => "rate limited".to_string(),
    }
}

fn with_retry_after(state: &HttpState, outcome: &ContactOutcome, mut response: Response) -> Response {
    if matches!(outcome, ContactOutcome::RateLimited) {
        if let Ok(value) = HeaderValue::from_str(&state.contact_limiter.retry_after_secs().to_string())
        {
            response.headers_mut().insert(RETRY_AFTER, value);
        }
    }
    response
}

fn render_contact(
    state: &HttpState,
    locale: Locale,
    form: ContactFormState,
    status: StatusCode,
) -> Response {
    let content = state.pages.contact(locale, form);
    let chrome = state
        .chrome
        .load(locale, "/contact")
        .with_page_title(&content.title);
    render_template_response(
        ContactTemplate {
            view: LayoutContext::new(chrome, content),
        },
        status,
    )
}

/// Rate-limit key: the connecting peer, or the first `X-Forwarded-For` hop
/// when that peer is a trusted proxy.
fn client_key(peer: Option<IpAddr>, headers: &HeaderMap, trusted: &[IpAddr]) -> String {
    let Some(peer) = peer else {
        return UNKNOWN_CLIENT.to_string();
    };

    trusted
        .contains(&peer)
        .then(|| forwarded_client(headers))
        .flatten()
        .unwrap_or(peer)
        .to_string()
}

fn forwarded_client(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get(FORWARDED_FOR)?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim()
        .parse()
        .ok()
}

async fn testimonial_stream(State(state): State<HttpState>) -> Response {
    let mut session = match state.carousel.open() {
        Ok(session) => session,
        Err(err) => return AppError::from(err).into_response(),
    };
    let hub = Arc::clone(&state.carousel);

    let stream = stream! {
        yield Ok::<Event, Infallible>(session.session_event());
        while let Some(frame) = session.next_frame().await {
            match hub.frame_event(&frame) {
                Ok(event) => yield Ok(event),
                Err(err) => {
                    error!(
                        target = "vantage::http::carousel",
                        session = %session.id(),
                        error = ?err,
                        "failed to render testimonial frame"
                    );
                    break;
                }
            }
        }
    };

    Sse::new(stream)
        .keep_alive(KeepAlive::default())
        .into_response()
}

async fn testimonial_step(
    State(state): State<HttpState>,
    Path((session, action)): Path<(Uuid, String)>,
) -> Result<StatusCode, AppError> {
    let command = match action.as_str() {
        "next" => CarouselCommand::Next,
        "previous" => CarouselCommand::Previous,
        _ => return Err(AppError::NotFound),
    };
    state.carousel.dispatch(session, command).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn testimonial_select(
    State(state): State<HttpState>,
    Path((session, index)): Path<(Uuid, usize)>,
) -> Result<StatusCode, AppError> {
    state
        .carousel
        .dispatch(session, CarouselCommand::Select(index))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn fallback(
    State(state): State<HttpState>,
    Extension(locale): Extension<Locale>,
    uri: axum::http::Uri,
) -> Response {
    let mut response = render_not_found_response(state.chrome.load(locale, uri.path()));
    ErrorReport::from_message(SOURCE, StatusCode::NOT_FOUND, format!("no route for {}", uri.path()))
        .attach(&mut response);
    response
}
