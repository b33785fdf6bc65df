use crate::application::error::{ErrorReport, HttpError};
use crate::domain::i18n::{Locale, Msg, translate};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    render_fragment(template).map(Html)
}

/// Render a template to a bare string, for SSE patches and partial responses.
pub fn render_fragment<T: Template>(template: T) -> Result<String, HttpError> {
    template.render().map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response(chrome: LayoutChrome) -> Response {
    let content = ErrorPageView::not_found(chrome.locale);
    let view = LayoutContext::new(chrome, content);
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

#[derive(Clone)]
pub struct LinkView {
    pub label: String,
    pub href: String,
    pub is_active: bool,
}

#[derive(Clone)]
pub struct NavigationView {
    pub entries: Vec<LinkView>,
}

#[derive(Clone)]
pub struct FooterView {
    pub copy: String,
    pub language_label: String,
    pub languages: Vec<LinkView>,
}

#[derive(Clone)]
pub struct BrandView {
    pub title: String,
    pub tagline: String,
    pub href: String,
}

#[derive(Clone)]
pub struct PageMetaView {
    pub title: String,
    pub description: String,
    pub canonical: String,
}

impl PageMetaView {
    /// Prefix the page title onto the site title.
    pub fn with_page_title(self, page_title: &str) -> Self {
        let title = format!("{page_title} | {}", self.title);
        Self { title, ..self }
    }
}

#[derive(Clone)]
pub struct LayoutChrome {
    pub locale: Locale,
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub meta: PageMetaView,
}

impl LayoutChrome {
    pub fn with_page_title(self, page_title: &str) -> Self {
        Self {
            meta: self.meta.with_page_title(page_title),
            ..self
        }
    }
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub lang: &'static str,
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub meta: PageMetaView,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            lang: chrome.locale.as_str(),
            brand: chrome.brand,
            navigation: chrome.navigation,
            footer: chrome.footer,
            meta: chrome.meta,
            content,
        }
    }
}

#[derive(Clone)]
pub struct DateView {
    pub iso: String,
    pub human: String,
}

/// One card on a listing page or the home page.
#[derive(Clone)]
pub struct ItemCard {
    pub href: String,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub image: String,
    pub details: Vec<String>,
    pub date: Option<DateView>,
    pub tags: Vec<String>,
    pub read_more: String,
}

#[derive(Clone)]
pub struct EmptyStateView {
    pub title: String,
    pub message: String,
    pub clear_href: String,
    pub clear_label: String,
}

#[derive(Clone)]
pub struct ListingResultsView {
    pub cards: Vec<ItemCard>,
    pub result_count: usize,
    pub total_count: usize,
    pub of_label: String,
    pub results_label: String,
    pub empty_state: Option<EmptyStateView>,
}

impl ListingResultsView {
    pub fn has_results(&self) -> bool {
        !self.cards.is_empty()
    }
}

pub struct ListingContext {
    pub slug: &'static str,
    pub path: &'static str,
    pub heading: String,
    pub intro: String,
    pub search_placeholder: String,
    pub search_button: String,
    pub search_value: String,
    pub category_value: String,
    pub selected_tags: Vec<String>,
    pub filters: ListingFiltersView,
    pub filters_html: String,
    pub results_endpoint: String,
    pub results: ListingResultsView,
    pub results_html: String,
}

/// Category tabs and tag toggles; every href carries the rest of the filter.
#[derive(Clone)]
pub struct ListingFiltersView {
    pub label: String,
    pub categories: Vec<LinkView>,
    pub tags_label: String,
    pub tags: Vec<LinkView>,
}

#[derive(Template)]
#[template(path = "listing.html")]
pub struct ListingTemplate {
    pub view: LayoutContext<ListingContext>,
}

#[derive(Template)]
#[template(path = "partials/listing_results.html")]
pub struct ListingResultsPartial {
    pub results: ListingResultsView,
}

#[derive(Template)]
#[template(path = "partials/listing_filters.html")]
pub struct ListingFiltersPartial {
    pub filters: ListingFiltersView,
}

#[derive(Clone)]
pub struct FactView {
    pub label: String,
    pub value: String,
}

pub struct DetailContext {
    pub back_href: String,
    pub back_label: String,
    pub title: String,
    pub category: String,
    pub summary: String,
    pub image: String,
    pub date: Option<DateView>,
    pub facts: Vec<FactView>,
    pub tags: Vec<String>,
}

#[derive(Template)]
#[template(path = "detail.html")]
pub struct DetailTemplate {
    pub view: LayoutContext<DetailContext>,
}

#[derive(Clone)]
pub struct SectionView {
    pub title: String,
    pub body: String,
}

#[derive(Clone)]
pub struct TestimonialSlideView {
    pub index: usize,
    pub position: usize,
    pub total: usize,
    pub quote: String,
    pub name: String,
    pub role: String,
    pub company: String,
    pub direction: &'static str,
    pub transitioning: bool,
    pub indicators: Vec<IndicatorView>,
}

#[derive(Template)]
#[template(path = "partials/testimonial_slide.html")]
pub struct TestimonialSlidePartial {
    pub slide: TestimonialSlideView,
}

#[derive(Clone)]
pub struct IndicatorView {
    pub index: usize,
    pub position: usize,
    pub is_active: bool,
}

pub struct TestimonialsView {
    pub heading: String,
    pub slide_html: String,
    pub next_label: String,
    pub previous_label: String,
    pub stream_href: String,
}

pub struct HomeContext {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_cta: LinkView,
    pub services_heading: String,
    pub services: Vec<SectionView>,
    pub featured_heading: String,
    pub featured: Vec<ItemCard>,
    pub testimonials: TestimonialsView,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub view: LayoutContext<HomeContext>,
}

pub struct ContentPageView {
    pub title: String,
    pub intro: String,
    pub paragraphs: Vec<String>,
    pub sections: Vec<SectionView>,
    pub cta: Option<LinkView>,
}

#[derive(Template)]
#[template(path = "content_page.html")]
pub struct ContentPageTemplate {
    pub view: LayoutContext<ContentPageView>,
}

pub struct FormStatusView {
    pub is_success: bool,
    pub text: String,
}

pub struct ContactPageView {
    pub title: String,
    pub intro: String,
    pub email_label: String,
    pub message_label: String,
    pub submit_label: String,
    pub email_value: String,
    pub message_value: String,
    pub status: Option<FormStatusView>,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub view: LayoutContext<ContactPageView>,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub primary_action: Option<LinkView>,
}

impl ErrorPageView {
    pub fn not_found(locale: Locale) -> Self {
        Self {
            title: translate(locale, Msg::NotFoundTitle).to_string(),
            message: translate(locale, Msg::NotFoundMessage).to_string(),
            primary_action: Some(LinkView {
                label: translate(locale, Msg::NotFoundBack).to_string(),
                href: "/".to_string(),
                is_active: false,
            }),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}
