//! Listing pages: evaluation of the filter state against a content store and the
//! view models for cards, category tabs, tag toggles, and the empty state.

use std::sync::Arc;

use axum::response::Response;
use datastar::prelude::ElementPatchMode;
use metrics::counter;
use serde::{Deserialize, Serialize};

use crate::application::error::HttpError;
use crate::application::stream::StreamBuilder;
use crate::config::ListingArg;
use crate::domain::content::{
    BlogPost, CaseStudy, ContentStore, Insight, ItemId, ListingItem, Project, SiteContent,
    image_or_placeholder,
};
use crate::domain::i18n::{Locale, Msg, translate};
use crate::domain::query::{CategoryFilter, FilterState, evaluate};
use crate::presentation::views::{
    DateView, DetailContext, EmptyStateView, FactView, ItemCard, LinkView, ListingContext,
    ListingFiltersPartial, ListingFiltersView, ListingResultsPartial, ListingResultsView,
    render_fragment,
};
use crate::util::date::{format_human_date, format_iso_date};

pub const RESULTS_SELECTOR: &str = "#listing-results";
pub const FILTERS_SELECTOR: &str = "#listing-filters";
const LISTING_QUERIES_METRIC: &str = "vantage_listing_queries_total";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListingKind {
    Blog,
    Insights,
    CaseStudies,
    Projects,
}

impl ListingKind {
    pub const ALL: [ListingKind; 4] = [
        ListingKind::Blog,
        ListingKind::Insights,
        ListingKind::CaseStudies,
        ListingKind::Projects,
    ];

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Insights => "insights",
            Self::CaseStudies => "case-studies",
            Self::Projects => "projects",
        }
    }

    pub const fn path(self) -> &'static str {
        match self {
            Self::Blog => "/blog",
            Self::Insights => "/insights",
            Self::CaseStudies => "/case-studies",
            Self::Projects => "/projects",
        }
    }

    /// Fragment endpoint used by in-place filtering.
    pub fn results_path(self) -> String {
        format!("/ui/listings/{}", self.slug())
    }

    const fn heading(self) -> Msg {
        match self {
            Self::Blog => Msg::BlogTitle,
            Self::Insights => Msg::InsightsTitle,
            Self::CaseStudies => Msg::CaseStudiesTitle,
            Self::Projects => Msg::ProjectsTitle,
        }
    }

    const fn intro(self) -> Msg {
        match self {
            Self::Blog => Msg::BlogIntro,
            Self::Insights => Msg::InsightsIntro,
            Self::CaseStudies => Msg::CaseStudiesIntro,
            Self::Projects => Msg::ProjectsIntro,
        }
    }
}

impl From<ListingArg> for ListingKind {
    fn from(arg: ListingArg) -> Self {
        match arg {
            ListingArg::Blog => Self::Blog,
            ListingArg::Insights => Self::Insights,
            ListingArg::CaseStudies => Self::CaseStudies,
            ListingArg::Projects => Self::Projects,
        }
    }
}

/// Signals datastar sends with `@get`; present values win over plain parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListingSignals {
    pub search: Option<String>,
    pub category: Option<String>,
}

impl ListingSignals {
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// Machine-readable result row for the `query` command.
#[derive(Debug, Clone, Serialize)]
pub struct ListingHit {
    pub id: ItemId,
    pub title: String,
    pub category: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct QueryReport {
    pub listing: ListingKind,
    pub filter: FilterState,
    pub total: usize,
    pub hits: Vec<ListingHit>,
}

#[derive(Clone)]
pub struct ListingService {
    content: Arc<SiteContent>,
}

impl ListingService {
    pub fn new(content: Arc<SiteContent>) -> Self {
        Self { content }
    }

    pub fn listing(
        &self,
        kind: ListingKind,
        filter: &FilterState,
        locale: Locale,
    ) -> Result<ListingContext, HttpError> {
        match kind {
            ListingKind::Blog => build_listing(&self.content.blog, kind, filter, locale),
            ListingKind::Insights => build_listing(&self.content.insights, kind, filter, locale),
            ListingKind::CaseStudies => {
                build_listing(&self.content.case_studies, kind, filter, locale)
            }
            ListingKind::Projects => build_listing(&self.content.projects, kind, filter, locale),
        }
    }

    pub fn results(
        &self,
        kind: ListingKind,
        filter: &FilterState,
        locale: Locale,
    ) -> ListingResultsView {
        match kind {
            ListingKind::Blog => build_results(&self.content.blog, kind, filter, locale),
            ListingKind::Insights => build_results(&self.content.insights, kind, filter, locale),
            ListingKind::CaseStudies => {
                build_results(&self.content.case_studies, kind, filter, locale)
            }
            ListingKind::Projects => build_results(&self.content.projects, kind, filter, locale),
        }
    }

    /// Category tabs and tag toggles for the current filter.
    pub fn filters(
        &self,
        kind: ListingKind,
        filter: &FilterState,
        locale: Locale,
    ) -> ListingFiltersView {
        match kind {
            ListingKind::Blog => build_filters(&self.content.blog, kind, filter, locale),
            ListingKind::Insights => build_filters(&self.content.insights, kind, filter, locale),
            ListingKind::CaseStudies => {
                build_filters(&self.content.case_studies, kind, filter, locale)
            }
            ListingKind::Projects => build_filters(&self.content.projects, kind, filter, locale),
        }
    }

    pub fn detail(&self, kind: ListingKind, id: ItemId, locale: Locale) -> Option<DetailContext> {
        match kind {
            ListingKind::Blog => self.content.blog.get(id).map(|item| item.detail(kind, locale)),
            ListingKind::Insights => self
                .content
                .insights
                .get(id)
                .map(|item| item.detail(kind, locale)),
            ListingKind::CaseStudies => self
                .content
                .case_studies
                .get(id)
                .map(|item| item.detail(kind, locale)),
            ListingKind::Projects => self
                .content
                .projects
                .get(id)
                .map(|item| item.detail(kind, locale)),
        }
    }

    /// The first `limit` insights, for the home page.
    pub fn featured(&self, locale: Locale, limit: usize) -> Vec<ItemCard> {
        self.content
            .insights
            .items()
            .iter()
            .take(limit)
            .map(|item| item.card(ListingKind::Insights, locale))
            .collect()
    }

    pub fn query(&self, kind: ListingKind, filter: FilterState) -> QueryReport {
        let (total, hits) = match kind {
            ListingKind::Blog => collect_hits(&self.content.blog, kind, &filter),
            ListingKind::Insights => collect_hits(&self.content.insights, kind, &filter),
            ListingKind::CaseStudies => collect_hits(&self.content.case_studies, kind, &filter),
            ListingKind::Projects => collect_hits(&self.content.projects, kind, &filter),
        };

        QueryReport {
            listing: kind,
            filter,
            total,
            hits,
        }
    }
}

/// Patch the results and the filter links, then mirror the filter into the
/// address bar.
pub fn build_datastar_results_response(
    kind: ListingKind,
    filter: &FilterState,
    results: ListingResultsView,
    filters: ListingFiltersView,
) -> Result<Response, HttpError> {
    let results_html = render_fragment(ListingResultsPartial { results })?;
    let filters_html = render_fragment(ListingFiltersPartial { filters })?;

    let mut stream = StreamBuilder::new();
    stream
        .push_patch(results_html, RESULTS_SELECTOR, ElementPatchMode::Outer)
        .push_patch(filters_html, FILTERS_SELECTOR, ElementPatchMode::Outer)
        .push_replace_url(&filter.href(kind.path()));

    Ok(stream.into_response())
}

fn build_listing<T: CardSource>(
    store: &ContentStore<T>,
    kind: ListingKind,
    filter: &FilterState,
    locale: Locale,
) -> Result<ListingContext, HttpError> {
    let path = kind.path();
    let results = build_results(store, kind, filter, locale);
    let results_html = render_fragment(ListingResultsPartial {
        results: results.clone(),
    })?;

    let filters = build_filters(store, kind, filter, locale);
    let filters_html = render_fragment(ListingFiltersPartial {
        filters: filters.clone(),
    })?;

    // Category and search travel as signals; only tags ride on the endpoint URL.
    let endpoint_state = FilterState {
        tags: filter.tags.clone(),
        ..FilterState::default()
    };

    Ok(ListingContext {
        slug: kind.slug(),
        path,
        heading: translate(locale, kind.heading()).to_string(),
        intro: translate(locale, kind.intro()).to_string(),
        search_placeholder: translate(locale, Msg::ListingSearchPlaceholder).to_string(),
        search_button: translate(locale, Msg::ListingSearchButton).to_string(),
        search_value: filter.search.clone(),
        category_value: filter.category.as_param().unwrap_or_default().to_string(),
        selected_tags: filter.tags.iter().cloned().collect(),
        filters,
        filters_html,
        results_endpoint: endpoint_state.href(&kind.results_path()),
        results,
        results_html,
    })
}

fn build_filters<T: ListingItem>(
    store: &ContentStore<T>,
    kind: ListingKind,
    filter: &FilterState,
    locale: Locale,
) -> ListingFiltersView {
    let path = kind.path();

    let mut categories = vec![LinkView {
        label: translate(locale, Msg::ListingAllCategories).to_string(),
        href: filter.clone().with_category(CategoryFilter::All).href(path),
        is_active: filter.category.is_all(),
    }];
    categories.extend(store.categories().iter().map(|category| {
        let option = CategoryFilter::Only((*category).to_string());
        LinkView {
            label: (*category).to_string(),
            href: filter.clone().with_category(option.clone()).href(path),
            is_active: filter.category == option,
        }
    }));

    let tags = store
        .tag_vocabulary()
        .into_iter()
        .map(|tag| LinkView {
            label: tag.to_string(),
            href: filter.clone().toggle_tag(tag).href(path),
            is_active: filter.tags.contains(tag),
        })
        .collect();

    ListingFiltersView {
        label: translate(locale, kind.heading()).to_string(),
        categories,
        tags_label: translate(locale, Msg::ListingTags).to_string(),
        tags,
    }
}

fn build_results<T: CardSource>(
    store: &ContentStore<T>,
    kind: ListingKind,
    filter: &FilterState,
    locale: Locale,
) -> ListingResultsView {
    let matched = evaluate(store, filter);
    counter!(LISTING_QUERIES_METRIC, "listing" => kind.slug()).increment(1);

    let cards: Vec<ItemCard> = matched.iter().map(|item| item.card(kind, locale)).collect();

    let empty_state = (cards.is_empty() && filter.is_active()).then(|| EmptyStateView {
        title: translate(locale, Msg::EmptyTitle).to_string(),
        message: translate(locale, Msg::EmptyMessage).to_string(),
        clear_href: kind.path().to_string(),
        clear_label: translate(locale, Msg::EmptyClear).to_string(),
    });

    ListingResultsView {
        result_count: cards.len(),
        total_count: store.len(),
        of_label: translate(locale, Msg::ListingOf).to_string(),
        results_label: translate(locale, Msg::ListingResults).to_string(),
        cards,
        empty_state,
    }
}

fn collect_hits<T: ListingItem>(
    store: &ContentStore<T>,
    kind: ListingKind,
    filter: &FilterState,
) -> (usize, Vec<ListingHit>) {
    let hits: Vec<ListingHit> = evaluate(store, filter)
        .into_iter()
        .map(|item| ListingHit {
            id: item.id(),
            title: item.title().to_string(),
            category: item.category().to_string(),
            summary: item.summary().to_string(),
            tags: item.tags().iter().map(|tag| (*tag).to_string()).collect(),
        })
        .collect();
    counter!(LISTING_QUERIES_METRIC, "listing" => kind.slug()).increment(1);
    (store.len(), hits)
}

fn item_href(kind: ListingKind, id: ItemId) -> String {
    format!("{}/{id}", kind.path())
}

fn date_view(date: time::Date) -> DateView {
    DateView {
        iso: format_iso_date(date),
        human: format_human_date(date),
    }
}

fn read_time(minutes: u8, locale: Locale) -> String {
    format!("{minutes} {}", translate(locale, Msg::ListingMinRead))
}

/// Per-type presentation of a listed record.
trait CardSource: ListingItem {
    fn card(&self, kind: ListingKind, locale: Locale) -> ItemCard;
    fn detail(&self, kind: ListingKind, locale: Locale) -> DetailContext;
}

fn base_card<T: ListingItem>(item: &T, image: &str, kind: ListingKind, locale: Locale) -> ItemCard {
    ItemCard {
        href: item_href(kind, item.id()),
        title: item.title().to_string(),
        summary: item.summary().to_string(),
        category: item.category().to_string(),
        image: image_or_placeholder(image).to_string(),
        details: Vec::new(),
        date: None,
        tags: item.tags().iter().map(|tag| (*tag).to_string()).collect(),
        read_more: translate(locale, Msg::ListingReadMore).to_string(),
    }
}

fn base_detail<T: ListingItem>(
    item: &T,
    image: &str,
    kind: ListingKind,
    locale: Locale,
) -> DetailContext {
    DetailContext {
        back_href: kind.path().to_string(),
        back_label: translate(locale, Msg::ListingBack).to_string(),
        title: item.title().to_string(),
        category: item.category().to_string(),
        summary: item.summary().to_string(),
        image: image_or_placeholder(image).to_string(),
        date: None,
        facts: Vec::new(),
        tags: item.tags().iter().map(|tag| (*tag).to_string()).collect(),
    }
}

impl CardSource for BlogPost {
    fn card(&self, kind: ListingKind, locale: Locale) -> ItemCard {
        ItemCard {
            date: Some(date_view(self.date)),
            details: vec![
                format!("{} {}", translate(locale, Msg::ListingBy), self.author),
                read_time(self.read_minutes, locale),
            ],
            ..base_card(self, self.image, kind, locale)
        }
    }

    fn detail(&self, kind: ListingKind, locale: Locale) -> DetailContext {
        DetailContext {
            date: Some(date_view(self.date)),
            facts: vec![
                FactView {
                    label: translate(locale, Msg::ListingBy).to_string(),
                    value: self.author.to_string(),
                },
                FactView {
                    label: translate(locale, Msg::ListingMinRead).to_string(),
                    value: self.read_minutes.to_string(),
                },
            ],
            ..base_detail(self, self.image, kind, locale)
        }
    }
}

impl CardSource for Insight {
    fn card(&self, kind: ListingKind, locale: Locale) -> ItemCard {
        ItemCard {
            date: Some(date_view(self.date)),
            details: vec![read_time(self.read_minutes, locale)],
            ..base_card(self, self.image, kind, locale)
        }
    }

    fn detail(&self, kind: ListingKind, locale: Locale) -> DetailContext {
        DetailContext {
            date: Some(date_view(self.date)),
            facts: vec![FactView {
                label: translate(locale, Msg::ListingMinRead).to_string(),
                value: self.read_minutes.to_string(),
            }],
            ..base_detail(self, self.image, kind, locale)
        }
    }
}

impl CardSource for CaseStudy {
    fn card(&self, kind: ListingKind, locale: Locale) -> ItemCard {
        ItemCard {
            details: vec![format!(
                "{}: {}",
                translate(locale, Msg::ListingClient),
                self.client
            )],
            ..base_card(self, self.image, kind, locale)
        }
    }

    fn detail(&self, kind: ListingKind, locale: Locale) -> DetailContext {
        DetailContext {
            facts: vec![
                FactView {
                    label: translate(locale, Msg::ListingClient).to_string(),
                    value: self.client.to_string(),
                },
                FactView {
                    label: translate(locale, Msg::ListingOutcome).to_string(),
                    value: self.outcome.to_string(),
                },
            ],
            ..base_detail(self, self.image, kind, locale)
        }
    }
}

impl CardSource for Project {
    fn card(&self, kind: ListingKind, locale: Locale) -> ItemCard {
        ItemCard {
            details: vec![self.year.to_string()],
            ..base_card(self, self.image, kind, locale)
        }
    }

    fn detail(&self, kind: ListingKind, locale: Locale) -> DetailContext {
        DetailContext {
            facts: vec![FactView {
                label: translate(locale, Msg::ListingYear).to_string(),
                value: self.year.to_string(),
            }],
            ..base_detail(self, self.image, kind, locale)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::PLACEHOLDER_IMAGE_URL;

    fn service() -> ListingService {
        ListingService::new(Arc::new(SiteContent::load().expect("bundled content")))
    }

    fn filter(search: Option<&str>, category: Option<&str>, tags: &[&str]) -> FilterState {
        FilterState::new(search, category, tags.iter().map(|tag| tag.to_string()))
    }

    #[test]
    fn slugs_round_trip_through_paths() {
        for kind in ListingKind::ALL {
            assert_eq!(ListingKind::from_slug(kind.slug()), Some(kind));
            assert_eq!(kind.path(), format!("/{}", kind.slug()));
        }
        assert_eq!(ListingKind::from_slug("news"), None);
    }

    #[test]
    fn category_tabs_start_with_all() {
        let context = service()
            .listing(ListingKind::Blog, &filter(None, Some("Technology"), &[]), Locale::En)
            .expect("listing renders");
        assert_eq!(context.filters.categories[0].label, "All");
        assert!(!context.filters.categories[0].is_active);
        let active: Vec<&str> = context
            .filters
            .categories
            .iter()
            .filter(|tab| tab.is_active)
            .map(|tab| tab.label.as_str())
            .collect();
        assert_eq!(active, vec!["Technology"]);
        assert_eq!(context.results.result_count, 2);
        assert!(context.results_html.contains("listing-results"));
        assert!(context.filters_html.contains("listing-filters"));
    }

    #[test]
    fn filter_links_keep_the_search_text() {
        let filters = service().filters(
            ListingKind::Blog,
            &filter(Some("cloud"), None, &[]),
            Locale::En,
        );
        let technology = filters
            .categories
            .iter()
            .find(|tab| tab.label == "Technology")
            .expect("technology tab");
        assert_eq!(technology.href, "/blog?category=Technology&search=cloud");
        assert_eq!(filters.categories[0].href, "/blog?search=cloud");
    }

    #[test]
    fn only_projects_offer_tag_toggles() {
        let service = service();
        let blog = service
            .listing(ListingKind::Blog, &FilterState::default(), Locale::En)
            .expect("listing renders");
        assert!(blog.filters.tags.is_empty());

        let projects = service
            .listing(ListingKind::Projects, &filter(None, None, &["Growth"]), Locale::En)
            .expect("listing renders");
        let growth = projects
            .filters
            .tags
            .iter()
            .find(|tag| tag.label == "Growth")
            .expect("growth tag");
        assert!(growth.is_active);
        assert_eq!(growth.href, "/projects");
        assert_eq!(projects.results_endpoint, "/ui/listings/projects?tag=Growth");
    }

    #[test]
    fn empty_state_requires_active_filter() {
        let service = service();
        let results = service.results(
            ListingKind::Insights,
            &filter(Some("zzz-no-match"), None, &[]),
            Locale::En,
        );
        assert!(!results.has_results());
        let empty = results.empty_state.expect("empty state");
        assert_eq!(empty.clear_href, "/insights");

        let unfiltered = service.results(ListingKind::Insights, &FilterState::default(), Locale::En);
        assert!(unfiltered.empty_state.is_none());
    }

    #[test]
    fn missing_images_use_placeholder() {
        let results = service().results(ListingKind::Blog, &FilterState::default(), Locale::En);
        assert!(
            results
                .cards
                .iter()
                .any(|card| card.image == PLACEHOLDER_IMAGE_URL)
        );
    }

    #[test]
    fn detail_resolves_known_ids_only() {
        let service = service();
        let detail = service
            .detail(ListingKind::CaseStudies, 201, Locale::En)
            .expect("case study");
        assert_eq!(detail.back_href, "/case-studies");
        assert_eq!(detail.facts.len(), 2);
        assert!(service.detail(ListingKind::CaseStudies, 1, Locale::En).is_none());
    }

    #[test]
    fn query_report_lists_hits_in_store_order() {
        let report = service().query(
            ListingKind::Projects,
            filter(None, None, &["Strategy", "Growth"]),
        );
        let ids: Vec<ItemId> = report.hits.iter().map(|hit| hit.id).collect();
        assert_eq!(ids, vec![301]);
        assert_eq!(report.total, 8);
    }

    #[test]
    fn signals_parse_ignores_unknown_fields() {
        let signals = ListingSignals::parse(r#"{"search":"cloud","carouselSession":""}"#)
            .expect("valid json");
        assert_eq!(signals.search.as_deref(), Some("cloud"));
        assert!(signals.category.is_none());
        assert!(ListingSignals::parse("not json").is_none());
    }
}
