//! Filter state, the per-item predicate, and the order-preserving evaluator shared
//! by every listing page.

use std::collections::BTreeSet;

use serde::Serialize;

use super::content::{ContentStore, ListingItem};

/// Literal some listing URLs use to mean "every category".
pub const ALL_CATEGORIES_LITERAL: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Interpret a raw `?category=` value. Absent, blank, and the `All` literal all
    /// mean no restriction.
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some(ALL_CATEGORIES_LITERAL) => Self::All,
            Some(category) => Self::Only(category.to_string()),
        }
    }

    pub fn as_param(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(category) => Some(category.as_str()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    fn admits(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == category,
        }
    }
}

/// View-local selections for one listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub search: String,
    pub category: CategoryFilter,
    pub tags: BTreeSet<String>,
}

impl FilterState {
    pub fn new(
        search: Option<&str>,
        category: Option<&str>,
        tags: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            search: search.unwrap_or_default().to_string(),
            category: CategoryFilter::from_param(category),
            tags: tags
                .into_iter()
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Flip membership of `tag` in the selected set.
    pub fn toggle_tag(mut self, tag: &str) -> Self {
        if !self.tags.remove(tag) {
            self.tags.insert(tag.to_string());
        }
        self
    }

    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || !self.category.is_all() || !self.tags.is_empty()
    }

    /// Query string mirroring this state (`category`, `search`, repeated `tag`).
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        if let Some(category) = self.category.as_param() {
            serializer.append_pair("category", category);
        }
        if !self.search.is_empty() {
            serializer.append_pair("search", &self.search);
        }
        for tag in &self.tags {
            serializer.append_pair("tag", tag);
        }
        serializer.finish()
    }

    /// `path` with this state's query string appended when any filter is set.
    pub fn href(&self, path: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        }
    }
}

/// Decide whether `item` belongs in the result for `filter`.
pub fn matches<T: ListingItem + ?Sized>(item: &T, filter: &FilterState) -> bool {
    filter.category.admits(item.category())
        && tags_match(item, &filter.tags)
        && text_matches(item, &filter.search)
}

fn tags_match<T: ListingItem + ?Sized>(item: &T, selected: &BTreeSet<String>) -> bool {
    let tags = item.tags();
    selected
        .iter()
        .all(|wanted| tags.iter().any(|tag| *tag == wanted.as_str()))
}

fn text_matches<T: ListingItem + ?Sized>(item: &T, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    let contains = |field: &str| field.to_lowercase().contains(&needle);

    contains(item.title())
        || contains(item.summary())
        || contains(item.category())
        || item.tags().iter().any(|tag| contains(tag))
        || item.author().is_some_and(contains)
}

/// Apply the predicate across `store`, keeping store order.
pub fn evaluate<'a, T: ListingItem>(store: &'a ContentStore<T>, filter: &FilterState) -> Vec<&'a T> {
    store
        .items()
        .iter()
        .filter(|item| matches(*item, filter))
        .collect()
}
