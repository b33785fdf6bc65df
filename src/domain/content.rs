//! Immutable, insertion-ordered content stores backing the listing pages.

use std::collections::HashSet;

use time::Date;

use super::data;
use super::error::DomainError;

pub type ItemId = u32;

/// Fixed placeholder shown whenever a stock image is missing or fails to load.
pub const PLACEHOLDER_IMAGE_URL: &str = "/static/placeholder.svg";

/// Fields the query predicate reads from a listed record.
///
/// Everything else on an item is presentational and never affects filtering.
pub trait ListingItem {
    fn id(&self) -> ItemId;
    fn title(&self) -> &str;
    fn summary(&self) -> &str;
    fn category(&self) -> &str;

    fn tags(&self) -> &[&'static str] {
        &[]
    }

    fn author(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct BlogPost {
    pub id: ItemId,
    pub title: &'static str,
    pub excerpt: &'static str,
    pub category: &'static str,
    pub author: &'static str,
    pub date: Date,
    pub read_minutes: u8,
    pub image: &'static str,
}

#[derive(Debug, Clone)]
pub struct Insight {
    pub id: ItemId,
    pub title: &'static str,
    pub excerpt: &'static str,
    pub category: &'static str,
    pub date: Date,
    pub read_minutes: u8,
    pub image: &'static str,
}

#[derive(Debug, Clone)]
pub struct CaseStudy {
    pub id: ItemId,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub client: &'static str,
    pub outcome: &'static str,
    pub image: &'static str,
}

#[derive(Debug, Clone)]
pub struct Project {
    pub id: ItemId,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub tags: &'static [&'static str],
    pub year: u16,
    pub image: &'static str,
}

#[derive(Debug, Clone)]
pub struct Testimonial {
    pub id: ItemId,
    pub quote: &'static str,
    pub name: &'static str,
    pub role: &'static str,
    pub company: &'static str,
}

impl ListingItem for BlogPost {
    fn id(&self) -> ItemId {
        self.id
    }

    fn title(&self) -> &str {
        self.title
    }

    fn summary(&self) -> &str {
        self.excerpt
    }

    fn category(&self) -> &str {
        self.category
    }

    fn author(&self) -> Option<&str> {
        Some(self.author)
    }
}

impl ListingItem for Insight {
    fn id(&self) -> ItemId {
        self.id
    }

    fn title(&self) -> &str {
        self.title
    }

    fn summary(&self) -> &str {
        self.excerpt
    }

    fn category(&self) -> &str {
        self.category
    }
}

impl ListingItem for CaseStudy {
    fn id(&self) -> ItemId {
        self.id
    }

    fn title(&self) -> &str {
        self.title
    }

    fn summary(&self) -> &str {
        self.description
    }

    fn category(&self) -> &str {
        self.category
    }
}

impl ListingItem for Project {
    fn id(&self) -> ItemId {
        self.id
    }

    fn title(&self) -> &str {
        self.title
    }

    fn summary(&self) -> &str {
        self.description
    }

    fn category(&self) -> &str {
        self.category
    }

    fn tags(&self) -> &[&'static str] {
        self.tags
    }
}

/// Read-only collection of records for one listing page.
#[derive(Debug, Clone)]
pub struct ContentStore<T> {
    categories: &'static [&'static str],
    items: Vec<T>,
}

impl<T: ListingItem> ContentStore<T> {
    /// Build a store, rejecting any id that appears twice.
    pub fn new(
        name: &'static str,
        categories: &'static [&'static str],
        items: Vec<T>,
    ) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id()) {
                return Err(DomainError::duplicate_id(name, item.id()));
            }
        }

        Ok(Self { categories, items })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn categories(&self) -> &'static [&'static str] {
        self.categories
    }

    pub fn get(&self, id: ItemId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct tags across the store, in first-seen order.
    pub fn tag_vocabulary(&self) -> Vec<&'static str> {
        let mut seen = HashSet::new();
        let mut tags = Vec::new();
        for item in &self.items {
            for tag in item.tags() {
                if seen.insert(*tag) {
                    tags.push(*tag);
                }
            }
        }
        tags
    }
}

/// Every content store the site serves, built once at startup.
#[derive(Debug)]
pub struct SiteContent {
    pub blog: ContentStore<BlogPost>,
    pub insights: ContentStore<Insight>,
    pub case_studies: ContentStore<CaseStudy>,
    pub projects: ContentStore<Project>,
    pub testimonials: Vec<Testimonial>,
}

impl SiteContent {
    pub fn load() -> Result<Self, DomainError> {
        let testimonials = data::testimonials();
        if testimonials.is_empty() {
            return Err(DomainError::invariant("testimonial rotation requires content"));
        }

        Ok(Self {
            blog: ContentStore::new("blog", data::BLOG_CATEGORIES, data::blog_posts())?,
            insights: ContentStore::new("insights", data::INSIGHT_CATEGORIES, data::insights())?,
            case_studies: ContentStore::new(
                "case_studies",
                data::CASE_STUDY_CATEGORIES,
                data::case_studies(),
            )?,
            projects: ContentStore::new("projects", data::PROJECT_CATEGORIES, data::projects())?,
            testimonials,
        })
    }
}

/// Resolve an item image, substituting the placeholder for blank URLs.
pub fn image_or_placeholder(url: &str) -> &str {
    if url.trim().is_empty() {
        PLACEHOLDER_IMAGE_URL
    } else {
        url
    }
}
