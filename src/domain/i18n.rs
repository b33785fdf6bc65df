//! Typed message catalog.
//!
//! Every message is a [`Msg`] variant declared together with its dot-path key and
//! English text, so a missing translation cannot compile. French and Spanish are
//! accepted locales but currently reuse the English catalog.

use std::borrow::Cow;

use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
    Es,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Fr, Locale::Es];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
            Self::Es => "es",
        }
    }

    pub const fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Fr => "Français",
            Self::Es => "Español",
        }
    }

    /// Parse a language tag, ignoring case and any region suffix (`fr-CA` -> `Fr`).
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        let language = normalized.split(['-', '_']).next().unwrap_or_default();
        match language {
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// Pick the highest-weighted supported language from an `Accept-Language` header.
    pub fn from_accept_language(header: &str) -> Option<Self> {
        let mut candidates: Vec<(u16, usize, Locale)> = header
            .split(',')
            .enumerate()
            .filter_map(|(position, entry)| {
                let mut parts = entry.split(';');
                let tag = parts.next()?.trim();
                let weight = parts
                    .find_map(|param| param.trim().strip_prefix("q="))
                    .map(parse_quality)
                    .unwrap_or(1000);
                let locale = Locale::parse(tag)?;
                (weight > 0).then_some((weight, position, locale))
            })
            .collect();

        candidates.sort_by(|left, right| right.0.cmp(&left.0).then(left.1.cmp(&right.1)));
        candidates.first().map(|(_, _, locale)| *locale)
    }

    /// Catalog backing this locale.
    fn catalog(self) -> Catalog {
        match self {
            Self::En | Self::Fr | Self::Es => Catalog::English,
        }
    }
}

fn parse_quality(raw: &str) -> u16 {
    raw.trim()
        .parse::<f32>()
        .map(|value| (value.clamp(0.0, 1.0) * 1000.0).round() as u16)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy)]
enum Catalog {
    English,
}

macro_rules! messages {
    ($($variant:ident => $key:literal: $english:literal,)+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Msg {
            $($variant,)+
        }

        impl Msg {
            pub const ALL: &'static [Msg] = &[$(Msg::$variant,)+];

            /// Dot-path key, e.g. `nav.home`.
            pub const fn key(self) -> &'static str {
                match self {
                    $(Msg::$variant => $key,)+
                }
            }

            const fn english(self) -> &'static str {
                match self {
                    $(Msg::$variant => $english,)+
                }
            }
        }
    };
}

messages! {
    SiteName => "site.name": "Vantage Advisory",
    SiteTagline => "site.tagline": "Strategy and transformation partners for ambitious organizations.",
    FooterCopy => "footer.copy": "© Vantage Advisory. All rights reserved.",
    FooterLanguage => "footer.language": "Language",
    NavHome => "nav.home": "Home",
    NavAbout => "nav.about": "About",
    NavServices => "nav.services": "Services",
    NavIndustries => "nav.industries": "Industries",
    NavInsights => "nav.insights": "Insights",
    NavBlog => "nav.blog": "Blog",
    NavCaseStudies => "nav.caseStudies": "Case Studies",
    NavProjects => "nav.projects": "Projects",
    NavCareers => "nav.careers": "Careers",
    NavContact => "nav.contact": "Contact",
    HomeHeroTitle => "home.hero.title": "Clarity for the decisions that shape your next decade",
    HomeHeroSubtitle => "home.hero.subtitle": "We help leadership teams set direction, redesign how work gets done, and deliver change that lasts.",
    HomeHeroCta => "home.hero.cta": "Start a conversation",
    HomeFeaturedInsights => "home.featured.insights": "Latest insights",
    HomeTestimonials => "home.testimonials.title": "What our clients say",
    CarouselNext => "carousel.next": "Next testimonial",
    CarouselPrevious => "carousel.previous": "Previous testimonial",
    AboutTitle => "about.title": "About Vantage",
    AboutBody => "about.body": "Founded by former operators, Vantage Advisory pairs senior strategic judgment with hands-on delivery. Our teams stay with clients from the first diagnostic to the last handover.",
    AboutValues => "about.values": "Independent advice. Evidence over opinion. Capability that stays after we leave.",
    ServicesTitle => "services.title": "Services",
    ServicesIntro => "services.intro": "Four practices, one integrated team.",
    ServiceStrategy => "services.strategy.title": "Strategy",
    ServiceStrategyBody => "services.strategy.body": "Corporate and business-unit strategy, portfolio choices, and growth plans.",
    ServiceOperations => "services.operations.title": "Operations",
    ServiceOperationsBody => "services.operations.body": "Operating model design, lean transformation, and supply chain resilience.",
    ServiceTechnology => "services.technology.title": "Technology",
    ServiceTechnologyBody => "services.technology.body": "Technology strategy, data platforms, and large program delivery.",
    ServicePeople => "services.people.title": "People & Organization",
    ServicePeopleBody => "services.people.body": "Leadership alignment, culture, and workforce planning.",
    IndustriesTitle => "industries.title": "Industries",
    IndustriesIntro => "industries.intro": "Deep sector experience across regulated and asset-intensive industries.",
    IndustriesCaseStudies => "industries.caseStudies": "case studies",
    CareersTitle => "careers.title": "Careers",
    CareersBody => "careers.body": "Join a firm where consultants own client outcomes from day one. We hire analysts, consultants, and experienced specialists year round.",
    CareersCta => "careers.cta": "Send us your profile",
    BlogTitle => "blog.title": "Blog",
    BlogIntro => "blog.intro": "Perspectives from our consultants on strategy, operations, and leadership.",
    InsightsTitle => "insights.title": "Insights",
    InsightsIntro => "insights.intro": "Research and analysis on the forces reshaping industries.",
    CaseStudiesTitle => "caseStudies.title": "Case Studies",
    CaseStudiesIntro => "caseStudies.intro": "How we have helped clients deliver measurable results.",
    ProjectsTitle => "projects.title": "Projects",
    ProjectsIntro => "projects.intro": "A selection of recent engagements.",
    ListingSearchPlaceholder => "listing.search.placeholder": "Search...",
    ListingSearchButton => "listing.search.button": "Search",
    ListingAllCategories => "listing.categories.all": "All",
    ListingTags => "listing.tags": "Filter by tag",
    ListingResults => "listing.results": "results",
    ListingOf => "listing.of": "of",
    ListingReadMore => "listing.readMore": "Read more",
    ListingMinRead => "listing.minRead": "min read",
    ListingBy => "listing.by": "By",
    ListingClient => "listing.client": "Client",
    ListingOutcome => "listing.outcome": "Outcome",
    ListingYear => "listing.year": "Year",
    ListingBack => "listing.back": "Back to listing",
    EmptyTitle => "listing.empty.title": "No results found",
    EmptyMessage => "listing.empty.message": "Try adjusting your search or filters to find what you are looking for.",
    EmptyClear => "listing.empty.clear": "Clear filters",
    ContactTitle => "contact.title": "Contact us",
    ContactIntro => "contact.intro": "Tell us about your challenge and a partner will reply within two business days.",
    ContactEmail => "contact.email": "Email",
    ContactMessage => "contact.message": "Message",
    ContactSubmit => "contact.submit": "Send message",
    ContactSuccess => "contact.success": "Thank you. We will be in touch shortly.",
    ContactInvalidEmail => "contact.error.email": "Please enter a valid email address.",
    ContactMessageTooShort => "contact.error.message": "Your message must be at least 10 characters long.",
    ContactRateLimited => "contact.error.rateLimited": "Too many messages. Please try again later.",
    NotFoundTitle => "notFound.title": "Page not found",
    NotFoundMessage => "notFound.message": "The page you requested does not exist.",
    NotFoundBack => "notFound.back": "Back to home",
}

impl Msg {
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|msg| msg.key() == path)
    }
}

fn resolve(catalog: Catalog, msg: Msg) -> &'static str {
    match catalog {
        Catalog::English => msg.english(),
    }
}

/// Text for `msg` in `locale`.
pub fn translate(locale: Locale, msg: Msg) -> &'static str {
    resolve(locale.catalog(), msg)
}

/// Resolve a dot-path key at runtime, falling back to `default` and then to the
/// key itself.
pub fn lookup_path<'a>(locale: Locale, path: &'a str, default: Option<&'a str>) -> Cow<'a, str> {
    match Msg::from_path(path) {
        Some(msg) => Cow::Borrowed(translate(locale, msg)),
        None => Cow::Borrowed(default.unwrap_or(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_are_unique() {
        let keys: HashSet<&str> = Msg::ALL.iter().map(|msg| msg.key()).collect();
        assert_eq!(keys.len(), Msg::ALL.len());
    }

    #[test]
    fn aliased_locales_share_english_text() {
        for msg in Msg::ALL {
            assert_eq!(translate(Locale::Fr, *msg), translate(Locale::En, *msg));
            assert_eq!(translate(Locale::Es, *msg), translate(Locale::En, *msg));
        }
    }

    #[test]
    fn path_lookup_falls_back_to_default_then_key() {
        assert_eq!(lookup_path(Locale::En, "nav.home", None), "Home");
        assert_eq!(
            lookup_path(Locale::En, "nav.missing", Some("Fallback")),
            "Fallback"
        );
        assert_eq!(lookup_path(Locale::En, "nav.missing", None), "nav.missing");
    }

    #[test]
    fn parses_language_tags() {
        assert_eq!(Locale::parse("fr-CA"), Some(Locale::Fr));
        assert_eq!(Locale::parse("ES"), Some(Locale::Es));
        assert_eq!(Locale::parse("de"), None);
    }

    #[test]
    fn accept_language_prefers_weight_then_order() {
        assert_eq!(
            Locale::from_accept_language("de-DE,fr;q=0.8,es;q=0.9"),
            Some(Locale::Es)
        );
        assert_eq!(
            Locale::from_accept_language("es-MX, en-US"),
            Some(Locale::Es)
        );
        assert_eq!(Locale::from_accept_language("de, ja"), None);
        assert_eq!(Locale::from_accept_language("fr;q=0, en;q=0.1"), Some(Locale::En));
    }
}
