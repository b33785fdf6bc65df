use crate::domain::i18n::{Locale, Msg, translate};
use crate::presentation::views::{
    BrandView, FooterView, LayoutChrome, LinkView, NavigationView, PageMetaView,
};

const NAVIGATION: &[(Msg, &str)] = &[
    (Msg::NavHome, "/"),
    (Msg::NavAbout, "/about"),
    (Msg::NavServices, "/services"),
    (Msg::NavIndustries, "/industries"),
    (Msg::NavInsights, "/insights"),
    (Msg::NavBlog, "/blog"),
    (Msg::NavCaseStudies, "/case-studies"),
    (Msg::NavProjects, "/projects"),
    (Msg::NavCareers, "/careers"),
    (Msg::NavContact, "/contact"),
];

/// Builds the header, footer, and meta shared by every full page.
#[derive(Clone)]
pub struct ChromeService {
    public_url: String,
}

impl ChromeService {
    pub fn new(public_url: impl Into<String>) -> Self {
        Self {
            public_url: public_url.into(),
        }
    }

    /// `current` is the page's path, optionally followed by its query string.
    pub fn load(&self, locale: Locale, current: &str) -> LayoutChrome {
        let (current_path, query) = current.split_once('?').unwrap_or((current, ""));

        let entries = NAVIGATION
            .iter()
            .map(|(msg, href)| LinkView {
                label: translate(locale, *msg).to_string(),
                href: (*href).to_string(),
                is_active: is_active_path(href, current_path),
            })
            .collect();

        let languages = Locale::ALL
            .iter()
            .map(|candidate| LinkView {
                label: candidate.native_name().to_string(),
                href: language_href(current_path, query, *candidate),
                is_active: *candidate == locale,
            })
            .collect();

        LayoutChrome {
            locale,
            brand: BrandView {
                title: translate(locale, Msg::SiteName).to_string(),
                tagline: translate(locale, Msg::SiteTagline).to_string(),
                href: "/".to_string(),
            },
            navigation: NavigationView { entries },
            footer: FooterView {
                copy: translate(locale, Msg::FooterCopy).to_string(),
                language_label: translate(locale, Msg::FooterLanguage).to_string(),
                languages,
            },
            meta: PageMetaView {
                title: translate(locale, Msg::SiteName).to_string(),
                description: translate(locale, Msg::SiteTagline).to_string(),
                canonical: self.canonical_url(current_path),
            },
        }
    }

    /// Absolute URL for `path` under the configured public root.
    pub fn canonical_url(&self, path: &str) -> String {
        let trimmed = path.trim_start_matches('/');
        format!("{}{}", self.public_url, trimmed)
    }
}

/// Same page and query, with only `lang` replaced.
fn language_href(path: &str, query: &str, locale: Locale) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    serializer.extend_pairs(
        url::form_urlencoded::parse(query.as_bytes()).filter(|(key, _)| key != "lang"),
    );
    serializer.append_pair("lang", locale.as_str());
    format!("{path}?{}", serializer.finish())
}

fn is_active_path(href: &str, current: &str) -> bool {
    if href == "/" {
        return current == "/";
    }
    current == href
        || current
            .strip_prefix(href)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_section_active_for_detail_pages() {
        let chrome = ChromeService::new("https://vantage.example/").load(Locale::En, "/blog/3");
        let active: Vec<&str> = chrome
            .navigation
            .entries
            .iter()
            .filter(|entry| entry.is_active)
            .map(|entry| entry.href.as_str())
            .collect();
        assert_eq!(active, vec!["/blog"]);
        assert_eq!(chrome.meta.canonical, "https://vantage.example/blog/3");
    }

    #[test]
    fn language_links_keep_current_path() {
        let chrome = ChromeService::new("http://localhost:3000/").load(Locale::Fr, "/about");
        let french = chrome
            .footer
            .languages
            .iter()
            .find(|link| link.is_active)
            .expect("active language");
        assert_eq!(french.href, "/about?lang=fr");
        assert_eq!(chrome.footer.languages.len(), 3);
    }

    #[test]
    fn language_links_keep_active_filters() {
        let chrome = ChromeService::new("http://localhost:3000/")
            .load(Locale::En, "/blog?category=Technology&search=cloud&lang=es");
        let hrefs: Vec<&str> = chrome
            .footer
            .languages
            .iter()
            .map(|link| link.href.as_str())
            .collect();
        assert_eq!(
            hrefs,
            vec![
                "/blog?category=Technology&search=cloud&lang=en",
                "/blog?category=Technology&search=cloud&lang=fr",
                "/blog?category=Technology&search=cloud&lang=es",
            ]
        );
        assert_eq!(chrome.meta.canonical, "http://localhost:3000/blog");
        assert!(
            chrome
                .navigation
                .entries
                .iter()
                .any(|entry| entry.href == "/blog" && entry.is_active)
        );
    }

    #[test]
    fn home_is_only_active_on_root() {
        assert!(is_active_path("/", "/"));
        assert!(!is_active_path("/", "/about"));
        assert!(!is_active_path("/blog", "/blogroll"));
    }
}
