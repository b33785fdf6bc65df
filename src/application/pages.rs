use std::sync::Arc;

use crate::application::carousel::CarouselHub;
use crate::application::error::HttpError;
use crate::application::listing::ListingService;
use crate::domain::carousel::CarouselState;
use crate::domain::content::SiteContent;
use crate::domain::data::CASE_STUDY_CATEGORIES;
use crate::domain::i18n::{Locale, Msg, translate};
use crate::domain::query::{FilterState, evaluate};
use crate::presentation::views::{
    ContactPageView, ContentPageView, FormStatusView, HomeContext, LinkView, SectionView,
    TestimonialsView,
};

const FEATURED_INSIGHTS: usize = 3;
const SERVICES: &[(Msg, Msg)] = &[
    (Msg::ServiceStrategy, Msg::ServiceStrategyBody),
    (Msg::ServiceOperations, Msg::ServiceOperationsBody),
    (Msg::ServiceTechnology, Msg::ServiceTechnologyBody),
    (Msg::ServicePeople, Msg::ServicePeopleBody),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentPage {
    About,
    Services,
    Industries,
    Careers,
}

impl ContentPage {
    pub const fn path(self) -> &'static str {
        match self {
            Self::About => "/about",
            Self::Services => "/services",
            Self::Industries => "/industries",
            Self::Careers => "/careers",
        }
    }
}

/// What the contact page echoes back after a form post.
#[derive(Debug, Clone, Default)]
pub struct ContactFormState {
    pub email: String,
    pub message: String,
    pub status: Option<(bool, String)>,
}

#[derive(Clone)]
pub struct PageService {
    content: Arc<SiteContent>,
    listings: ListingService,
    carousel: Arc<CarouselHub>,
}

impl PageService {
    pub fn new(
        content: Arc<SiteContent>,
        listings: ListingService,
        carousel: Arc<CarouselHub>,
    ) -> Self {
        Self {
            content,
            listings,
            carousel,
        }
    }

    pub fn home(&self, locale: Locale) -> Result<HomeContext, HttpError> {
        let slide_html = self
            .carousel
            .render_slide(CarouselState::Idle { index: 0 })?;

        Ok(HomeContext {
            hero_title: translate(locale, Msg::HomeHeroTitle).to_string(),
            hero_subtitle: translate(locale, Msg::HomeHeroSubtitle).to_string(),
            hero_cta: LinkView {
                label: translate(locale, Msg::HomeHeroCta).to_string(),
                href: "/contact".to_string(),
                is_active: false,
            },
            services_heading: translate(locale, Msg::ServicesTitle).to_string(),
            services: services(locale),
            featured_heading: translate(locale, Msg::HomeFeaturedInsights).to_string(),
            featured: self.listings.featured(locale, FEATURED_INSIGHTS),
            testimonials: TestimonialsView {
                heading: translate(locale, Msg::HomeTestimonials).to_string(),
                slide_html,
                next_label: translate(locale, Msg::CarouselNext).to_string(),
                previous_label: translate(locale, Msg::CarouselPrevious).to_string(),
                stream_href: "/ui/testimonials/stream".to_string(),
            },
        })
    }

    pub fn content_page(&self, page: ContentPage, locale: Locale) -> ContentPageView {
        let text = |msg| translate(locale, msg).to_string();

        match page {
            ContentPage::About => ContentPageView {
                title: text(Msg::AboutTitle),
                intro: text(Msg::AboutBody),
                paragraphs: vec![text(Msg::AboutValues)],
                sections: Vec::new(),
                cta: Some(contact_link(locale)),
            },
            ContentPage::Services => ContentPageView {
                title: text(Msg::ServicesTitle),
                intro: text(Msg::ServicesIntro),
                paragraphs: Vec::new(),
                sections: services(locale),
                cta: Some(contact_link(locale)),
            },
            ContentPage::Industries => ContentPageView {
                title: text(Msg::IndustriesTitle),
                intro: text(Msg::IndustriesIntro),
                paragraphs: Vec::new(),
                sections: self.industries(locale),
                cta: Some(LinkView {
                    label: text(Msg::NavCaseStudies),
                    href: "/case-studies".to_string(),
                    is_active: false,
                }),
            },
            ContentPage::Careers => ContentPageView {
                title: text(Msg::CareersTitle),
                intro: text(Msg::CareersBody),
                paragraphs: Vec::new(),
                sections: Vec::new(),
                cta: Some(LinkView {
                    label: text(Msg::CareersCta),
                    href: "/contact".to_string(),
                    is_active: false,
                }),
            },
        }
    }

    pub fn contact(&self, locale: Locale, form: ContactFormState) -> ContactPageView {
        ContactPageView {
            title: translate(locale, Msg::ContactTitle).to_string(),
            intro: translate(locale, Msg::ContactIntro).to_string(),
            email_label: translate(locale, Msg::ContactEmail).to_string(),
            message_label: translate(locale, Msg::ContactMessage).to_string(),
            submit_label: translate(locale, Msg::ContactSubmit).to_string(),
            email_value: form.email,
            message_value: form.message,
            status: form
                .status
                .map(|(is_success, text)| FormStatusView { is_success, text }),
        }
    }

    fn industries(&self, locale: Locale) -> Vec<SectionView> {
        let label = translate(locale, Msg::IndustriesCaseStudies);
        CASE_STUDY_CATEGORIES
            .iter()
            .map(|industry| {
                let filter = FilterState::new(None, Some(*industry), Vec::new());
                let count = evaluate(&self.content.case_studies, &filter).len();
                SectionView {
                    title: (*industry).to_string(),
                    body: format!("{count} {label}"),
                }
            })
            .collect()
    }
}

fn services(locale: Locale) -> Vec<SectionView> {
    SERVICES
        .iter()
        .map(|(title, body)| SectionView {
            title: translate(locale, *title).to_string(),
            body: translate(locale, *body).to_string(),
        })
        .collect()
}

fn contact_link(locale: Locale) -> LinkView {
    LinkView {
        label: translate(locale, Msg::HomeHeroCta).to_string(),
        href: "/contact".to_string(),
        is_active: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CarouselSettings;

    fn service() -> PageService {
        let content = Arc::new(SiteContent::load().expect("bundled content"));
        let hub = Arc::new(CarouselHub::new(
            CarouselSettings::default(),
            content.testimonials.clone(),
        ));
        PageService::new(content.clone(), ListingService::new(content), hub)
    }

    #[test]
    fn home_features_three_insights_and_first_testimonial() {
        let home = service().home(Locale::En).expect("home renders");
        assert_eq!(home.featured.len(), 3);
        assert!(home.testimonials.slide_html.contains("testimonial-slide"));
        assert!(home.testimonials.slide_html.contains("Margaret Lindqvist"));
    }

    #[test]
    fn industries_count_case_studies_per_sector() {
        let page = service().content_page(ContentPage::Industries, Locale::En);
        let finance = page
            .sections
            .iter()
            .find(|section| section.title == "Financial Services")
            .expect("sector");
        assert_eq!(finance.body, "2 case studies");
    }

    #[test]
    fn contact_echoes_form_state() {
        let view = service().contact(
            Locale::En,
            ContactFormState {
                email: "a@b.co".to_string(),
                message: "hi".to_string(),
                status: Some((false, "nope".to_string())),
            },
        );
        assert_eq!(view.email_value, "a@b.co");
        assert!(!view.status.expect("status").is_success);
    }
}
