//! Static site content. Each array is the full, ordered content of one listing.

use time::macros::date;

use super::content::{BlogPost, CaseStudy, Insight, Project, Testimonial};

pub const BLOG_CATEGORIES: &[&str] = &[
    "Strategy",
    "Technology",
    "Operations",
    "Leadership",
    "Sustainability",
];

pub const INSIGHT_CATEGORIES: &[&str] = &[
    "Digital Transformation",
    "Market Analysis",
    "Risk",
    "People",
];

pub const CASE_STUDY_CATEGORIES: &[&str] = &[
    "Financial Services",
    "Healthcare",
    "Manufacturing",
    "Retail",
    "Energy",
];

pub const PROJECT_CATEGORIES: &[&str] = &["Advisory", "Implementation", "Research"];

static BLOG_POSTS: [BlogPost; 8] = [
    BlogPost {
        id: 1,
        title: "Strategic Planning for an Uncertain Decade",
        excerpt: "Scenario planning beats point forecasts when interest rates, supply chains, and regulation all move at once.",
        category: "Strategy",
        author: "Helena Marsh",
        date: date!(2024 - 03 - 15),
        read_minutes: 7,
        image: "https://images.unsplash.com/photo-1552664730-d307ca884978?w=1200",
    },
    BlogPost {
        id: 2,
        title: "What Cloud Migration Really Costs",
        excerpt: "License savings are the smallest line in the business case. Operating model changes decide the return.",
        category: "Technology",
        author: "Daniel Okafor",
        date: date!(2024 - 02 - 28),
        read_minutes: 9,
        image: "https://images.unsplash.com/photo-1451187580459-43490279c0fa?w=1200",
    },
    BlogPost {
        id: 3,
        title: "Lean Operations Without the Burnout",
        excerpt: "Continuous improvement programs stall when they only measure throughput. Add a capacity metric and they stick.",
        category: "Operations",
        author: "Priya Raman",
        date: date!(2024 - 02 - 10),
        read_minutes: 6,
        image: "https://images.unsplash.com/photo-1581091226825-a6a2a5aee158?w=1200",
    },
    BlogPost {
        id: 4,
        title: "Leading Through a Merger Integration",
        excerpt: "The first hundred days set the culture of the combined firm. Here is the playbook we use with executive teams.",
        category: "Leadership",
        author: "Helena Marsh",
        date: date!(2024 - 01 - 22),
        read_minutes: 8,
        image: "https://images.unsplash.com/photo-1521737604893-d14cc237f11d?w=1200",
    },
    BlogPost {
        id: 5,
        title: "Decarbonization as a Growth Strategy",
        excerpt: "Emission targets become a competitive advantage once they are tied to product and procurement decisions.",
        category: "Sustainability",
        author: "Lucas Moreau",
        date: date!(2024 - 01 - 08),
        read_minutes: 10,
        image: "https://images.unsplash.com/photo-1466611653911-95081537e5b7?w=1200",
    },
    BlogPost {
        id: 6,
        title: "Data Platforms Your Analysts Will Actually Use",
        excerpt: "Self-service analytics succeeds when governance is designed with the people who answer the questions.",
        category: "Technology",
        author: "Daniel Okafor",
        date: date!(2023 - 12 - 12),
        read_minutes: 7,
        image: "",
    },
    BlogPost {
        id: 7,
        title: "Pricing Strategy After Inflation",
        excerpt: "Customers accepted increases for two years. Keeping margin now requires segment-level value pricing.",
        category: "Strategy",
        author: "Amira Haddad",
        date: date!(2023 - 11 - 30),
        read_minutes: 5,
        image: "https://images.unsplash.com/photo-1554224155-6726b3ff858f?w=1200",
    },
    BlogPost {
        id: 8,
        title: "Building Resilient Supplier Networks",
        excerpt: "Dual sourcing is expensive. Mapping tier-two dependencies first shows where resilience pays for itself.",
        category: "Operations",
        author: "Priya Raman",
        date: date!(2023 - 11 - 02),
        read_minutes: 8,
        image: "https://images.unsplash.com/photo-1586528116311-ad8dd3c8310d?w=1200",
    },
];

static INSIGHTS: [Insight; 6] = [
    Insight {
        id: 101,
        title: "The State of Digital Transformation 2024",
        excerpt: "Survey of 400 executives on where transformation budgets landed and which programs delivered value.",
        category: "Digital Transformation",
        date: date!(2024 - 03 - 01),
        read_minutes: 12,
        image: "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=1200",
    },
    Insight {
        id: 102,
        title: "Mid-Market Growth Outlook",
        excerpt: "Consolidation, private capital, and talent scarcity reshape the mid-market through 2026.",
        category: "Market Analysis",
        date: date!(2024 - 02 - 14),
        read_minutes: 9,
        image: "https://images.unsplash.com/photo-1590283603385-17ffb3a7f29f?w=1200",
    },
    Insight {
        id: 103,
        title: "Operational Risk in Automated Finance Functions",
        excerpt: "Automation removes manual error and introduces model risk. Controls have to move with the work.",
        category: "Risk",
        date: date!(2024 - 01 - 29),
        read_minutes: 11,
        image: "https://images.unsplash.com/photo-1563986768609-322da13575f3?w=1200",
    },
    Insight {
        id: 104,
        title: "Hybrid Work and the Middle Manager",
        excerpt: "Managers absorbed most of the coordination cost of hybrid work. Redesigning their role unlocks productivity.",
        category: "People",
        date: date!(2024 - 01 - 11),
        read_minutes: 8,
        image: "https://images.unsplash.com/photo-1522071820081-009f0129c71c?w=1200",
    },
    Insight {
        id: 105,
        title: "AI Adoption Beyond the Pilot",
        excerpt: "Most enterprises run dozens of AI pilots. Few have the data contracts to scale any of them.",
        category: "Digital Transformation",
        date: date!(2023 - 12 - 05),
        read_minutes: 10,
        image: "https://images.unsplash.com/photo-1677442136019-21780ecad995?w=1200",
    },
    Insight {
        id: 106,
        title: "Energy Prices and Industrial Competitiveness",
        excerpt: "How European manufacturers are hedging structurally higher energy costs.",
        category: "Market Analysis",
        date: date!(2023 - 11 - 18),
        read_minutes: 7,
        image: "",
    },
];

static CASE_STUDIES: [CaseStudy; 6] = [
    CaseStudy {
        id: 201,
        title: "Modernizing Core Banking for a Regional Lender",
        description: "Replaced a thirty-year-old ledger with a cloud core while keeping branches open and regulators informed.",
        category: "Financial Services",
        client: "Northbridge Bank",
        outcome: "Release cadence moved from quarterly to weekly; operating costs fell 22%.",
        image: "https://images.unsplash.com/photo-1541354329998-f4d9a9f9297f?w=1200",
    },
    CaseStudy {
        id: 202,
        title: "Reducing Patient Wait Times Across a Hospital Network",
        description: "Capacity planning and scheduling redesign across eleven hospitals.",
        category: "Healthcare",
        client: "Crescent Health",
        outcome: "Average emergency wait time cut by 35 minutes within six months.",
        image: "https://images.unsplash.com/photo-1519494026892-80bbd2d6fd0d?w=1200",
    },
    CaseStudy {
        id: 203,
        title: "Predictive Maintenance for Precision Manufacturing",
        description: "Sensor analytics program that moved maintenance from calendar-based to condition-based.",
        category: "Manufacturing",
        client: "Altamira Components",
        outcome: "Unplanned downtime reduced by 41%.",
        image: "https://images.unsplash.com/photo-1565043666747-69f6646db940?w=1200",
    },
    CaseStudy {
        id: 204,
        title: "Omnichannel Inventory for a Fashion Retailer",
        description: "Unified store and online inventory so every store could fulfil web orders.",
        category: "Retail",
        client: "Maison Verte",
        outcome: "Markdowns down 18%; online conversion up 9%.",
        image: "https://images.unsplash.com/photo-1441986300917-64674bd600d8?w=1200",
    },
    CaseStudy {
        id: 205,
        title: "Grid Flexibility Strategy for a Utility",
        description: "Business case and roadmap for demand response and storage across a regional grid.",
        category: "Energy",
        client: "Solenne Power",
        outcome: "Deferred 140 million in network reinforcement spend.",
        image: "https://images.unsplash.com/photo-1509391366360-2e959784a276?w=1200",
    },
    CaseStudy {
        id: 206,
        title: "Claims Automation for a Specialty Insurer",
        description: "Straight-through processing for low-complexity claims with human review for the rest.",
        category: "Financial Services",
        client: "Harborline Insurance",
        outcome: "60% of claims settled same day.",
        image: "",
    },
];

static PROJECTS: [Project; 8] = [
    Project {
        id: 301,
        title: "Growth Strategy Refresh",
        description: "Five-year growth plan for a listed logistics group, including two adjacency bets.",
        category: "Advisory",
        tags: &["Strategy", "Growth"],
        year: 2024,
        image: "https://images.unsplash.com/photo-1553877522-43269d4ea984?w=1200",
    },
    Project {
        id: 302,
        title: "Operating Model Redesign",
        description: "Shared-services operating model for finance, HR, and procurement.",
        category: "Advisory",
        tags: &["Strategy", "Operations"],
        year: 2023,
        image: "https://images.unsplash.com/photo-1600880292203-757bb62b4baf?w=1200",
    },
    Project {
        id: 303,
        title: "Customer Data Platform Rollout",
        description: "Implementation of a customer data platform feeding marketing and service teams.",
        category: "Implementation",
        tags: &["Data", "Technology", "Growth"],
        year: 2024,
        image: "https://images.unsplash.com/photo-1551288049-bebda4e38f71?w=1200",
    },
    Project {
        id: 304,
        title: "ERP Consolidation",
        description: "Consolidated six regional ERP instances into one global template.",
        category: "Implementation",
        tags: &["Technology", "Operations"],
        year: 2022,
        image: "",
    },
    Project {
        id: 305,
        title: "Net-Zero Pathway Study",
        description: "Emissions baseline and abatement cost curve for a building materials producer.",
        category: "Research",
        tags: &["Sustainability", "Strategy"],
        year: 2023,
        image: "https://images.unsplash.com/photo-1473341304170-971dccb5ac1e?w=1200",
    },
    Project {
        id: 306,
        title: "Workforce Skills Benchmark",
        description: "Benchmark of digital skills across 30 peer organizations.",
        category: "Research",
        tags: &["People", "Data"],
        year: 2024,
        image: "https://images.unsplash.com/photo-1552581234-26160f608093?w=1200",
    },
    Project {
        id: 307,
        title: "Market Entry: Southeast Asia",
        description: "Entry strategy and partner screening for a specialty chemicals company.",
        category: "Advisory",
        tags: &["Strategy"],
        year: 2022,
        image: "https://images.unsplash.com/photo-1508009603885-50cf7c579365?w=1200",
    },
    Project {
        id: 308,
        title: "Pricing Engine Implementation",
        description: "Rules and elasticity-driven pricing engine for a B2B distributor.",
        category: "Implementation",
        tags: &["Growth", "Data"],
        year: 2023,
        image: "https://images.unsplash.com/photo-1554224155-8d04cb21cd6c?w=1200",
    },
];

static TESTIMONIALS: [Testimonial; 5] = [
    Testimonial {
        id: 1,
        quote: "They challenged our assumptions without ever losing sight of what we had to deliver on Monday morning.",
        name: "Margaret Lindqvist",
        role: "Chief Executive Officer",
        company: "Northbridge Bank",
    },
    Testimonial {
        id: 2,
        quote: "The scheduling redesign changed how our clinicians work, and they were part of it from the first workshop.",
        name: "Dr. Samuel Achebe",
        role: "Chief Operating Officer",
        company: "Crescent Health",
    },
    Testimonial {
        id: 3,
        quote: "A rare team that is as comfortable on the plant floor as in the boardroom.",
        name: "Giulia Ferraro",
        role: "VP Manufacturing",
        company: "Altamira Components",
    },
    Testimonial {
        id: 4,
        quote: "Clear thinking, honest numbers, and a roadmap we actually followed.",
        name: "Thomas Reinholt",
        role: "Chief Financial Officer",
        company: "Solenne Power",
    },
    Testimonial {
        id: 5,
        quote: "They left us with capabilities, not just a report.",
        name: "Aiko Tanaka",
        role: "Chief Digital Officer",
        company: "Maison Verte",
    },
];

pub fn blog_posts() -> Vec<BlogPost> {
    BLOG_POSTS.to_vec()
}

pub fn insights() -> Vec<Insight> {
    INSIGHTS.to_vec()
}

pub fn case_studies() -> Vec<CaseStudy> {
    CASE_STUDIES.to_vec()
}

pub fn projects() -> Vec<Project> {
    PROJECTS.to_vec()
}

pub fn testimonials() -> Vec<Testimonial> {
    TESTIMONIALS.to_vec()
}
