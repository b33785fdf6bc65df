use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, builder::BoolishValueParser};

/// Command-line arguments for the Vantage site binary.
#[derive(Debug, Parser)]
#[command(name = "vantage", version, about = "Vantage Advisory marketing site")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "VANTAGE_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the public HTTP site.
    Serve(Box<ServeArgs>),
    /// Evaluate a listing query against the bundled content and print JSON.
    Query(QueryArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    #[command(flatten)]
    pub logging: LoggingOverrides,

    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the graceful shutdown timeout.
    #[arg(long = "server-graceful-shutdown-seconds", value_name = "SECONDS")]
    pub server_graceful_shutdown_seconds: Option<u64>,

    /// Trust `X-Forwarded-For` from this peer address; repeat for several.
    #[arg(long = "server-trusted-proxy", value_name = "IP")]
    pub server_trusted_proxies: Vec<String>,

    /// Override the public site URL used for canonical links.
    #[arg(long = "site-public-url", value_name = "URL")]
    pub site_public_url: Option<String>,

    /// Override the locale used when a visitor expresses no preference.
    #[arg(long = "site-default-locale", value_name = "LOCALE")]
    pub site_default_locale: Option<String>,

    /// Override the testimonial auto-advance interval.
    #[arg(long = "carousel-interval-ms", value_name = "MS")]
    pub carousel_interval_ms: Option<u64>,

    /// Override the testimonial transition duration.
    #[arg(long = "carousel-transition-ms", value_name = "MS")]
    pub carousel_transition_ms: Option<u64>,

    /// Override the contact rate limit window size.
    #[arg(long = "contact-window-seconds", value_name = "SECONDS")]
    pub contact_window_seconds: Option<u64>,

    /// Override the contact rate limit request ceiling.
    #[arg(long = "contact-max-requests", value_name = "COUNT")]
    pub contact_max_requests: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListingArg {
    Blog,
    Insights,
    CaseStudies,
    Projects,
}

#[derive(Debug, Args, Clone)]
pub struct QueryArgs {
    #[command(flatten)]
    pub logging: LoggingOverrides,

    /// Listing to query.
    #[arg(value_enum, value_name = "LISTING")]
    pub listing: ListingArg,

    /// Free-text search, matched case-insensitively as a substring.
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Restrict to one category (exact match).
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// Require a tag; repeat for several (all must match).
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
}
