//! Configuration layer: typed settings with layered precedence (file → env → CLI).

mod cli;

use std::{
    net::{IpAddr, SocketAddr},
    num::NonZeroU32,
    str::FromStr,
    time::Duration,
};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::domain::i18n::Locale;

pub use cli::{
    CliArgs, Command, ListingArg, LoggingOverrides, QueryArgs, ServeArgs, ServeOverrides,
};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "vantage";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_GRACEFUL_SHUTDOWN_SECS: u64 = 30;
const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000/";
const DEFAULT_CAROUSEL_INTERVAL_MS: u64 = 8_000;
const DEFAULT_CAROUSEL_TRANSITION_MS: u64 = 700;
const DEFAULT_CONTACT_WINDOW_SECS: u64 = 600;
const DEFAULT_CONTACT_MAX_REQUESTS: u64 = 5;

/// Fully-resolved deployment settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub site: SiteSettings,
    pub carousel: CarouselSettings,
    pub contact: ContactSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    pub graceful_shutdown: Duration,
    /// Peers whose `X-Forwarded-For` header names the real client.
    pub trusted_proxies: Vec<IpAddr>,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct SiteSettings {
    /// Absolute site root, always ending in `/`.
    pub public_url: String,
    pub default_locale: Locale,
}

#[derive(Debug, Clone, Copy)]
pub struct CarouselSettings {
    pub interval: Duration,
    pub transition: Duration,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_CAROUSEL_INTERVAL_MS),
            transition: Duration::from_millis(DEFAULT_CAROUSEL_TRANSITION_MS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContactSettings {
    pub window_seconds: NonZeroU32,
    pub max_requests: NonZeroU32,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("VANTAGE").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    match cli.command.as_ref() {
        Some(Command::Serve(args)) => raw.apply_serve_overrides(&args.overrides),
        Some(Command::Query(args)) => raw.apply_logging_overrides(&args.logging),
        None => raw.apply_serve_overrides(&ServeOverrides::default()),
    }

    Settings::from_raw(raw)
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    server: RawServerSettings,
    logging: RawLoggingSettings,
    site: RawSiteSettings,
    carousel: RawCarouselSettings,
    contact: RawContactSettings,
}

impl RawSettings {
    fn apply_serve_overrides(&mut self, overrides: &ServeOverrides) {
        self.apply_logging_overrides(&overrides.logging);

        if let Some(host) = overrides.server_host.as_ref() {
            self.server.host = Some(host.clone());
        }
        if let Some(port) = overrides.server_port {
            self.server.port = Some(port);
        }
        if let Some(seconds) = overrides.server_graceful_shutdown_seconds {
            self.server.graceful_shutdown_seconds = Some(seconds);
        }
        if !overrides.server_trusted_proxies.is_empty() {
            self.server.trusted_proxies = Some(overrides.server_trusted_proxies.clone());
        }
        if let Some(url) = overrides.site_public_url.as_ref() {
            self.site.public_url = Some(url.clone());
        }
        if let Some(locale) = overrides.site_default_locale.as_ref() {
            self.site.default_locale = Some(locale.clone());
        }
        if let Some(interval) = overrides.carousel_interval_ms {
            self.carousel.interval_ms = Some(interval);
        }
        if let Some(transition) = overrides.carousel_transition_ms {
            self.carousel.transition_ms = Some(transition);
        }
        if let Some(window) = overrides.contact_window_seconds {
            self.contact.window_seconds = Some(window);
        }
        if let Some(max) = overrides.contact_max_requests {
            self.contact.max_requests = Some(max);
        }
    }

    fn apply_logging_overrides(&mut self, overrides: &LoggingOverrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    /// Settings with every value at its default, ignoring files and environment.
    pub fn with_defaults() -> Result<Self, LoadError> {
        Self::from_raw(RawSettings::default())
    }

    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            server,
            logging,
            site,
            carousel,
            contact,
        } = raw;

        Ok(Self {
            server: build_server_settings(server)?,
            logging: build_logging_settings(logging)?,
            site: build_site_settings(site)?,
            carousel: build_carousel_settings(carousel)?,
            contact: build_contact_settings(contact)?,
        })
    }
}

fn build_server_settings(server: RawServerSettings) -> Result<ServerSettings, LoadError> {
    let host = server.host.unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = server.port.unwrap_or(DEFAULT_PORT);
    if port == 0 {
        return Err(LoadError::invalid(
            "server.port",
            "port must be greater than zero",
        ));
    }

    let addr = parse_socket_addr(&host, port)
        .map_err(|reason| LoadError::invalid("server.addr", reason))?;

    let graceful_secs = server
        .graceful_shutdown_seconds
        .unwrap_or(DEFAULT_GRACEFUL_SHUTDOWN_SECS);
    if graceful_secs == 0 {
        return Err(LoadError::invalid(
            "server.graceful_shutdown_seconds",
            "must be greater than zero",
        ));
    }

    let trusted_proxies = server
        .trusted_proxies
        .unwrap_or_default()
        .iter()
        .map(|raw| {
            raw.trim().parse::<IpAddr>().map_err(|err| {
                LoadError::invalid("server.trusted_proxies", format!("`{raw}`: {err}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ServerSettings {
        addr,
        graceful_shutdown: Duration::from_secs(graceful_secs),
        trusted_proxies,
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_site_settings(site: RawSiteSettings) -> Result<SiteSettings, LoadError> {
    let raw_url = site
        .public_url
        .unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_string());
    let parsed = Url::parse(raw_url.trim())
        .map_err(|err| LoadError::invalid("site.public_url", format!("invalid url: {err}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "site.public_url",
            "scheme must be http or https",
        ));
    }
    let public_url = format!("{}/", parsed.as_str().trim_end_matches('/'));

    let default_locale = match site.default_locale {
        Some(value) => Locale::parse(&value).ok_or_else(|| {
            LoadError::invalid("site.default_locale", format!("unsupported locale `{value}`"))
        })?,
        None => Locale::default(),
    };

    Ok(SiteSettings {
        public_url,
        default_locale,
    })
}

fn build_carousel_settings(carousel: RawCarouselSettings) -> Result<CarouselSettings, LoadError> {
    let interval_ms = carousel
        .interval_ms
        .unwrap_or(DEFAULT_CAROUSEL_INTERVAL_MS);
    if interval_ms == 0 {
        return Err(LoadError::invalid(
            "carousel.interval_ms",
            "must be greater than zero",
        ));
    }

    let transition_ms = carousel
        .transition_ms
        .unwrap_or(DEFAULT_CAROUSEL_TRANSITION_MS);
    if transition_ms == 0 || transition_ms >= interval_ms {
        return Err(LoadError::invalid(
            "carousel.transition_ms",
            "must be greater than zero and shorter than the interval",
        ));
    }

    Ok(CarouselSettings {
        interval: Duration::from_millis(interval_ms),
        transition: Duration::from_millis(transition_ms),
    })
}

fn build_contact_settings(contact: RawContactSettings) -> Result<ContactSettings, LoadError> {
    let window_seconds = non_zero_u32(
        contact
            .window_seconds
            .unwrap_or(DEFAULT_CONTACT_WINDOW_SECS),
        "contact.window_seconds",
    )?;
    let max_requests = non_zero_u32(
        contact
            .max_requests
            .unwrap_or(DEFAULT_CONTACT_MAX_REQUESTS),
        "contact.max_requests",
    )?;

    Ok(ContactSettings {
        window_seconds,
        max_requests,
    })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawServerSettings {
    host: Option<String>,
    port: Option<u16>,
    graceful_shutdown_seconds: Option<u64>,
    trusted_proxies: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSiteSettings {
    public_url: Option<String>,
    default_locale: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCarouselSettings {
    interval_ms: Option<u64>,
    transition_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawContactSettings {
    window_seconds: Option<u64>,
    max_requests: Option<u64>,
}

fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, String> {
    let candidate = format!("{host}:{port}");
    candidate
        .parse()
        .map_err(|err| format!("invalid address `{candidate}`: {err}"))
}

fn non_zero_u32(value: u64, key: &'static str) -> Result<NonZeroU32, LoadError> {
    let value_u32: u32 = value
        .try_into()
        .map_err(|_| LoadError::invalid(key, "value exceeds supported range for u32"))?;
    NonZeroU32::new(value_u32).ok_or_else(|| LoadError::invalid(key, "must be greater than zero"))
}
