use std::{net::SocketAddr, process, sync::Arc};

use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;
use vantage::{
    application::{error::AppError, listing::ListingService},
    config::{self, QueryArgs},
    domain::{content::SiteContent, query::FilterState},
    infra::{
        error::InfraError,
        http::{self, HttpState},
        telemetry,
    },
};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging)?;

    let content = Arc::new(SiteContent::load()?);

    match command {
        config::Command::Serve(_) => run_serve(settings, content).await,
        config::Command::Query(args) => run_query(content, args),
    }
}

async fn run_serve(settings: config::Settings, content: Arc<SiteContent>) -> Result<(), AppError> {
    let state = HttpState::new(&settings, content);
    let router = http::build_router(state);

    let addr = settings.server.addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| InfraError::bind(addr, err))?;

    info!(
        target = "vantage::server",
        addr = %addr,
        public_url = %settings.site.public_url,
        trusted_proxies = settings.server.trusted_proxies.len(),
        "listening"
    );

    let grace = settings.server.graceful_shutdown;
    let server = axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal());

    // Open SSE streams keep connections alive, so bound the drain.
    let mut server = tokio::spawn(async move { server.await });
    tokio::select! {
        joined = &mut server => finish(joined),
        _ = async {
            shutdown_signal().await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(
                target = "vantage::server",
                grace_seconds = grace.as_secs(),
                "graceful shutdown timed out; aborting open connections"
            );
            server.abort();
            Ok(())
        }
    }
}

fn finish(
    joined: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), AppError> {
    match joined {
        Ok(result) => result.map_err(|err| AppError::from(InfraError::from(err))),
        Err(err) => Err(AppError::unexpected(format!("server task failed: {err}"))),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(target = "vantage::server", error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!(target = "vantage::server", "shutdown signal received");
}

fn run_query(content: Arc<SiteContent>, args: QueryArgs) -> Result<(), AppError> {
    let filter = FilterState::new(args.search.as_deref(), args.category.as_deref(), args.tags);
    let report = ListingService::new(content).query(args.listing.into(), filter);

    let body = serde_json::to_string_pretty(&report)
        .map_err(|err| AppError::unexpected(format!("failed to encode query results: {err}")))?;
    println!("{body}");
    Ok(())
}
