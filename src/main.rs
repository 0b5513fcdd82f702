use std::{process, sync::Arc};

use folio::{
    application::{
        chrome::{ChromeService, SiteProfile},
        error::AppError,
        header::HeaderGeometry,
        site::SiteService,
    },
    config,
    infra::{
        content,
        error::InfraError,
        export,
        http::{self, HttpState},
        telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

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
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Build(args) => run_build(settings, args).await,
    }
}

async fn build_site(settings: &config::Settings) -> Result<SiteService, AppError> {
    let catalog = content::load_catalog(&settings.content.manifest).await?;
    let chrome = ChromeService::new(
        SiteProfile::from(&settings.site),
        HeaderGeometry::from(&settings.header),
    );
    Ok(SiteService::new(
        Arc::new(catalog),
        chrome,
        settings.site.home_latest.get(),
    ))
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let site = build_site(&settings).await?;
    let router = http::build_router(HttpState {
        site: Arc::new(site),
    });

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "folio::serve",
        addr = %settings.server.addr,
        "listening"
    );

    axum::serve(listener, router.into_make_service())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))
}

async fn run_build(settings: config::Settings, args: config::BuildArgs) -> Result<(), AppError> {
    let site = build_site(&settings).await?;

    info!(
        target = "folio::export",
        out_dir = %args.out.display(),
        "Starting static build"
    );

    let report = export::export_site(&site, &args.out).await?;
    info!(
        target = "folio::export",
        pages = report.pages,
        "Static build completed"
    );
    Ok(())
}
