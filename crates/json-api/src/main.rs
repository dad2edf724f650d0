//! OpenConnect JSON API Server

use std::{process, sync::Arc};

use salvo::prelude::*;
use tracing::{error, info};

use openconnect_app::{
    context::AppContext,
    domain::accounts::data::AccountsSettings,
    mailer::{HttpMailer, LogMailer, Mailer, MailerError},
};

use crate::{
    config::ServerConfig,
    limiter::RateLimiter,
    observability::init_logging,
    router::{app_router, into_service, with_docs},
    state::State,
};

mod auth;
mod catcher;
mod config;
mod errors;
mod extensions;
mod healthcheck;
mod ideas;
mod limiter;
mod observability;
mod recover;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod tokens;
mod users;

/// OpenConnect JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = init_logging(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        process::exit(1);
    }

    let mailer = match build_mailer(&config) {
        Ok(mailer) => mailer,
        Err(build_error) => {
            error!("failed to build mail relay client: {build_error}");

            process::exit(1);
        }
    };

    let app = match AppContext::connect(
        &config.database.settings(),
        mailer,
        AccountsSettings::new(config.mailer.frontend_url.clone()),
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    info!("database connection pool established");

    let background = app.background.clone();
    let limiter = RateLimiter::start(config.limiter.settings());

    let router = with_docs(app_router(
        State::shared(app, config.server.environment.clone()),
        Arc::clone(&limiter),
    ));

    let addr = config.socket_addr();

    info!(
        addr = %addr,
        environment = %config.server.environment,
        "starting server"
    );

    let listener = TcpListener::new(addr).bind().await;

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, limiter).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(into_service(router)).await;

    shutdown::drain_background(&background, config.server.drain_timeout()).await;

    info!("stopped server");
}

fn build_mailer(config: &ServerConfig) -> Result<Arc<dyn Mailer>, MailerError> {
    let Some(relay) = config.mailer.relay() else {
        info!("no mail relay configured, outgoing mail will be logged");

        return Ok(Arc::new(LogMailer::new(config.mailer.mail_sender.clone())));
    };

    Ok(Arc::new(HttpMailer::new(relay)?))
}
