use crate::config::Config;
use crate::services::CredentialsProvider;
use actix_rt::signal::unix;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use futures_lite::FutureExt;
use soundcloud_http::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use track_resolver::{ProxyFallbackTransport, TrackResolver};
use tracing::{error, info};

mod config;
mod http;
mod services;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    let mut terminate = unix::signal(unix::SignalKind::terminate())?;
    let mut interrupt = unix::signal(unix::SignalKind::interrupt())?;

    dotenv::dotenv().ok();
    env_logger::init();

    let config = Arc::from(Config::from_env());

    info!(version = VERSION, "Starting application...");

    let http_transport = HttpTransport::create(
        Duration::from_secs(config.connect_timeout),
        Duration::from_secs(config.request_timeout),
    )
    .map_err(|error| std::io::Error::new(std::io::ErrorKind::Other, error))?;

    let proxy_prefix = config.proxy_prefix();
    if let Some(prefix) = &proxy_prefix {
        info!(%prefix, "Proxy fallback enabled");
    }

    let track_resolver = Arc::new(TrackResolver::with_api_base(
        Arc::new(ProxyFallbackTransport::new(
            Arc::new(http_transport),
            proxy_prefix,
        )),
        &config.api_base,
    ));
    let credentials_provider = Arc::new(CredentialsProvider::new(
        config.default_credentials.client_id.clone(),
        config.default_credentials.access_token.clone(),
    ));

    let shutdown_timeout = config.shutdown_timeout;
    let bind_address = config.bind_address.clone();

    let server = HttpServer::new({
        move || {
            App::new()
                .wrap(Logger::default())
                .app_data(Data::new(Arc::clone(&track_resolver)))
                .app_data(Data::new(Arc::clone(&credentials_provider)))
                .configure(http::configure)
        }
    })
    .shutdown_timeout(shutdown_timeout)
    .bind(bind_address)?
    .run();

    let server_handle = server.handle();

    actix_rt::spawn({
        async move {
            if let Err(error) = server.await {
                error!(?error, "Error on http server");
            }
        }
    });

    info!("Application started");

    interrupt.recv().or(terminate.recv()).await;

    info!("Received shutdown signal. Shutting down gracefully...");

    server_handle.stop(true).await;

    Ok(())
}
