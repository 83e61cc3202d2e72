use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use dotenv::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use request_gateway::cli_arguments::{CliArguments, LogFormat};
use request_gateway::http_client::{http_client::HttpClient, reqwest_http_client::ReqwestHttpClient};
use request_gateway::lookup::transparency_cpf_info_service::TransparencyCpfInfoService;
use request_gateway::proxy_service::http_proxy_service::HttpProxyService;
use request_gateway::ticket_store::{seed::seed_tickets, sqlite_ticket_store::SqliteTicketStore};
use request_gateway::{ServerState, router};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn init_tracing(format: LogFormat) {
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
    );

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => {
            error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenv().ok();
    let args: CliArguments = CliArguments::parse();
    init_tracing(args.log_format);

    let http_client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::with_timeout(
        Duration::from_secs(args.request_timeout_secs),
    )?);

    let ticket_store = Arc::new(SqliteTicketStore::open(&args.database_path)?);
    if args.seed {
        seed_tickets(ticket_store.as_ref())?;
    }

    if args.transparency_token.is_none() {
        warn!("No transparency token configured; CPF lookups will be sent without an API key");
    }

    let state = ServerState {
        proxy_service: Arc::new(HttpProxyService::new(http_client.clone())),
        cpf_info_service: Arc::new(TransparencyCpfInfoService::new(
            http_client,
            args.transparency_base_url.clone(),
            args.transparency_token.clone(),
        )),
        ticket_store: ticket_store.clone(),
    };

    let tcp_listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port)).await?;

    info!("Server started on port {}", args.port);

    axum::serve(tcp_listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");

    match Arc::try_unwrap(ticket_store) {
        Ok(store) => store.close()?,
        Err(_) => warn!("Ticket store still in use at shutdown; leaving it to drop"),
    }

    Ok(())
}
