pub mod admission_review;
mod api;
pub mod certs;
pub mod cli;
pub mod codec;
pub mod config;
pub mod decision;
pub mod errors;
pub mod patch;
pub mod quantity;
pub mod tracing;
pub mod vpa;

#[cfg(test)]
mod test_utils;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use ::tracing::{info, warn};
use anyhow::{anyhow, Result};
use axum::Router;
use axum_server::{tls_rustls::RustlsConfig, Handle};

use crate::api::state::ApiServerState;
use crate::codec::{Decoder, JsonDecoder};
use crate::config::Config;

const GRACEFUL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

pub struct MinAllowedRemover {
    router: Router,
    addr: SocketAddr,
    tls_config: RustlsConfig,
}

impl MinAllowedRemover {
    /// Build the webhook server. The TLS material is loaded here, a failure
    /// aborts the startup.
    pub async fn new_from_config(config: Config) -> Result<Self> {
        let tls_config = certs::create_tls_config(&config.tls_config)
            .await
            .map_err(|e| anyhow!("error while trying to load the TLS certificate: {e}"))?;

        Ok(Self {
            router: router(Arc::new(JsonDecoder)),
            addr: config.addr,
            tls_config,
        })
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn run(self) -> Result<()> {
        let handle = Handle::new();
        tokio::spawn(shutdown_on_signal(handle.clone()));

        info!(address = %self.addr, "started HTTPS server");
        axum_server::bind_rustls(self.addr, self.tls_config)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await
            .map_err(|e| anyhow!("HTTPS server error: {e}"))?;
        info!("HTTPS server stopped");

        Ok(())
    }
}

/// The admission router, decoding payloads with `decoder`.
pub fn router(decoder: Arc<dyn Decoder>) -> Router {
    api::router(Arc::new(ApiServerState { decoder }))
}

async fn shutdown_on_signal(handle: Handle) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutting down");
    handle.graceful_shutdown(Some(GRACEFUL_SHUTDOWN_TIMEOUT));
}
