use std::process;

use ::tracing::{debug, error};
use anyhow::Result;
use vpa_minallowed_remover::{cli, config::Config, tracing::setup_tracing, MinAllowedRemover};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    let config = Config::from_args(&matches)?;

    // Starting from rustls 0.22, each application must set its default crypto provider.
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install crypto provider");

    if let Err(e) = setup_tracing(&config.log_level, &config.log_fmt, config.log_no_color) {
        // tracing is not available yet
        eprintln!("cannot setup tracing: {e}");
        process::exit(1);
    }
    debug!(?config, "configuration loaded");

    let server = match MinAllowedRemover::new_from_config(config).await {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "cannot start the webhook");
            process::exit(1);
        }
    };

    server.run().await
}
