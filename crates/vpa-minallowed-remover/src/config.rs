use anyhow::{anyhow, Result};
use clap::ArgMatches;
use lazy_static::lazy_static;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

lazy_static! {
    pub(crate) static ref HOSTNAME: String =
        std::env::var("HOSTNAME").unwrap_or_else(|_| String::from("unknown"));
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub tls_config: TlsConfig,
    pub log_level: String,
    pub log_fmt: String,
    pub log_no_color: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TlsConfig {
    pub cert_file: PathBuf,
    pub key_file: PathBuf,
}

impl TlsConfig {
    /// Both files live inside of `cert_dir`, with or without a trailing
    /// separator.
    pub fn from_cert_dir(cert_dir: &Path, cert_name: &str, key_name: &str) -> Self {
        TlsConfig {
            cert_file: cert_dir.join(cert_name),
            key_file: cert_dir.join(key_name),
        }
    }
}

impl Config {
    pub fn from_args(matches: &ArgMatches) -> Result<Self> {
        let addr = api_bind_address(matches)?;
        let tls_config = tls_files(matches)?;

        let log_level = matches
            .get_one::<String>("log-level")
            .expect("This should not happen, there's a default value for log-level")
            .to_owned();
        let log_fmt = matches
            .get_one::<String>("log-fmt")
            .expect("This should not happen, there's a default value for log-fmt")
            .to_owned();
        let log_no_color = matches
            .get_one::<bool>("log-no-color")
            .expect("clap should have assigned a default value")
            .to_owned();

        Ok(Self {
            addr,
            tls_config,
            log_level,
            log_fmt,
            log_no_color,
        })
    }
}

fn api_bind_address(matches: &ArgMatches) -> Result<SocketAddr> {
    let address = matches
        .get_one::<String>("address")
        .ok_or_else(|| anyhow!("error parsing arguments: missing bind address"))?;
    let port = matches
        .get_one::<String>("port")
        .ok_or_else(|| anyhow!("error parsing arguments: missing port"))?;

    format!("{address}:{port}")
        .parse()
        .map_err(|e| anyhow!("error parsing arguments: {}", e))
}

fn tls_files(matches: &ArgMatches) -> Result<TlsConfig> {
    let cert_dir = matches
        .get_one::<String>("cert-dir")
        .ok_or_else(|| anyhow!("error parsing arguments: missing certificate directory"))?;
    let cert_name = matches
        .get_one::<String>("tls-cert-name")
        .ok_or_else(|| anyhow!("error parsing arguments: missing certificate name"))?;
    let key_name = matches
        .get_one::<String>("tls-key-name")
        .ok_or_else(|| anyhow!("error parsing arguments: missing key name"))?;

    if cert_name.is_empty() || key_name.is_empty() {
        return Err(anyhow!(
            "error parsing arguments: --tls-cert-name and --tls-key-name cannot be empty"
        ));
    }

    Ok(TlsConfig::from_cert_dir(
        Path::new(cert_dir),
        cert_name,
        key_name,
    ))
}
