use clap::builder::PossibleValue;
use clap::{crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    let mut args = vec![
        Arg::new("log-level")
            .long("log-level")
            .value_name("LOG_LEVEL")
            .env("VPA_MINALLOWED_REMOVER_LOG_LEVEL")
            .default_value("info")
            .value_parser([
                PossibleValue::new("trace"),
                PossibleValue::new("debug"),
                PossibleValue::new("info"),
                PossibleValue::new("warn"),
                PossibleValue::new("error"),
            ])
            .help("Log level"),
        Arg::new("log-fmt")
            .long("log-fmt")
            .value_name("LOG_FMT")
            .env("VPA_MINALLOWED_REMOVER_LOG_FMT")
            .default_value("text")
            .value_parser([PossibleValue::new("text"), PossibleValue::new("json")])
            .help("Log output format"),
        Arg::new("log-no-color")
            .long("log-no-color")
            .env("NO_COLOR")
            .action(ArgAction::SetTrue)
            .help("Disable colored output for logs"),
        Arg::new("address")
            .long("addr")
            .value_name("BIND_ADDRESS")
            .default_value("0.0.0.0")
            .env("VPA_MINALLOWED_REMOVER_BIND_ADDRESS")
            .help("Bind against ADDRESS"),
        Arg::new("port")
            .long("port")
            .value_name("PORT")
            .default_value("8080")
            .env("LISTEN_PORT")
            .help("Listen on PORT"),
        Arg::new("cert-dir")
            .long("cert-dir")
            .value_name("CERT_DIRECTORY")
            .default_value("/etc/vpa-minallowed-remover/certs")
            .env("CERT_DIRECTORY")
            .help("Directory holding the X.509 certificate and private key used for HTTPS"),
        Arg::new("tls-cert-name")
            .long("tls-cert-name")
            .value_name("TLS_CERT_NAME")
            .default_value("tls.crt")
            .env("TLS_CERT_NAME")
            .help("Name of the PEM encoded certificate file inside of the certificate directory"),
        Arg::new("tls-key-name")
            .long("tls-key-name")
            .value_name("TLS_KEY_NAME")
            .default_value("tls.key")
            .env("TLS_KEY_NAME")
            .help("Name of the PEM encoded private key file inside of the certificate directory"),
    ];
    args.sort_by(|a, b| a.get_id().cmp(b.get_id()));

    Command::new(crate_name!())
        .author(crate_authors!())
        .version(crate_version!())
        .about(crate_description!())
        .args(args)
}
