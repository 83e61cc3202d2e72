use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use url::Url;

use crate::lookup::transparency_cpf_info_service::DEFAULT_TRANSPARENCY_BASE_URL;

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct CliArguments {
    #[arg(short, long, env = "PORT", default_value_t = 3331)]
    pub port: u16,

    /// SQLite file holding the tickets; missing parent directories are created.
    #[arg(short, long, env = "DATABASE_PATH", default_value = "database/tickets.db")]
    pub database_path: PathBuf,

    /// Key for the transparency portal, sent as `chave-api-dados`.
    #[arg(long, env = "TOKEN", hide_env_values = true)]
    pub transparency_token: Option<String>,

    #[arg(long, env = "TRANSPARENCY_BASE_URL", default_value = DEFAULT_TRANSPARENCY_BASE_URL)]
    pub transparency_base_url: Url,

    /// Outbound timeout applied to every forwarded call.
    #[arg(short = 't', long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Upsert the sample tickets at startup.
    #[arg(long, env = "SEED")]
    pub seed: bool,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use clap::Parser;

    use crate::cli_arguments::{CliArguments, LogFormat};

    #[test]
    fn test_cli_arguments_long_flags() {
        let args = CliArguments::parse_from([
            "request-gateway",
            "--port",
            "3000",
            "--database-path",
            "/tmp/tickets.db",
            "--transparency-token",
            "secret",
            "--transparency-base-url",
            "http://localhost:9000",
            "--request-timeout-secs",
            "5",
            "--seed",
            "--log-format",
            "json",
        ]);

        assert_eq!(args.port, 3000);
        assert_eq!(args.database_path, PathBuf::from("/tmp/tickets.db"));
        assert_eq!(args.transparency_token.as_deref(), Some("secret"));
        assert_eq!(args.transparency_base_url.as_str(), "http://localhost:9000/");
        assert_eq!(args.request_timeout_secs, 5);
        assert!(args.seed);
        assert_eq!(args.log_format, LogFormat::Json);
    }

    #[test]
    fn test_cli_arguments_short_flags() {
        let args = CliArguments::parse_from([
            "request-gateway",
            "-p",
            "3000",
            "-d",
            "db.sqlite",
            "-t",
            "10",
        ]);

        assert_eq!(args.port, 3000);
        assert_eq!(args.database_path, PathBuf::from("db.sqlite"));
        assert_eq!(args.request_timeout_secs, 10);
    }

    #[test]
    fn test_cli_arguments_reject_invalid_base_url() {
        let result = CliArguments::try_parse_from([
            "request-gateway",
            "--transparency-base-url",
            "not a url",
        ]);

        assert!(result.is_err());
    }
}
