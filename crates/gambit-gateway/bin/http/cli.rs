use clap::builder::TypedValueParser;
use clap::{Parser, ValueEnum};
use gambit_codec::{
    DEFAULT_SEPARATOR, DEFAULT_SEQUENCE_LENGTH, MAX_SEQUENCE_LENGTH, MIN_SEQUENCE_LENGTH,
};
use gambit_telemetry::LogFormat;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "GAMBIT_LISTEN_ADDR";
pub const PUBLIC_BASE_URL_ENV: &str = "GAMBIT_PUBLIC_BASE_URL";
pub const SEQUENCE_LENGTH_ENV: &str = "GAMBIT_SEQUENCE_LENGTH";
pub const SEPARATOR_ENV: &str = "GAMBIT_SEPARATOR";
pub const STORAGE_BACKEND_ENV: &str = "GAMBIT_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "GAMBIT_MYSQL_DSN";
pub const LOG_FORMAT_ENV: &str = "GAMBIT_LOG_FORMAT";
pub const OTLP_ENDPOINT_ENV: &str = "GAMBIT_OTLP_ENDPOINT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "gambit-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Prefix of the short links handed out to clients.
    #[arg(long, env = PUBLIC_BASE_URL_ENV, default_value = DEFAULT_PUBLIC_BASE_URL)]
    pub public_base_url: String,

    #[arg(
        long,
        env = SEQUENCE_LENGTH_ENV,
        default_value_t = DEFAULT_SEQUENCE_LENGTH,
        value_parser = clap::value_parser!(u8)
            .range(MIN_SEQUENCE_LENGTH as i64..=MAX_SEQUENCE_LENGTH as i64)
            .map(usize::from),
    )]
    pub sequence_length: usize,

    #[arg(long, env = SEPARATOR_ENV, default_value_t = DEFAULT_SEPARATOR)]
    pub separator: char,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,

    #[arg(long, env = OTLP_ENDPOINT_ENV)]
    pub otlp_endpoint: Option<String>,
}
