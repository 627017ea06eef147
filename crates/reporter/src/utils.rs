use anyhow::{anyhow, Error};
use clap::Parser;
use reqwest::Client;
use slog::{debug, info, o, Drain, Level, Logger};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_ENDPOINT: &str =
    "http://graphical.weather.gov/xml/sample_products/browser_interface/ndfdXMLclient.php";
pub const DEFAULT_ZIP_CODE: &str = "02215";
const DEFAULT_CONFIG_FILE: &str = "reporter.toml";

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "Reports the current NOAA forecast temperature and conditions as JSON"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $REPORTER_CONFIG, ./reporter.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "REPORTER_LEVEL")]
    pub level: Option<String>,

    /// Zip code to request the forecast for
    #[arg(short, long, env = "REPORTER_ZIP_CODE")]
    pub zip_code: Option<String>,

    /// NDFD XML client endpoint
    #[arg(short, long, env = "REPORTER_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Read a saved DWML forecast document instead of requesting one
    #[arg(short, long, env = "REPORTER_XML_FILE")]
    pub xml_file: Option<String>,
}

impl Cli {
    pub fn zip_code(&self) -> String {
        self.zip_code
            .clone()
            .unwrap_or_else(|| DEFAULT_ZIP_CODE.to_string())
    }

    pub fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    /// CLI values win over values from the config file
    pub fn merge(self, file_config: Cli) -> Cli {
        Cli {
            config: self.config,
            level: self.level.or(file_config.level),
            zip_code: self.zip_code.or(file_config.zip_code),
            endpoint: self.endpoint.or(file_config.endpoint),
            xml_file: self.xml_file.or(file_config.xml_file),
        }
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> Result<Cli, Error> {
    let cli_args = Cli::parse();
    let file_config = match config_path(cli_args.config.as_deref()) {
        Some(path) => load_config(&path)?,
        None => Cli::default(),
    };
    Ok(cli_args.merge(file_config))
}

fn config_path(explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }
    if let Ok(path) = env::var("REPORTER_CONFIG") {
        return Some(PathBuf::from(path));
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.exists().then_some(local)
}

pub fn load_config(path: &Path) -> Result<Cli, Error> {
    let raw = fs::read_to_string(path)
        .map_err(|e| anyhow!("error reading config file {}: {}", path.display(), e))?;
    parse_config(&raw).map_err(|e| anyhow!("error parsing config file {}: {}", path.display(), e))
}

pub fn parse_config(raw: &str) -> Result<Cli, toml::de::Error> {
    toml::from_str(raw)
}

fn log_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::Trace,
        "debug" => Level::Debug,
        "info" => Level::Info,
        "warn" => Level::Warning,
        "error" => Level::Error,
        _ => Level::Info,
    }
}

pub fn setup_logger(cli: &Cli) -> Logger {
    let log_level = match cli.level.as_ref() {
        Some(level) => log_level(level),
        None => log_level(&env::var("RUST_LOG").unwrap_or_default()),
    };

    // stdout only carries the JSON reading
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = drain.filter_level(log_level).fuse();
    slog::Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")))
}

pub fn get_url(cli: &Cli) -> String {
    // unit=e is Standard/English, m would be metric
    format!("{}?zipCodeList={}&unit=e", cli.endpoint(), cli.zip_code())
}

pub async fn fetch_xml(logger: &Logger, url: &str) -> Result<String, Error> {
    let client = Client::builder().user_agent("reporter/1.0").build()?;

    debug!(logger, "requesting: {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| anyhow!("error sending request: {}", e))?;
    if !response.status().is_success() {
        return Err(anyhow!("error response from request: {}", response.status()));
    }
    match response.text().await {
        Ok(xml_content) => Ok(xml_content),
        Err(e) => Err(anyhow!("error parsing body of request: {}", e)),
    }
}

/// The raw DWML document, from `--xml-file` when given, otherwise from NOAA
pub async fn load_forecast_xml(logger: &Logger, cli: &Cli) -> Result<String, Error> {
    if let Some(path) = cli.xml_file.as_ref() {
        info!(logger, "reading forecast from file: {}", path);
        return tokio::fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("error reading forecast file {}: {}", path, e));
    }
    fetch_xml(logger, &get_url(cli)).await
}
