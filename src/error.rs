use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Scraping error: {0}")]
    Scraper(#[from] ScraperError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request error: {0}")]
    Request(#[from] rquest::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing required configuration: {0}")]
    MissingField(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to build client: {0}")]
    BuildError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Response error {status_code} from {url}")]
    ResponseError { status_code: u16, url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

#[derive(Error, Debug)]
pub enum ScraperError {
    /// A listing row that cannot be turned into a record. Fatal to the run:
    /// row misalignment means the listing layout moved.
    #[error("Malformed listing row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("Detail page has {found} paragraphs, expected at least {required}")]
    MissingParagraphs { found: usize, required: usize },

    #[error("Pay rate is not numeric: {0:?}")]
    InvalidPayRate(String),

    /// Every fetched detail page failed to parse.
    #[error("Detail page layout changed: {failed} of {total} pages failed to parse")]
    LayoutChanged { failed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, AppError>;
