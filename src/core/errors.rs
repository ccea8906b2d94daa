use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("connection failed: {0}")]
    Connection(String),
}

#[derive(Error, Debug)]
pub enum EnrichmentError {
    #[error("completion service error: {0}")]
    Service(String),

    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model reply did not contain a JSON object")]
    MissingJson,

    #[error("model JSON parse failed: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("model JSON was not an object")]
    NotAnObject,

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for EnrichmentError {
    fn from(err: reqwest::Error) -> Self {
        EnrichmentError::Service(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Enrichment(#[from] EnrichmentError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl PipelineError {
    /// Stage label used in batch statistics.
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::InvalidInput(_) => "input",
            PipelineError::Fetch(_) => "fetch",
            PipelineError::Enrichment(_) => "enrich",
            PipelineError::Export(_) => "export",
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
