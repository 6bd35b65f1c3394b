/// Error types shared across the co-founder crates.
///
/// These cover infrastructure failures (configuration, HTTP client construction) that
/// both the server and the client can hit. Request-level failures are modelled by each
/// crate and wrap `CommonError` via `#[from]` where they need to.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("config error: {0}")]
    Config(String),

    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}
