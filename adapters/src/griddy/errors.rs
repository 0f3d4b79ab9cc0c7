use thiserror::Error;

#[derive(Error, Debug)]
pub enum GriddyError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("response is not valid json: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid response from griddy: {0}")]
    InvalidResponse(String),
}
