#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Generic {0}")]
    Generic(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Catalog API base path is not configured. Pass --api-base or set VITRINE_API_BASE")]
    MissingApiBase,

    #[error("Unknown display mode: {0}")]
    UnknownDisplayMode(String),
}
