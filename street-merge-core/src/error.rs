use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("PBF read error: {0}")]
    PbfError(#[from] osmpbfreader::Error),
    #[error("Staging store error: {0}")]
    StagingError(#[from] rusqlite::Error),
    #[error("Name parser request failed: {0}")]
    ParserError(String),
    #[error("Malformed name parser response: {0}")]
    ParserResponseError(String),
    #[error("Geometry encoding error: {0}")]
    EncodeError(String),
}
