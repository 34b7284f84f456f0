use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlattenError {
    #[error("Invalid exclude pattern: {0}")]
    PatternError(String),

    #[error("Gitignore read failed: {0}")]
    GitignoreError(String),

    #[error("Output preparation failed: {0}")]
    OutputPrepError(String),

    #[error("Tree rendering failed: {0}")]
    TreeError(String),

    #[error("File copy failed: {0}")]
    CopyError(String),

    #[error("IO Error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for FlattenError {
    fn from(err: std::io::Error) -> Self {
        FlattenError::IoError(err.to_string())
    }
}

impl From<regex::Error> for FlattenError {
    fn from(err: regex::Error) -> Self {
        FlattenError::PatternError(err.to_string())
    }
}
