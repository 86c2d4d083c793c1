#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid page number: {0} (pages start at 1)")]
    InvalidPage(u32),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
