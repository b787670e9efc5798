/// Failures while decoding a persisted survey payload.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The payload was written by an encoder this build does not know.
    #[error("unsupported survey encoding version {found}")]
    VersionMismatch { found: u32 },
    /// The payload is structurally broken (truncated, impossible counts,
    /// invalid UTF-8). Callers decide whether to abort the load or skip
    /// the file.
    #[error("corrupt survey payload: {context}")]
    Corrupt { context: &'static str },
}

impl DecodeError {
    pub(crate) fn corrupt(context: &'static str) -> Self {
        DecodeError::Corrupt { context }
    }
}

/// Failures of the file-level read/write helpers.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
