use thiserror::Error;

/// Library-level failures of a selection run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectError {
    #[error("Shape error: {0}")]
    Shape(String),

    #[error("Non-finite value in {what} at index {index}.")]
    NonFinite { what: &'static str, index: usize },

    #[error(
        "Rank deficiency at step {step}: candidate feature {feature} has pivot {pivot:e}. \
         Its column is (numerically) a linear combination of the active features."
    )]
    RankDeficient {
        step: usize,
        feature: usize,
        pivot: f64,
    },

    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<SelectError> for AppError {
    fn from(err: SelectError) -> Self {
        let exit_code = match err {
            SelectError::RankDeficient { .. } => 4,
            SelectError::Shape(_) | SelectError::NonFinite { .. } | SelectError::InvalidOption(_) => 2,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
