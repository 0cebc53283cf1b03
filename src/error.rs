use chrono::NaiveDate;

pub type AgeResult<T> = Result<T, AgeError>;

#[derive(thiserror::Error, Debug)]
pub enum AgeError {
    #[error("invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("reference date {reference} is before birth date {birth}")]
    ReferenceBeforeBirth {
        birth: NaiveDate,
        reference: NaiveDate,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("speech error: {0}")]
    Speech(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AgeError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn speech(msg: impl Into<String>) -> Self {
        Self::Speech(msg.into())
    }
}
