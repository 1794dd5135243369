use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidUrl { field: &'static str, input: String },
    InvalidDate { input: String },
    TimeoutOutOfRange { min: u32, max: u32, actual: u32 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidUrl { field, input } => write!(f, "invalid {field} url: {input}"),
            Self::InvalidDate { input } => {
                write!(f, "invalid date: {input} (expected YYYY-MM-DD)")
            }
            Self::TimeoutOutOfRange { min, max, actual } => {
                write!(
                    f,
                    "timeout seconds out of range: {actual} (expected {min}..={max})"
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}
