use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{metric} must be a finite number")]
    NotFinite { metric: &'static str },

    #[error("{metric}={value} is outside [{min}, {max}]")]
    OutOfRange {
        metric: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{metric} must be a whole number, got {value}")]
    Fractional { metric: &'static str, value: f64 },
}
