#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("invalid value {value} for `{name}`: {reason}")]
    InvalidSetting {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },
    #[error("invalid scale multiplier ({sx}, {sy})")]
    InvalidScale { sx: f32, sy: f32 },
    #[error("transform is not invertible (determinant {determinant})")]
    DegenerateTransform { determinant: f32 },
    #[error("invalid settings file: {0}")]
    InvalidSettingsFile(String),
}

pub type Result<T, E = GridError> = std::result::Result<T, E>;
