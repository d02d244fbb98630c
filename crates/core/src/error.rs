#[derive(Debug, thiserror::Error)]
pub enum ConditionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("condition lookup failed: {0}")]
    Lookup(String),
    #[error("failed to read condition file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to deserialize condition JSON: {0}")]
    Deserialization(serde_json::Error),
    #[error("failed to deserialize condition YAML: {0}")]
    YamlDeserialization(serde_yaml::Error),
    #[error("unsupported condition file format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid record uuid: {0}")]
    Uuid(#[from] conditionlist_uuid::UuidError),
    #[error("invalid text: {0}")]
    Text(#[from] conditionlist_types::TextError),
}

pub type ConditionResult<T> = std::result::Result<T, ConditionError>;
