use crate::request::PlateKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid house number: {input:?}")]
    InvalidHouseNumber { input: String },

    #[error("Invalid neighbor house number: {input:?}")]
    InvalidArrowNumber { input: String },

    #[error("Missing required field for {kind} plate: {field}")]
    MissingRequiredField {
        kind: PlateKind,
        field: &'static str,
    },

    #[error("Invalid plate geometry: {message}")]
    InvalidGeometry { message: String },

    #[error("Plate geometry JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
