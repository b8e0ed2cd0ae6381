use crate::card::CardId;

/// Alias for `Result<T, CatalogError>`.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur when building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Two cards share the same ID.
    #[error("duplicate card id: {0}")]
    DuplicateId(CardId),

    /// Two cards share the same name.
    #[error("card already exists: \"{0}\"")]
    DuplicateName(String),

    /// A card's suit does not agree with its arcana.
    #[error("card \"{name}\": {reason}")]
    InvalidCard {
        /// The offending card's name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },
}
