//! Core types for Arcana: cards, arcana, suits, and spread layouts.
//!
//! This crate is pure data. It defines the card catalog a reading draws
//! from and the spread definitions that give each drawn position its
//! meaning. It knows nothing about shuffling, selection, or interpretation.

/// The static card catalog and the built-in deck.
pub mod catalog;
/// Card identity, arcana, and suits.
pub mod card;
/// Error types used throughout the crate.
pub mod error;
/// Spread kinds and their position layouts.
pub mod spread;

/// Re-export card types.
pub use card::{Arcana, Card, CardId, Suit};
/// Re-export the catalog.
pub use catalog::{CardCatalog, RWS_IMAGE_BASE};
/// Re-export error types.
pub use error::{CatalogError, CatalogResult};
/// Re-export spread types.
pub use spread::{SpreadDefinition, SpreadKind};
