//! Shared traits for bill-tracking entities.

use uuid::Uuid;

/// Fallback currency code used when nothing more specific is configured.
pub const DEFAULT_CURRENCY: &str = "PLN";

/// Exposes a stable identifier for entities stored in the bill book.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}
