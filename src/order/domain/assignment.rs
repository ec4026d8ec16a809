//! Collaborator assignment for production tasks.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel collaborator returned when no table entry matches.
pub const UNASSIGNED: &str = "Undefined";

/// How an order entered the system; selects the lookup table used to
/// resolve collaborators from item descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationPath {
    /// Structured import carrying fully-qualified item names.
    StructuredImport,
    /// Manual entry carrying coarse item categories.
    ManualEntry,
}

/// Maps item descriptions to responsible workshop collaborators.
///
/// Holds two disjoint tables: a detailed one keyed by fully-qualified item
/// names for imported orders, and a simplified one keyed by coarse
/// categories for manually entered orders. Lookup is exact and
/// case-sensitive; misses resolve to [`UNASSIGNED`]. The tables are fixed
/// at construction.
#[derive(Debug, Clone)]
pub struct CollaboratorResolver {
    detailed: HashMap<String, String>,
    simplified: HashMap<String, String>,
}

impl CollaboratorResolver {
    /// Creates a resolver from explicit lookup tables.
    #[must_use]
    pub fn new(
        detailed: impl IntoIterator<Item = (String, String)>,
        simplified: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            detailed: detailed.into_iter().collect(),
            simplified: simplified.into_iter().collect(),
        }
    }

    /// Creates a resolver loaded with the workshop's production tables.
    #[must_use]
    pub fn workshop_defaults() -> Self {
        let detailed = [
            ("Kitchen cabinetry in white MDF", "Edison"),
            ("Bedroom wardrobe with sliding doors", "Luiz"),
            ("Stainless steel balcony railing", "Hélio"),
            ("Solid wood dining table", "José"),
            ("Upholstered headboard panel", "Anderson"),
            ("Tempered glass shower enclosure", "Eudes"),
            ("Home office shelving unit", "Edison"),
            ("Wrought iron entrance gate", "Hélio"),
            ("Walk-in closet fit-out", "Luiz"),
            ("Lacquer finish application", "Pintura"),
        ];
        let simplified = [
            ("Cabinetry", "Edison"),
            ("Wardrobes", "Luiz"),
            ("Metalwork", "Hélio"),
            ("Woodwork", "José"),
            ("Upholstery", "Anderson"),
            ("Glazing", "Eudes"),
            ("Painting", "Pintura"),
        ];
        Self::new(owned_pairs(detailed), owned_pairs(simplified))
    }

    /// Resolves the collaborator responsible for an item description.
    ///
    /// Total: unmatched descriptions resolve to [`UNASSIGNED`] rather than
    /// failing.
    #[must_use]
    pub fn resolve(&self, item_description: &str, path: CreationPath) -> &str {
        let table = match path {
            CreationPath::StructuredImport => &self.detailed,
            CreationPath::ManualEntry => &self.simplified,
        };
        table
            .get(item_description)
            .map_or(UNASSIGNED, String::as_str)
    }
}

fn owned_pairs<const N: usize>(pairs: [(&str, &str); N]) -> Vec<(String, String)> {
    pairs
        .into_iter()
        .map(|(item, collaborator)| (item.to_owned(), collaborator.to_owned()))
        .collect()
}
