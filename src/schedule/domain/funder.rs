//! Funder entity: the grant-making organisation registry record.

use super::{BernieNumber, Ein, ScheduleDomainError};
use serde::{Deserialize, Serialize};

/// A grant-making organisation identified by a unique bernie number.
///
/// The canonical name is always present in the alias list, so alias
/// matching never misses the official name. Alias additions return a new
/// value rather than mutating shared state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Funder {
    bernie_number: BernieNumber,
    canonical_name: String,
    aliases: Vec<String>,
    ein: Option<Ein>,
}

impl Funder {
    /// Creates a funder with its canonical name seeded into the alias list.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleDomainError::EmptyCanonicalName`] when the name is
    /// empty after trimming.
    pub fn new(
        bernie_number: BernieNumber,
        canonical_name: impl Into<String>,
    ) -> Result<Self, ScheduleDomainError> {
        let canonical_name = canonical_name.into();
        if canonical_name.trim().is_empty() {
            return Err(ScheduleDomainError::EmptyCanonicalName);
        }
        let aliases = vec![canonical_name.clone()];
        Ok(Self {
            bernie_number,
            canonical_name,
            aliases,
            ein: None,
        })
    }

    /// Attaches a validated EIN.
    #[must_use]
    pub fn with_ein(mut self, ein: Ein) -> Self {
        self.ein = Some(ein);
        self
    }

    /// Returns a funder with the alias recorded, skipping empty input and
    /// case-insensitive duplicates.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        let trimmed = alias.trim();
        if !trimmed.is_empty() && !self.has_alias(trimmed) {
            self.aliases.push(trimmed.to_owned());
        }
        self
    }

    /// Returns the funder's bernie number.
    #[must_use]
    pub const fn bernie_number(&self) -> &BernieNumber {
        &self.bernie_number
    }

    /// Returns the official name.
    #[must_use]
    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    /// Returns every known name including the canonical one.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Returns the tax identifier when known.
    #[must_use]
    pub const fn ein(&self) -> Option<&Ein> {
        self.ein.as_ref()
    }

    /// Checks whether the name matches any known alias, case-insensitively.
    #[must_use]
    pub fn has_alias(&self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        self.aliases
            .iter()
            .any(|alias| alias.trim().to_lowercase() == needle)
    }

    /// Checks whether the name matches this funder.
    ///
    /// With `fuzzy` set, substring containment in either direction counts
    /// as a match.
    #[must_use]
    pub fn matches_name(&self, name: &str, fuzzy: bool) -> bool {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        if self.has_alias(name) {
            return true;
        }
        fuzzy
            && self.aliases.iter().any(|alias| {
                let haystack = alias.trim().to_lowercase();
                haystack.contains(&needle) || needle.contains(&haystack)
            })
    }
}
