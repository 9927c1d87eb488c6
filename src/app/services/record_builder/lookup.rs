//! Strain and species code resolution

use crate::constants::{self, lookups};

/// Which closed enumeration a code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Strain,
    Species,
}

impl LookupKind {
    fn name_for(&self, code: i64) -> Option<&'static str> {
        match self {
            LookupKind::Strain => constants::strain_name(code),
            LookupKind::Species => constants::species_name(code),
        }
    }

    fn placeholder(&self) -> &'static str {
        match self {
            LookupKind::Strain => lookups::STRAIN_PLACEHOLDER,
            LookupKind::Species => lookups::SPECIES_PLACEHOLDER,
        }
    }
}

/// Resolve a code to its display name
///
/// A null code resolves to the empty string; an unmapped code to
/// `"<Cepa|Especie> Desconocida (<code>)"` so the original value survives.
pub fn resolve(kind: LookupKind, code: Option<i64>) -> String {
    match code {
        None => String::new(),
        Some(code) => match kind.name_for(code) {
            Some(name) => name.to_string(),
            None => format!("{} Desconocida ({})", kind.placeholder(), code),
        },
    }
}

pub fn is_known(kind: LookupKind, code: i64) -> bool {
    kind.name_for(code).is_some()
}
