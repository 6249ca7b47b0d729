//! Registry of the cases a session can switch between

use serde::Serialize;

use super::case::CaseSpec;

#[derive(Serialize)]
struct CaseManifestEntry<'a> {
    id: &'a str,
    name: &'a str,
    fans: usize,
}

#[derive(Serialize)]
struct CaseManifest<'a> {
    format_version: u32,
    default: &'a str,
    cases: Vec<CaseManifestEntry<'a>>,
}

/// Ordered list of selectable cases. Always holds at least one case.
#[derive(Clone, Debug)]
pub struct CaseCatalogue {
    cases: Vec<CaseSpec>,
}

impl CaseCatalogue {
    /// Catalogue with the built-in cases
    pub fn builtin() -> Self {
        Self {
            cases: vec![CaseSpec::aquario()],
        }
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CaseSpec> {
        self.cases.iter()
    }

    pub fn default_id(&self) -> &str {
        &self.cases[0].id
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cases.iter().any(|c| c.id == id)
    }

    /// Case by id, falling back to the first case for unknown ids
    pub fn get(&self, id: &str) -> &CaseSpec {
        self.cases
            .iter()
            .find(|c| c.id == id)
            .unwrap_or(&self.cases[0])
    }

    /// Add a case, replacing any case with the same id
    pub fn insert(&mut self, spec: CaseSpec) {
        match self.cases.iter_mut().find(|c| c.id == spec.id) {
            Some(existing) => *existing = spec,
            None => self.cases.push(spec),
        }
    }

    pub fn manifest_json(&self) -> String {
        let out = CaseManifest {
            format_version: 1,
            default: self.default_id(),
            cases: self
                .cases
                .iter()
                .map(|c| CaseManifestEntry {
                    id: &c.id,
                    name: &c.name,
                    fans: c.fan_slots.len(),
                })
                .collect(),
        };
        serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for CaseCatalogue {
    fn default() -> Self {
        Self::builtin()
    }
}
