use std::collections::BTreeMap;

use jarpub_util::errors::{PublishError, PublishResult};

use crate::model::{Overlay, Pom};

/// POM documents keyed by variant. The empty variant is the default POM.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PomGroup {
    poms: BTreeMap<String, Pom>,
}

impl PomGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a group from documents, rejecting repeated variants.
    pub fn from_poms(poms: impl IntoIterator<Item = Pom>) -> PublishResult<Self> {
        let mut group = Self::new();
        for pom in poms {
            group.add(pom)?;
        }
        Ok(group)
    }

    pub fn add(&mut self, pom: Pom) -> PublishResult<()> {
        if self.poms.contains_key(&pom.variant) {
            let variant = if pom.variant.is_empty() {
                "<default>".to_string()
            } else {
                pom.variant.clone()
            };
            return Err(PublishError::DuplicateVariant { variant });
        }
        self.poms.insert(pom.variant.clone(), pom);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.poms.is_empty()
    }

    /// The raw document declared for `variant`, without default filling.
    pub fn get(&self, variant: &str) -> Option<&Pom> {
        self.poms.get(variant)
    }

    /// Declared variants, the default one (`""`) included when present.
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.poms.keys().map(String::as_str)
    }

    pub fn default_pom(&self) -> Pom {
        self.poms.get("").cloned().unwrap_or_default()
    }

    /// The POM for `variant`: its own document gap-filled from the default.
    pub fn effective(&self, variant: &str) -> Pom {
        let mut pom = self.poms.get(variant).cloned().unwrap_or_default();
        pom.variant = variant.to_string();
        if let Some(default) = self.poms.get("") {
            pom.merge(default);
        }
        pom
    }

    /// Fill this group from a less specific one, variant by variant.
    /// Variants only `other` declares are taken over as they are.
    pub fn combine(&mut self, other: &PomGroup) {
        for (variant, theirs) in &other.poms {
            match self.poms.get_mut(variant) {
                Some(mine) => mine.merge(theirs),
                None => {
                    self.poms.insert(variant.clone(), theirs.clone());
                }
            }
        }
    }
}
