// File: ./src/model/family.rs
//! Regrouping of related stats into generalized families.
use crate::model::item::{FamilyEntry, FamilyGroup, FilterSet, ParsedStat};
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum StatFamily {
    #[strum(to_string = "attributes")]
    Attributes,
    #[strum(to_string = "elemental resistances")]
    ElementalResistances,
}

impl StatFamily {
    /// Substrings that put a stat into this family.
    pub fn markers(self) -> &'static [&'static str] {
        match self {
            StatFamily::Attributes => &["Dexterity", "Strength", "Intelligence"],
            StatFamily::ElementalResistances => {
                &["Lightning Resistance", "Cold Resistance", "Fire Resistance"]
            }
        }
    }

    /// Words swapped for the family placeholder in a matched template.
    pub fn replaced_terms(self) -> &'static [&'static str] {
        match self {
            StatFamily::Attributes => &["Dexterity", "Strength", "Intelligence"],
            StatFamily::ElementalResistances => &["Lightning", "Cold", "Fire"],
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            StatFamily::Attributes => "ATTRIBUTES",
            StatFamily::ElementalResistances => "ELEMENTAL_RESIST",
        }
    }

    pub fn matches(self, template: &str) -> bool {
        self.markers().iter().any(|marker| template.contains(marker))
    }

    pub fn generalize(self, template: &str) -> String {
        self.replaced_terms()
            .iter()
            .fold(template.to_string(), |acc, term| {
                acc.replace(*term, self.placeholder())
            })
    }

    /// Splits `stats` into this family's folded entries and the untouched rest.
    pub fn partition(self, stats: Vec<ParsedStat>) -> (FamilyGroup, Vec<ParsedStat>) {
        let mut group = FamilyGroup::new();
        let mut rest = Vec::with_capacity(stats.len());

        for stat in stats {
            if !self.matches(&stat.template) {
                rest.push(stat);
                continue;
            }
            let template = self.generalize(&stat.template);
            match group.get_mut(&template) {
                Some(entry) => entry.absorb(stat.magnitude),
                None => {
                    let entry = FamilyEntry::new(template.clone(), stat.magnitude);
                    group.insert(template, entry);
                }
            }
        }
        (group, rest)
    }

    /// Runs the pass on a whole set, moving matches out of `stats`.
    ///
    /// Entries already present in the family's group are kept and merged into.
    pub fn classify(self, mut set: FilterSet) -> FilterSet {
        let stats = std::mem::take(&mut set.stats);
        let (group, rest) = self.partition(stats);
        log::debug!(
            "Grouped {} {} filter(s), {} stat(s) left ungrouped",
            group.len(),
            self,
            rest.len()
        );

        let target = match self {
            StatFamily::Attributes => &mut set.attributes,
            StatFamily::ElementalResistances => &mut set.resistances,
        };
        for (template, entry) in group {
            match target.get_mut(&template) {
                Some(existing) => existing.merge(&entry),
                None => {
                    target.insert(template, entry);
                }
            }
        }
        set.stats = rest;
        set
    }
}
