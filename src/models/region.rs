use std::collections::BTreeSet;

use crate::models::CanonicalTable;
use crate::utils::constants::ALL_REGIONS;

/// Which regions participate in an aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RegionFilter {
    #[default]
    All,
    Regions(BTreeSet<String>),
}

impl RegionFilter {
    pub fn region(name: impl Into<String>) -> Self {
        RegionFilter::Regions(BTreeSet::from([name.into()]))
    }

    /// Interpret a selection as handed over by a consumer. An empty
    /// selection, or one containing the `all` pseudo-value, selects
    /// everything.
    pub fn from_selection<I, S>(selection: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut regions = BTreeSet::new();
        for name in selection {
            let name = name.as_ref().trim();
            if is_all_regions(name) {
                return RegionFilter::All;
            }
            if !name.is_empty() {
                regions.insert(name.to_string());
            }
        }

        if regions.is_empty() {
            RegionFilter::All
        } else {
            RegionFilter::Regions(regions)
        }
    }

    pub fn matches(&self, region: &str) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Regions(regions) => regions.contains(region),
        }
    }
}

pub fn is_all_regions(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(ALL_REGIONS)
}

/// Selectable options: `all` first, then every concrete region in
/// lexicographic order, unprettified.
pub fn region_options(table: &CanonicalTable) -> Vec<String> {
    std::iter::once(ALL_REGIONS.to_string())
        .chain(table.regions().iter().cloned())
        .collect()
}

/// Title-case a region for display, e.g. `"north east"` -> `"North East"`.
pub fn display_label(region: &str) -> String {
    region
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
