use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The tier a catalog item is sold under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Entry-level office machines.
    Basic,
    /// Mid-range business machines.
    Standard,
    /// High-end business machines.
    Premium,
    /// Workstations aimed at software and content development.
    Developer,
}

impl Category {
    /// All categories, in tier order.
    pub const ALL: [Self; 4] = [Self::Basic, Self::Standard, Self::Premium, Self::Developer];

    /// The display name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Standard => "Standard",
            Self::Premium => "Premium",
            Self::Developer => "Developer",
        }
    }

    /// Case-insensitive comparison against a free-text category name.
    #[must_use]
    pub fn matches(self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name.trim())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Category`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown category '{0}': expected one of Basic, Standard, Premium, Developer")]
pub struct UnknownCategory(String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.matches(s))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A single purchasable catalog entry.
///
/// Records are immutable once loaded. The catalog store owns them, and intake
/// sessions only ever hold copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Stable catalog identifier, e.g. `dell-latitude-3420`.
    pub id: String,
    /// Manufacturer name, e.g. `Dell`.
    pub manufacturer: String,
    /// Model name, e.g. `Latitude 3420`.
    pub model: String,
    /// Processor description.
    pub processor: String,
    /// Memory size, e.g. `16GB DDR4`.
    pub memory: String,
    /// Storage size, e.g. `512GB SSD`.
    pub storage: String,
    /// Price in whole currency units.
    pub price: u32,
    /// The tier the item is sold under.
    pub category: Category,
    /// Free-text marketing description.
    pub description: String,
    /// Free-text specification summary.
    pub specifications: String,
    /// Whether the item can currently be ordered.
    #[serde(default = "available_by_default")]
    pub available: bool,
    /// Workloads the item is suited for.
    #[serde(default)]
    pub use_cases: Vec<String>,
    /// Short selling points.
    #[serde(default)]
    pub selling_points: Vec<String>,
    /// Who the item is aimed at.
    #[serde(default)]
    pub target_audience: String,
    /// Relative performance, from 0 to 10.
    pub performance_score: u8,
}

const fn available_by_default() -> bool {
    true
}

impl ItemRecord {
    /// `Manufacturer Model`, the form users refer to an item by.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.manufacturer, self.model)
    }

    /// Lowercased text blob that free-text queries are matched against.
    pub(crate) fn searchable_text(&self) -> String {
        let use_cases = self.use_cases.join(" ");
        let selling_points = self.selling_points.join(" ");
        [
            self.manufacturer.as_str(),
            self.model.as_str(),
            self.description.as_str(),
            use_cases.as_str(),
            self.category.as_str(),
            self.target_audience.as_str(),
            selling_points.as_str(),
            self.specifications.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }

    /// Whether a free-text selection names this item.
    ///
    /// The selection must mention both the manufacturer and the model.
    #[must_use]
    pub fn is_named_by(&self, selection: &str) -> bool {
        selection.contains(&self.manufacturer) && selection.contains(&self.model)
    }
}

/// The subset of an [`ItemRecord`] presented to users when listing options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    /// Manufacturer name.
    pub manufacturer: String,
    /// Model name.
    pub model: String,
    /// Processor description.
    pub processor: String,
    /// Memory size.
    pub memory: String,
    /// Storage size.
    pub storage: String,
    /// Price in whole currency units.
    pub price: u32,
    /// The tier the item is sold under.
    pub category: Category,
    /// Free-text description, omitted when blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&ItemRecord> for ItemSummary {
    fn from(item: &ItemRecord) -> Self {
        Self {
            manufacturer: item.manufacturer.clone(),
            model: item.model.clone(),
            processor: item.processor.clone(),
            memory: item.memory.clone(),
            storage: item.storage.clone(),
            price: item.price,
            category: item.category,
            description: Some(item.description.clone()).filter(|d| !d.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::storage::reference_catalog;

    #[test_case("premium", Category::Premium; "lowercase")]
    #[test_case("DEVELOPER", Category::Developer; "uppercase")]
    #[test_case("  Basic ", Category::Basic; "padded")]
    fn category_parses_case_insensitively(input: &str, expected: Category) {
        assert_eq!(input.parse::<Category>().unwrap(), expected);
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!("Gaming".parse::<Category>().is_err());
    }

    #[test]
    fn searchable_text_is_lowercase_and_covers_tags() {
        let catalog = reference_catalog();
        let macbook = catalog.iter().find(|i| i.manufacturer == "Apple").unwrap();
        let text = macbook.searchable_text();

        assert!(text.contains("apple"));
        assert!(text.contains("video editing"));
        assert!(text.contains("silent operation"));
        assert!(text.contains("prores support"));
        assert_eq!(text, text.to_lowercase());
    }

    #[test]
    fn selection_must_name_manufacturer_and_model() {
        let catalog = reference_catalog();
        let dell = &catalog[0];

        assert!(dell.is_named_by("Dell Latitude 3420 - $899"));
        assert!(!dell.is_named_by("Dell XPS 13"));
        assert!(!dell.is_named_by("Latitude 3420"));
    }

    #[test]
    fn summary_drops_blank_description() {
        let mut item = reference_catalog()[0].clone();
        item.description = "  ".to_string();
        assert_eq!(ItemSummary::from(&item).description, None);
    }
}
