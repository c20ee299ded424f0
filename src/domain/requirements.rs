use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// How much performance the requester needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceNeeds {
    /// Any machine will do.
    Low,
    /// At least mid-range performance.
    Medium,
    /// Top-tier performance only.
    High,
}

impl PerformanceNeeds {
    /// The lowest performance score that satisfies these needs.
    #[must_use]
    pub const fn minimum_score(self) -> u8 {
        match self {
            Self::High => 8,
            Self::Medium => 6,
            Self::Low => 0,
        }
    }
}

impl fmt::Display for PerformanceNeeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        })
    }
}

/// Error returned when a string does not name a [`PerformanceNeeds`] level.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown performance level '{0}': expected low, medium or high")]
pub struct UnknownPerformanceNeeds(pub String);

impl FromStr for PerformanceNeeds {
    type Err = UnknownPerformanceNeeds;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(UnknownPerformanceNeeds(s.to_string())),
        }
    }
}

/// Structured constraints for a recommendation request.
///
/// Every field is optional. Blank text fields are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    /// Workload the machine is needed for, e.g. `video editing`.
    #[serde(default)]
    pub use_case: Option<String>,
    /// Maximum price in whole currency units.
    #[serde(default)]
    pub budget: Option<u32>,
    /// Catalog category name, matched case-insensitively.
    #[serde(default)]
    pub category: Option<String>,
    /// Minimum performance tier.
    #[serde(default)]
    pub performance_needs: Option<PerformanceNeeds>,
}

impl Requirements {
    /// Whether no constraint is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.use_case().is_none()
            && self.budget.is_none()
            && self.category().is_none()
            && self.performance_needs.is_none()
    }

    /// The use case, if one was given and is not blank.
    #[must_use]
    pub fn use_case(&self) -> Option<&str> {
        non_blank(self.use_case.as_deref())
    }

    /// The category, if one was given and is not blank.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(PerformanceNeeds::High, 8)]
    #[test_case(PerformanceNeeds::Medium, 6)]
    #[test_case(PerformanceNeeds::Low, 0)]
    fn performance_thresholds(needs: PerformanceNeeds, expected: u8) {
        assert_eq!(needs.minimum_score(), expected);
    }

    #[test]
    fn performance_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<PerformanceNeeds>(), Ok(PerformanceNeeds::High));
        assert_eq!(" medium ".parse::<PerformanceNeeds>(), Ok(PerformanceNeeds::Medium));
        assert!("extreme".parse::<PerformanceNeeds>().is_err());
    }

    #[test]
    fn blank_fields_count_as_absent() {
        let requirements = Requirements {
            use_case: Some("   ".to_string()),
            category: Some(String::new()),
            ..Requirements::default()
        };

        assert!(requirements.is_empty());
        assert_eq!(requirements.use_case(), None);
    }

    #[test]
    fn deserializes_from_camel_case_json() {
        let requirements: Requirements = serde_json::from_str(
            r#"{"useCase":"video editing","budget":2000,"performanceNeeds":"high"}"#,
        )
        .unwrap();

        assert_eq!(requirements.use_case(), Some("video editing"));
        assert_eq!(requirements.budget, Some(2000));
        assert_eq!(requirements.performance_needs, Some(PerformanceNeeds::High));
        assert!(!requirements.is_empty());
    }
}
