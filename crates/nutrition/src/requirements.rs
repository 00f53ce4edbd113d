use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Age groups with distinct daily intake targets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum AgeGroup {
    #[strum(serialize = "school_age_6_12")]
    #[serde(rename = "school_age_6_12")]
    SchoolAge6To12,
    #[strum(serialize = "school_age_13_18")]
    #[serde(rename = "school_age_13_18")]
    SchoolAge13To18,
}

/// Daily targets a compliant menu must meet for one age group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeGroupRequirement {
    pub age_group: AgeGroup,
    pub daily_calories: f64,
    /// Grams.
    pub daily_protein: f64,
    /// Milligrams.
    pub daily_calcium: f64,
    /// Milligrams.
    pub daily_iron: f64,
    /// Milligrams.
    pub daily_vitamin_c: f64,
    /// International units.
    pub daily_vitamin_a: f64,
}

impl AgeGroup {
    /// Fixed requirement table keyed by age group.
    pub fn requirement(&self) -> AgeGroupRequirement {
        match self {
            AgeGroup::SchoolAge6To12 => AgeGroupRequirement {
                age_group: *self,
                daily_calories: 1800.0,
                daily_protein: 45.0,
                daily_calcium: 1000.0,
                daily_iron: 10.0,
                daily_vitamin_c: 45.0,
                daily_vitamin_a: 700.0,
            },
            AgeGroup::SchoolAge13To18 => AgeGroupRequirement {
                age_group: *self,
                daily_calories: 2200.0,
                daily_protein: 55.0,
                daily_calcium: 1200.0,
                daily_iron: 12.0,
                daily_vitamin_c: 75.0,
                daily_vitamin_a: 900.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn age_group_parses_its_wire_names() {
        assert_eq!(
            AgeGroup::from_str("school_age_6_12").unwrap(),
            AgeGroup::SchoolAge6To12
        );
        assert_eq!(
            AgeGroup::from_str("school_age_13_18").unwrap(),
            AgeGroup::SchoolAge13To18
        );
        assert!(AgeGroup::from_str("toddlers").is_err());
    }

    #[test]
    fn older_group_has_higher_targets() {
        let younger = AgeGroup::SchoolAge6To12.requirement();
        let older = AgeGroup::SchoolAge13To18.requirement();
        assert!(older.daily_calories > younger.daily_calories);
        assert!(older.daily_protein > younger.daily_protein);
    }
}
