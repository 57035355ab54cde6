use serde::{Deserialize, Serialize};

/// Definition of one underlying psychological driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverDefinition {
    /// Stable identifier, matches `PatternDefinition::driver`
    pub id: String,

    /// Display name
    pub name: String,

    /// Driver ids this driver structurally opposes
    #[serde(default)]
    pub conflicts_with: Vec<String>,

    /// Short interpretation of what the driver expresses
    pub insight: String,

    /// What the driver looks like when well integrated
    pub healthy_expression: String,

    /// What the driver looks like when it runs the show
    pub unhealthy_expression: String,

    /// Suggested direction for working with the driver
    pub therapeutic_direction: String,
}

impl DriverDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        insight: impl Into<String>,
        healthy_expression: impl Into<String>,
        unhealthy_expression: impl Into<String>,
        therapeutic_direction: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            conflicts_with: Vec::new(),
            insight: insight.into(),
            healthy_expression: healthy_expression.into(),
            unhealthy_expression: unhealthy_expression.into(),
            therapeutic_direction: therapeutic_direction.into(),
        }
    }

    /// Builder: declare opposing drivers
    #[must_use]
    pub fn conflicts_with(mut self, ids: &[&str]) -> Self {
        self.conflicts_with = ids.iter().map(|s| (*s).to_string()).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_list_defaults_empty() {
        let driver = DriverDefinition::new(
            "control",
            "Need for Control",
            "insight",
            "healthy",
            "unhealthy",
            "direction",
        );
        assert!(driver.conflicts_with.is_empty());

        let driver = driver.conflicts_with(&["acceptance"]);
        assert_eq!(driver.conflicts_with, vec!["acceptance".to_string()]);
    }
}
