use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag rules applied uniformly to every function evaluated in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityPolicy {
    pub include_tag: Option<String>,
    pub exclude_tag: Option<String>,
}

/// Why a function was left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ineligibility {
    HasExcludeTag(String),
    MissingIncludeTag(String),
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HasExcludeTag(tag) => write!(f, "has exclude tag '{tag}'"),
            Self::MissingIncludeTag(tag) => write!(f, "missing include tag '{tag}'"),
        }
    }
}

impl EligibilityPolicy {
    pub fn new(include_tag: Option<String>, exclude_tag: Option<String>) -> Self {
        Self {
            include_tag,
            exclude_tag,
        }
    }

    /// Applies the decision table. The exclude tag is checked before the
    /// include tag, so a function carrying both is excluded.
    pub fn evaluate(&self, tags: &[String]) -> Result<(), Ineligibility> {
        if let Some(exclude) = &self.exclude_tag {
            if has_tag(tags, exclude) {
                return Err(Ineligibility::HasExcludeTag(exclude.clone()));
            }
        }

        if let Some(include) = &self.include_tag {
            if !has_tag(tags, include) {
                return Err(Ineligibility::MissingIncludeTag(include.clone()));
            }
        }

        Ok(())
    }
}

pub fn is_eligible(tags: &[String], policy: &EligibilityPolicy) -> bool {
    policy.evaluate(tags).is_ok()
}

fn has_tag(tags: &[String], name: &str) -> bool {
    tags.iter().any(|tag| tag == name)
}
