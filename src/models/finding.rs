use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity assigned by the classifier - restricted to the two rubric levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Category {
    /// 2 = vague or generic but at least partially addresses the topic
    Somewhat,
    /// 3 = refuses to answer, contradicts info, or uses avoidance tactics
    Clearly,
}

impl Category {
    /// Numeric code used in prompts, replies and persisted reports
    pub fn code(self) -> u8 {
        match self {
            Category::Somewhat => 2,
            Category::Clearly => 3,
        }
    }

    /// Contribution of one finding of this category to the raw score
    pub fn weight(self) -> u32 {
        match self {
            Category::Somewhat => 1,
            Category::Clearly => 2,
        }
    }
}

impl TryFrom<u8> for Category {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            2 => Ok(Category::Somewhat),
            3 => Ok(Category::Clearly),
            other => Err(format!("invalid evasiveness category: {}", other)),
        }
    }
}

impl From<Category> for u8 {
    fn from(category: Category) -> Self {
        category.code()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// An excerpt the classifier flagged as evasive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// The 2-3 sentence excerpt quoted by the model
    #[serde(rename = "Statement")]
    pub excerpt: String,
    #[serde(rename = "Category")]
    pub category: Category,
    /// Free-text rationale from the model
    #[serde(rename = "Reason")]
    pub reason: String,
}

impl Finding {
    pub fn new(excerpt: impl Into<String>, category: Category, reason: impl Into<String>) -> Self {
        Self {
            excerpt: excerpt.into(),
            category,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_codes_and_weights() {
        assert_eq!(Category::Somewhat.code(), 2);
        assert_eq!(Category::Clearly.code(), 3);
        assert_eq!(Category::Somewhat.weight(), 1);
        assert_eq!(Category::Clearly.weight(), 2);
    }

    #[test]
    fn test_category_try_from() {
        assert_eq!(Category::try_from(2), Ok(Category::Somewhat));
        assert_eq!(Category::try_from(3), Ok(Category::Clearly));
        assert!(Category::try_from(1).is_err());
    }
}
