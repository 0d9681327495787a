use serde::{Deserialize, Serialize};

/// Separator placed between a category and a free-text comment.
pub const COMMENT_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub filename: String,
    #[serde(default)]
    pub category: String,
}

impl Record {
    pub fn new(filename: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            category: category.into(),
        }
    }

    pub fn unclassified(filename: impl Into<String>) -> Self {
        Self::new(filename, "")
    }

    pub fn is_classified(&self) -> bool {
        !self.category.is_empty()
    }

    /// Category with any appended comment removed.
    pub fn label(&self) -> &str {
        self.category
            .split(COMMENT_SEPARATOR)
            .next()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Backward,
    Forward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub classified: usize,
    pub total: usize,
}

impl Progress {
    pub fn unclassified(&self) -> usize {
        self.total - self.classified
    }
}
