use serde::{Deserialize, Serialize};
use thiserror::Error;

const PROBLEMS_JSON: &str = include_str!("../assets/problems.json");

pub type ProblemId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Case-insensitive lookup for CLI presets. Unknown names return None.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    LeetCode,
    GeeksforGeeks,
    Other,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::LeetCode => "LeetCode",
            Platform::GeeksforGeeks => "GeeksforGeeks",
            Platform::Other => "Other",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "leetcode" => Some(Platform::LeetCode),
            "geeksforgeeks" | "gfg" => Some(Platform::GeeksforGeeks),
            "other" => Some(Platform::Other),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProblemRecord {
    pub id: ProblemId,
    pub title: String,
    pub pattern: String,
    pub sequence: u32,
    pub difficulty: Difficulty,
    pub platform: Platform,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("bundled problem catalog is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The fixed problem catalog, parsed once at startup from the bundled JSON
/// and immutable for the process lifetime.
pub struct Catalog {
    problems: Vec<ProblemRecord>,
}

impl Catalog {
    pub fn load() -> Result<Self, CatalogError> {
        let problems: Vec<ProblemRecord> = serde_json::from_str(PROBLEMS_JSON)?;
        Ok(Self { problems })
    }

    pub fn from_records(problems: Vec<ProblemRecord>) -> Self {
        Self { problems }
    }

    pub fn problems(&self) -> &[ProblemRecord] {
        &self.problems
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Pattern names in first-encounter catalog order, deduplicated.
    pub fn pattern_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for record in &self.problems {
            if !names.contains(&record.pattern.as_str()) {
                names.push(&record.pattern);
            }
        }
        names
    }

    /// A pattern's ordering key is the `sequence` of its first record in
    /// catalog order. Unknown patterns have no resolvable sequence.
    pub fn pattern_sequence(&self, pattern: &str) -> Option<u32> {
        self.problems
            .iter()
            .find(|p| p.pattern == pattern)
            .map(|p| p.sequence)
    }
}
