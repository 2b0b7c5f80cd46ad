use crate::catalog::{Difficulty, Platform, ProblemRecord};

/// Current search text and the two enumerated filters. `None` means "All".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub difficulty: Option<Difficulty>,
    pub platform: Option<Platform>,
}

impl FilterState {
    /// True when any filter deviates from the all-unfiltered default.
    /// Controls whether empty groups are pruned from the view.
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.difficulty.is_some() || self.platform.is_some()
    }

    /// Search predicate alone: title or pattern contains the term as a
    /// case-insensitive substring. An empty term matches everything.
    pub fn matches_search(&self, record: &ProblemRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        record.title.to_lowercase().contains(&needle)
            || record.pattern.to_lowercase().contains(&needle)
    }

    pub fn matches(&self, record: &ProblemRecord) -> bool {
        self.matches_search(record)
            && self.difficulty.is_none_or(|d| d == record.difficulty)
            && self.platform.is_none_or(|p| p == record.platform)
    }

    pub fn cycle_difficulty(&mut self) {
        self.difficulty = match self.difficulty {
            None => Some(Difficulty::Easy),
            Some(Difficulty::Easy) => Some(Difficulty::Medium),
            Some(Difficulty::Medium) => Some(Difficulty::Hard),
            Some(Difficulty::Hard) => None,
        };
    }

    pub fn cycle_platform(&mut self) {
        self.platform = match self.platform {
            None => Some(Platform::LeetCode),
            Some(Platform::LeetCode) => Some(Platform::GeeksforGeeks),
            Some(Platform::GeeksforGeeks) => Some(Platform::Other),
            Some(Platform::Other) => None,
        };
    }

    pub fn difficulty_label(&self) -> &'static str {
        self.difficulty.map_or("All", Difficulty::as_str)
    }

    pub fn platform_label(&self) -> &'static str {
        self.platform.map_or("All", Platform::as_str)
    }
}
