use std::collections::{BTreeSet, HashSet};

use crate::catalog::{Catalog, ProblemId, ProblemRecord};
use crate::view::filter::FilterState;

/// One pattern group in display order: the group name, its ordering key,
/// and the filtered member records in catalog order.
pub struct GroupView<'a> {
    pub pattern: &'a str,
    pub sequence: Option<u32>,
    pub problems: Vec<&'a ProblemRecord>,
}

impl GroupView<'_> {
    pub fn label(&self) -> String {
        match self.sequence {
            Some(seq) => format!("{seq}. {}", self.pattern),
            None => self.pattern.to_string(),
        }
    }

    pub fn completed_count(&self, progress: &BTreeSet<ProblemId>) -> usize {
        self.problems
            .iter()
            .filter(|p| progress.contains(&p.id))
            .count()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stats {
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
}

impl Stats {
    pub fn new(completed: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            (100.0 * completed as f64 / total as f64).round() as u8
        };
        Self {
            completed,
            total,
            percentage,
        }
    }

    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.completed)
    }

    pub fn rank_title(&self) -> &'static str {
        match self.percentage {
            100 => "Master",
            p if p > 75 => "Expert",
            p if p > 50 => "Intermediate",
            p if p > 25 => "Beginner",
            _ => "Novice",
        }
    }
}

pub struct ViewModel<'a> {
    pub groups: Vec<GroupView<'a>>,
    pub stats: Stats,
}

impl ViewModel<'_> {
    pub fn visible_patterns(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.pattern).collect()
    }
}

/// The derived-view pipeline: filter, group over the full catalog,
/// conditionally prune empty groups, order by sequence. Pure function of
/// its inputs; callers re-invoke it after every state change.
pub fn compute_view<'a>(
    catalog: &'a Catalog,
    progress: &BTreeSet<ProblemId>,
    filters: &FilterState,
) -> ViewModel<'a> {
    // Grouping starts from the full catalog so the complete group-name set
    // is known even when a group ends up with zero filtered members.
    let mut groups: Vec<GroupView<'a>> = Vec::new();
    for record in catalog.problems() {
        if !groups.iter().any(|g| g.pattern == record.pattern) {
            groups.push(GroupView {
                pattern: &record.pattern,
                sequence: catalog.pattern_sequence(&record.pattern),
                problems: Vec::new(),
            });
        }
    }

    for record in catalog.problems() {
        if filters.matches(record) {
            if let Some(group) = groups.iter_mut().find(|g| g.pattern == record.pattern) {
                group.problems.push(record);
            }
        }
    }

    // Empty groups only disappear while a filter is active.
    if filters.is_active() {
        groups.retain(|g| !g.problems.is_empty());
    }

    // Stable sort keeps catalog encounter order for equal sequences;
    // unresolvable sequences sort last.
    groups.sort_by_key(|g| g.sequence.unwrap_or(u32::MAX));

    ViewModel {
        groups,
        stats: Stats::new(progress.len(), catalog.len()),
    }
}

/// A row in the flattened checklist: a group header, or a member problem of
/// an expanded group. Both navigation and rendering walk this same order.
pub enum VisibleRow<'a> {
    Group {
        group: &'a GroupView<'a>,
        expanded: bool,
    },
    Problem {
        record: &'a ProblemRecord,
    },
}

pub fn flatten_rows<'a>(
    groups: &'a [GroupView<'a>],
    expansion: &HashSet<String>,
) -> Vec<VisibleRow<'a>> {
    let mut rows = Vec::new();
    for group in groups {
        let expanded = expansion.contains(group.pattern);
        rows.push(VisibleRow::Group { group, expanded });
        if expanded {
            for record in &group.problems {
                rows.push(VisibleRow::Problem { record });
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Difficulty, Platform};

    fn record(
        id: ProblemId,
        title: &str,
        pattern: &str,
        sequence: u32,
        difficulty: Difficulty,
        platform: Platform,
    ) -> ProblemRecord {
        ProblemRecord {
            id,
            title: title.to_string(),
            pattern: pattern.to_string(),
            sequence,
            difficulty,
            platform,
        }
    }

    fn small_catalog() -> Catalog {
        Catalog::from_records(vec![
            record(1, "Max Sum Subarray", "Sliding Window", 1, Difficulty::Easy, Platform::LeetCode),
            record(2, "Min Window Substring", "Sliding Window", 1, Difficulty::Hard, Platform::Other),
            record(3, "Two Sum Sorted", "Two Pointers", 2, Difficulty::Easy, Platform::LeetCode),
        ])
    }

    #[test]
    fn difficulty_filter_prunes_and_orders_groups() {
        let catalog = small_catalog();
        let progress: BTreeSet<ProblemId> = [1].into_iter().collect();
        let mut filters = FilterState::default();
        filters.difficulty = Some(Difficulty::Easy);

        let view = compute_view(&catalog, &progress, &filters);

        assert_eq!(view.groups.len(), 2);
        assert_eq!(view.groups[0].label(), "1. Sliding Window");
        assert_eq!(view.groups[0].problems.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(view.groups[1].label(), "2. Two Pointers");
        assert_eq!(view.groups[1].problems.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3]);

        assert_eq!(view.stats.completed, 1);
        assert_eq!(view.stats.total, 3);
        assert_eq!(view.stats.percentage, 33);
    }

    #[test]
    fn every_row_satisfies_all_active_predicates_and_none_is_missing() {
        let catalog = Catalog::load().unwrap();
        let progress = BTreeSet::new();
        let mut filters = FilterState::default();
        filters.search = "tree".to_string();
        filters.difficulty = Some(Difficulty::Medium);
        filters.platform = Some(Platform::LeetCode);

        let view = compute_view(&catalog, &progress, &filters);

        let shown: Vec<ProblemId> = view
            .groups
            .iter()
            .flat_map(|g| g.problems.iter().map(|p| p.id))
            .collect();
        for group in &view.groups {
            for problem in &group.problems {
                assert!(filters.matches(problem));
            }
        }
        for record in catalog.problems() {
            assert_eq!(filters.matches(record), shown.contains(&record.id));
        }
    }

    #[test]
    fn no_active_filter_retains_every_group() {
        let catalog = Catalog::load().unwrap();
        let view = compute_view(&catalog, &BTreeSet::new(), &FilterState::default());
        assert_eq!(view.groups.len(), catalog.pattern_names().len());
        // Unfiltered grouping is derived from the full catalog, so no group
        // can be empty.
        assert!(view.groups.iter().all(|g| !g.problems.is_empty()));
    }

    #[test]
    fn active_filter_drops_groups_with_no_members() {
        let catalog = small_catalog();
        let mut filters = FilterState::default();
        filters.search = "two sum".to_string();

        let view = compute_view(&catalog, &BTreeSet::new(), &filters);
        assert_eq!(view.visible_patterns(), vec!["Two Pointers"]);
    }

    #[test]
    fn group_order_is_nondecreasing_with_sequence_less_groups_last() {
        let catalog = Catalog::from_records(vec![
            record(1, "A", "Late", 9, Difficulty::Easy, Platform::Other),
            record(2, "B", "Early", 2, Difficulty::Easy, Platform::Other),
            record(3, "C", "Mid", 5, Difficulty::Easy, Platform::Other),
        ]);
        let view = compute_view(&catalog, &BTreeSet::new(), &FilterState::default());
        let sequences: Vec<u32> = view
            .groups
            .iter()
            .map(|g| g.sequence.unwrap_or(u32::MAX))
            .collect();
        let mut sorted = sequences.clone();
        sorted.sort();
        assert_eq!(sequences, sorted);
        assert_eq!(view.visible_patterns(), vec!["Early", "Mid", "Late"]);
    }

    #[test]
    fn members_keep_catalog_order_within_a_group() {
        let catalog = Catalog::load().unwrap();
        let view = compute_view(&catalog, &BTreeSet::new(), &FilterState::default());
        for group in &view.groups {
            let ids: Vec<ProblemId> = group.problems.iter().map(|p| p.id).collect();
            let mut catalog_order: Vec<ProblemId> = catalog
                .problems()
                .iter()
                .filter(|p| p.pattern == group.pattern)
                .map(|p| p.id)
                .collect();
            catalog_order.retain(|id| ids.contains(id));
            assert_eq!(ids, catalog_order);
        }
    }

    #[test]
    fn stats_percentage_bounds_and_zero_total() {
        assert_eq!(Stats::new(0, 0).percentage, 0);
        assert_eq!(Stats::new(0, 79).percentage, 0);
        assert_eq!(Stats::new(79, 79).percentage, 100);
        assert_eq!(Stats::new(1, 3).percentage, 33);
        assert_eq!(Stats::new(2, 3).percentage, 67);
        for completed in 0..=10 {
            let stats = Stats::new(completed, 10);
            assert!(stats.percentage <= 100);
        }
    }

    #[test]
    fn rank_title_tiers() {
        assert_eq!(Stats::new(0, 100).rank_title(), "Novice");
        assert_eq!(Stats::new(25, 100).rank_title(), "Novice");
        assert_eq!(Stats::new(26, 100).rank_title(), "Beginner");
        assert_eq!(Stats::new(51, 100).rank_title(), "Intermediate");
        assert_eq!(Stats::new(76, 100).rank_title(), "Expert");
        assert_eq!(Stats::new(100, 100).rank_title(), "Master");
    }

    #[test]
    fn remaining_counts_unsolved() {
        assert_eq!(Stats::new(42, 79).remaining(), 37);
        assert_eq!(Stats::new(0, 0).remaining(), 0);
    }

    #[test]
    fn flatten_hides_members_of_collapsed_groups() {
        let catalog = small_catalog();
        let view = compute_view(&catalog, &BTreeSet::new(), &FilterState::default());

        let all_expanded: HashSet<String> =
            ["Sliding Window", "Two Pointers"].iter().map(|s| s.to_string()).collect();
        let rows = flatten_rows(&view.groups, &all_expanded);
        assert_eq!(rows.len(), 5); // 2 headers + 3 problems

        let one_collapsed: HashSet<String> = ["Two Pointers".to_string()].into_iter().collect();
        let rows = flatten_rows(&view.groups, &one_collapsed);
        assert_eq!(rows.len(), 3); // 2 headers + Two Pointers' single member
        assert!(matches!(rows[0], VisibleRow::Group { expanded: false, .. }));
        assert!(matches!(rows[1], VisibleRow::Group { expanded: true, .. }));
        assert!(matches!(rows[2], VisibleRow::Problem { record } if record.id == 3));
    }
}
