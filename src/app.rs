use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

use anyhow::Result;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::catalog::{Catalog, ProblemId};
use crate::config::Config;
use crate::store::json_store::JsonStore;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;
use crate::view::filter::FilterState;
use crate::view::pipeline::{self, Stats, ViewModel, VisibleRow};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    Search,
}

/// Owned snapshot of one visible row, used by mutation paths so nothing
/// borrows the catalog while state changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowKind {
    Group(String),
    Problem(ProblemId),
}

pub struct App {
    pub catalog: Catalog,
    pub progress: BTreeSet<ProblemId>,
    pub filters: FilterState,
    pub expanded: HashSet<String>,
    pub selected: usize,
    pub input_mode: InputMode,
    pub search_input: LineInput,
    pub banner_dismissed: bool,
    pub should_quit: bool,
    pub config: Config,
    pub theme: &'static Theme,
    pub store: Option<JsonStore>,
    rng: SmallRng,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = Config::load().unwrap_or_default();
        let catalog = Catalog::load()?;
        let store = JsonStore::with_base_dir(PathBuf::from(&config.data_dir)).ok();
        Ok(Self::assemble(catalog, store, config))
    }

    /// Wire up an App from parts. Progress comes from the store (empty on
    /// absent or corrupt data); every pattern starts expanded.
    pub fn assemble(catalog: Catalog, store: Option<JsonStore>, config: Config) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let progress = store
            .as_ref()
            .map(|s| s.load_progress())
            .unwrap_or_default();
        let expanded: HashSet<String> = catalog
            .pattern_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();

        Self {
            catalog,
            progress,
            filters: FilterState::default(),
            expanded,
            selected: 0,
            input_mode: InputMode::Browse,
            search_input: LineInput::new(""),
            banner_dismissed: false,
            should_quit: false,
            config,
            theme,
            store,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn view(&self) -> ViewModel<'_> {
        pipeline::compute_view(&self.catalog, &self.progress, &self.filters)
    }

    pub fn stats(&self) -> Stats {
        Stats::new(self.progress.len(), self.catalog.len())
    }

    /// Flattened visible rows as owned values, in the same order the list
    /// widget renders them.
    pub fn visible_row_kinds(&self) -> Vec<RowKind> {
        let view = self.view();
        pipeline::flatten_rows(&view.groups, &self.expanded)
            .into_iter()
            .map(|row| match row {
                VisibleRow::Group { group, .. } => RowKind::Group(group.pattern.to_string()),
                VisibleRow::Problem { record } => RowKind::Problem(record.id),
            })
            .collect()
    }

    pub fn select_next(&mut self) {
        let count = self.visible_row_kinds().len();
        if count > 0 && self.selected + 1 < count {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_row_kinds().len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_row_kinds().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    /// Space/Enter on the selected row: completion toggle on a problem,
    /// expansion toggle on a group header.
    pub fn activate_selected(&mut self) {
        let rows = self.visible_row_kinds();
        match rows.get(self.selected) {
            Some(RowKind::Group(pattern)) => self.toggle_group(pattern),
            Some(RowKind::Problem(id)) => self.toggle_problem(*id),
            None => {}
        }
        self.clamp_selection();
    }

    /// Symmetric-difference the id into the completed set; every mutation
    /// is immediately re-persisted in full.
    pub fn toggle_problem(&mut self, id: ProblemId) {
        if !self.progress.remove(&id) {
            self.progress.insert(id);
        }
        self.persist_progress();
    }

    fn persist_progress(&self) {
        if let Some(store) = &self.store {
            let _ = store.save_progress(&self.progress);
        }
    }

    pub fn is_completed(&self, id: ProblemId) -> bool {
        self.progress.contains(&id)
    }

    pub fn toggle_group(&mut self, pattern: &str) {
        if !self.expanded.remove(pattern) {
            self.expanded.insert(pattern.to_string());
        }
    }

    pub fn is_expanded(&self, pattern: &str) -> bool {
        self.expanded.contains(pattern)
    }

    /// Apply a new search term. When the term becomes non-empty, groups
    /// with a matching member (or matching name) are unioned into the
    /// expansion set. Expansion only grows from search; clearing the term
    /// never collapses anything.
    pub fn set_search(&mut self, term: String) {
        let changed = term != self.filters.search;
        self.filters.search = term;
        if changed && !self.filters.search.is_empty() {
            for record in self.catalog.problems() {
                if self.filters.matches_search(record)
                    && !self.expanded.contains(&record.pattern)
                {
                    self.expanded.insert(record.pattern.clone());
                }
            }
        }
        self.clamp_selection();
    }

    pub fn cycle_difficulty(&mut self) {
        self.filters.cycle_difficulty();
        self.clamp_selection();
    }

    pub fn cycle_platform(&mut self) {
        self.filters.cycle_platform();
        self.clamp_selection();
    }

    /// Expand-all and collapse-all operate on the currently visible groups
    /// only, never the whole catalog.
    pub fn expand_all(&mut self) {
        let view = pipeline::compute_view(&self.catalog, &self.progress, &self.filters);
        for group in &view.groups {
            if !self.expanded.contains(group.pattern) {
                self.expanded.insert(group.pattern.to_string());
            }
        }
    }

    pub fn collapse_all(&mut self) {
        let view = pipeline::compute_view(&self.catalog, &self.progress, &self.filters);
        for group in &view.groups {
            self.expanded.remove(group.pattern);
        }
        self.clamp_selection();
    }

    /// Drives which action the single toggle control performs next.
    pub fn all_visible_expanded(&self) -> bool {
        let view = self.view();
        !view.groups.is_empty()
            && view
                .groups
                .iter()
                .all(|g| self.expanded.contains(g.pattern))
    }

    pub fn toggle_expansion_all(&mut self) {
        if self.all_visible_expanded() {
            self.collapse_all();
        } else {
            self.expand_all();
        }
    }

    /// Move the selection to a random unsolved problem among the visible
    /// rows. No-op when everything visible is solved or collapsed away.
    pub fn jump_to_random_unsolved(&mut self) {
        let rows = self.visible_row_kinds();
        let candidates: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| match row {
                RowKind::Problem(id) if !self.progress.contains(id) => Some(i),
                _ => None,
            })
            .collect();
        if candidates.is_empty() {
            return;
        }
        self.selected = candidates[self.rng.gen_range(0..candidates.len())];
    }

    pub fn dismiss_banner(&mut self) {
        self.banner_dismissed = true;
    }
}
