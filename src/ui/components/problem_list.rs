use std::collections::{BTreeSet, HashSet};

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::catalog::{Difficulty, ProblemId};
use crate::ui::theme::Theme;
use crate::view::pipeline::{GroupView, VisibleRow, flatten_rows};

/// The grouped checklist. Walks the same flattened row order the app uses
/// for navigation, windowed so the selected row stays on screen.
pub struct ProblemList<'a> {
    pub groups: &'a [GroupView<'a>],
    pub expansion: &'a HashSet<String>,
    pub progress: &'a BTreeSet<ProblemId>,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl ProblemList<'_> {
    fn difficulty_color(&self, difficulty: Difficulty) -> ratatui::style::Color {
        let colors = &self.theme.colors;
        match difficulty {
            Difficulty::Easy => colors.easy(),
            Difficulty::Medium => colors.medium(),
            Difficulty::Hard => colors.hard(),
        }
    }
}

impl Widget for ProblemList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let colors = &self.theme.colors;
        let rows = flatten_rows(self.groups, self.expansion);

        if rows.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No problems match your filters.",
                Style::default().fg(colors.muted()),
            )))
            .alignment(Alignment::Center);
            let y = area.y + area.height / 2;
            empty.render(Rect::new(area.x, y, area.width, 1), buf);
            return;
        }

        let height = area.height as usize;
        let offset = (self.selected + 1).saturating_sub(height);

        let mut lines: Vec<Line> = Vec::new();
        for row in rows.iter().skip(offset).take(height) {
            match row {
                VisibleRow::Group { group, expanded } => {
                    let marker = if *expanded { "\u{25be}" } else { "\u{25b8}" };
                    let done = group.completed_count(self.progress);
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!(" {marker} {}", group.label()),
                            Style::default()
                                .fg(colors.accent())
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!("  ({done}/{})", group.problems.len()),
                            Style::default().fg(colors.muted()),
                        ),
                    ]));
                }
                VisibleRow::Problem { record } => {
                    let completed = self.progress.contains(&record.id);
                    let checkbox = if completed { "[x]" } else { "[ ]" };
                    let title_style = if completed {
                        Style::default()
                            .fg(colors.done())
                            .add_modifier(Modifier::CROSSED_OUT)
                    } else {
                        Style::default().fg(colors.pending())
                    };
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("     {checkbox} "),
                            Style::default().fg(if completed {
                                colors.done()
                            } else {
                                colors.muted()
                            }),
                        ),
                        Span::styled(record.title.clone(), title_style),
                        Span::styled(
                            format!("  {}", record.difficulty.as_str()),
                            Style::default().fg(self.difficulty_color(record.difficulty)),
                        ),
                        Span::styled(
                            format!(" \u{00b7} {}", record.platform.as_str()),
                            Style::default().fg(colors.muted()),
                        ),
                    ]));
                }
            }
        }

        Paragraph::new(lines).render(area, buf);

        // Full-row highlight for the selection; bg-only patch keeps the
        // row's own fg colors.
        if self.selected >= offset && self.selected - offset < height {
            let y = area.y + (self.selected - offset) as u16;
            for x in area.x..area.x + area.width {
                buf[(x, y)].set_style(Style::default().bg(colors.selection_bg()));
            }
        }
    }
}
