use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;
use crate::view::filter::FilterState;

/// Search box plus the current filter selections and the expand/collapse
/// toggle label.
pub struct ControlsBar<'a> {
    pub search: &'a LineInput,
    pub editing: bool,
    pub filters: &'a FilterState,
    pub all_visible_expanded: bool,
    pub theme: &'a Theme,
}

impl Widget for ControlsBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let border_color = if self.editing {
            colors.accent()
        } else {
            colors.border()
        };
        let block = Block::bordered()
            .title(" Search & Filters ")
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let mut spans: Vec<Span> = vec![Span::styled(
            " / ",
            Style::default().fg(if self.editing {
                colors.accent()
            } else {
                colors.muted()
            }),
        )];

        let (before, cursor_char, after) = self.search.render_parts();
        if self.editing {
            spans.push(Span::styled(before, Style::default().fg(colors.fg())));
            match cursor_char {
                Some(ch) => {
                    spans.push(Span::styled(
                        ch.to_string(),
                        Style::default().fg(colors.bg()).bg(colors.fg()),
                    ));
                    spans.push(Span::styled(after, Style::default().fg(colors.fg())));
                }
                None => {
                    // Block cursor at end of line
                    spans.push(Span::styled(" ", Style::default().bg(colors.fg())));
                }
            }
        } else if self.search.value().is_empty() {
            spans.push(Span::styled(
                "search problems or patterns",
                Style::default().fg(colors.muted()),
            ));
        } else {
            spans.push(Span::styled(
                self.search.value(),
                Style::default().fg(colors.fg()),
            ));
        }

        spans.push(Span::styled(
            format!("   [d] Difficulty: {}", self.filters.difficulty_label()),
            Style::default().fg(colors.pending()),
        ));
        spans.push(Span::styled(
            format!("   [p] Platform: {}", self.filters.platform_label()),
            Style::default().fg(colors.pending()),
        ));
        spans.push(Span::styled(
            if self.all_visible_expanded {
                "   [e] Collapse all"
            } else {
                "   [e] Expand all"
            },
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        ));

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
