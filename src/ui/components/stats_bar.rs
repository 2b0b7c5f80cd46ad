use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;
use crate::view::pipeline::Stats;

/// Aggregate progress: percentage gauge plus solved/rank/remaining line.
pub struct StatsBar<'a> {
    pub stats: Stats,
    pub theme: &'a Theme,
}

impl Widget for StatsBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Progress ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let ratio = f64::from(self.stats.percentage) / 100.0;
        let filled_width = (ratio * inner.width as f64) as u16;
        let label = format!("{}%", self.stats.percentage);

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label_x = inner.x + (inner.width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(label_x, inner.y, &label, Style::default().fg(colors.fg()));

        if inner.height > 1 {
            let detail = Line::from(vec![
                Span::styled(
                    format!(
                        " {} of {} problems solved",
                        self.stats.completed, self.stats.total
                    ),
                    Style::default().fg(colors.fg()),
                ),
                Span::styled(
                    format!("  {}", self.stats.rank_title()),
                    Style::default().fg(colors.accent()),
                ),
                Span::styled(
                    format!("  {} to go", self.stats.remaining()),
                    Style::default().fg(colors.muted()),
                ),
            ]);
            Paragraph::new(detail).render(
                Rect::new(inner.x, inner.y + 1, inner.width, 1),
                buf,
            );
        }
    }
}
