use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::ui::theme::Theme;

/// Dismissible sync notice. There is no account system; the text just
/// points at the web app. Dismissal lasts for the current run only.
pub struct SyncBanner<'a> {
    pub theme: &'a Theme,
}

impl Widget for SyncBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let bg = Style::default().bg(colors.banner_bg());

        for x in area.x..area.x + area.width {
            for y in area.y..area.y + area.height {
                buf[(x, y)].set_style(bg);
            }
        }

        let line = Line::from(vec![
            Span::styled(
                " Track your progress across devices!",
                Style::default()
                    .fg(colors.banner_fg())
                    .bg(colors.banner_bg())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                " Sign up for free to sync your data.",
                Style::default().fg(colors.banner_fg()).bg(colors.banner_bg()),
            ),
            Span::styled(
                "  [b] dismiss",
                Style::default().fg(colors.muted()).bg(colors.banner_bg()),
            ),
        ]);
        Paragraph::new(line).style(bg).render(area, buf);
    }
}
