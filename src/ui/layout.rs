use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // >=80 cols: full stats gauge block
    Narrow, // <80 cols: stats collapse into the header line
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 80 {
            LayoutTier::Wide
        } else {
            LayoutTier::Narrow
        }
    }

    pub fn show_stats_block(&self, height: u16) -> bool {
        height >= 18 && *self == LayoutTier::Wide
    }

    pub fn show_banner(&self, height: u16) -> bool {
        height >= 12
    }
}

pub struct AppLayout {
    pub header: Rect,
    pub banner: Option<Rect>,
    pub stats: Option<Rect>,
    pub controls: Rect,
    pub list: Rect,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl AppLayout {
    pub fn new(area: Rect, banner_visible: bool) -> Self {
        let tier = LayoutTier::from_area(area);
        let with_banner = banner_visible && tier.show_banner(area.height);
        let with_stats = tier.show_stats_block(area.height);

        let mut constraints: Vec<Constraint> = vec![Constraint::Length(1)];
        if with_banner {
            constraints.push(Constraint::Length(1));
        }
        if with_stats {
            constraints.push(Constraint::Length(4));
        }
        constraints.push(Constraint::Length(3));
        constraints.push(Constraint::Min(3));
        constraints.push(Constraint::Length(1));

        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let mut idx = 1;
        let banner = if with_banner {
            let rect = split[idx];
            idx += 1;
            Some(rect)
        } else {
            None
        };
        let stats = if with_stats {
            let rect = split[idx];
            idx += 1;
            Some(rect)
        } else {
            None
        };

        Self {
            header: split[0],
            banner,
            stats,
            controls: split[idx],
            list: split[idx + 1],
            footer: split[idx + 2],
            tier,
        }
    }
}

/// Pack footer key hints into as few lines as fit the width.
pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = " ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_thresholds() {
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 120, 40)), LayoutTier::Wide);
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 79, 40)), LayoutTier::Narrow);
    }

    #[test]
    fn short_terminal_drops_banner_and_stats() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 10), true);
        assert!(layout.banner.is_none());
        assert!(layout.stats.is_none());
        assert!(layout.list.height >= 3);
    }

    #[test]
    fn tall_wide_terminal_shows_everything() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 40), true);
        assert!(layout.banner.is_some());
        assert!(layout.stats.is_some());
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.footer.height, 1);
    }

    #[test]
    fn dismissed_banner_frees_its_row() {
        let shown = AppLayout::new(Rect::new(0, 0, 100, 40), true);
        let dismissed = AppLayout::new(Rect::new(0, 0, 100, 40), false);
        assert!(dismissed.banner.is_none());
        assert_eq!(dismissed.list.height, shown.list.height + 1);
    }

    #[test]
    fn hints_pack_within_width() {
        let hints = ["[j/k] Move", "[Space] Toggle", "[/] Search", "[q] Quit"];
        let lines = pack_hint_lines(&hints, 30);
        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(line.chars().count() <= 30);
        }

        let one_line = pack_hint_lines(&hints, 200);
        assert_eq!(one_line.len(), 1);
    }
}
