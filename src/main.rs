mod app;
mod catalog;
mod config;
mod event;
mod store;
mod ui;
mod view;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, InputMode};
use catalog::{Difficulty, Platform};
use config::Config;
use event::{AppEvent, EventHandler};
use store::json_store::JsonStore;
use ui::components::banner::SyncBanner;
use ui::components::controls::ControlsBar;
use ui::components::problem_list::ProblemList;
use ui::components::stats_bar::StatsBar;
use ui::layout::AppLayout;
use ui::line_input::InputResult;

#[derive(Parser)]
#[command(name = "dsatrack", version, about = "Terminal checklist for algorithmic practice patterns")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Preset difficulty filter (easy, medium, hard)")]
    difficulty: Option<String>,

    #[arg(short, long, help = "Preset platform filter (leetcode, geeksforgeeks, other)")]
    platform: Option<String>,

    #[arg(short, long, help = "Preset search term")]
    search: Option<String>,

    #[arg(long, value_name = "FILE", help = "Write a progress export and exit")]
    export: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Replace progress from an export and exit")]
    import: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.export.as_deref() {
        return run_export(path);
    }
    if let Some(path) = cli.import.as_deref() {
        return run_import(path);
    }

    let mut app = App::new()?;

    if let Some(theme_name) = cli.theme {
        if let Some(theme) = ui::theme::Theme::load(&theme_name) {
            app.theme = Box::leak(Box::new(theme));
        }
    }
    if let Some(name) = cli.difficulty {
        app.filters.difficulty = Difficulty::from_name(&name);
    }
    if let Some(name) = cli.platform {
        app.filters.platform = Platform::from_name(&name);
    }
    if let Some(term) = cli.search {
        app.search_input = ui::line_input::LineInput::new(&term);
        app.set_search(term);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_export(path: &Path) -> Result<()> {
    let config = Config::load().unwrap_or_default();
    let store = JsonStore::with_base_dir(PathBuf::from(&config.data_dir))?;
    store.export(path)?;
    println!("Exported progress to {}", path.display());
    Ok(())
}

fn run_import(path: &Path) -> Result<()> {
    let config = Config::load().unwrap_or_default();
    let store = JsonStore::with_base_dir(PathBuf::from(&config.data_dir))?;
    let count = store.import(path)?;
    println!("Imported {count} completed problems from {}", path.display());
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => {}
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Press only; Repeat would double-toggle checkboxes
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Browse => handle_browse_key(app, key),
        InputMode::Search => handle_search_key(app, key),
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_selected(),
        KeyCode::Char('/') => app.input_mode = InputMode::Search,
        KeyCode::Char('d') => app.cycle_difficulty(),
        KeyCode::Char('p') => app.cycle_platform(),
        KeyCode::Char('e') => app.toggle_expansion_all(),
        KeyCode::Char('r') => app.jump_to_random_unsolved(),
        KeyCode::Char('b') => app.dismiss_banner(),
        _ => {}
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match app.search_input.handle(key) {
        InputResult::Submit => app.input_mode = InputMode::Browse,
        InputResult::Cancel => {
            // Esc clears the term and leaves search mode. Groups expanded
            // by the search stay expanded.
            app.search_input = ui::line_input::LineInput::new("");
            app.set_search(String::new());
            app.input_mode = InputMode::Browse;
        }
        InputResult::Continue => {
            let term = app.search_input.value().to_string();
            app.set_search(term);
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area, !app.banner_dismissed);
    let view = app.view();

    let stats = view.stats;
    let header_info = if layout.stats.is_some() {
        format!(" {} patterns \u{00b7} {} problems", view.groups.len(), stats.total)
    } else {
        // Narrow or short terminal: stats fold into the header line
        format!(
            " {}/{} solved ({}%) \u{00b7} {}",
            stats.completed,
            stats.total,
            stats.percentage,
            stats.rank_title(),
        )
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " dsatrack ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            header_info,
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    if let Some(banner_area) = layout.banner {
        frame.render_widget(SyncBanner { theme: app.theme }, banner_area);
    }

    if let Some(stats_area) = layout.stats {
        frame.render_widget(
            StatsBar {
                stats,
                theme: app.theme,
            },
            stats_area,
        );
    }

    frame.render_widget(
        ControlsBar {
            search: &app.search_input,
            editing: app.input_mode == InputMode::Search,
            filters: &app.filters,
            all_visible_expanded: app.all_visible_expanded(),
            theme: app.theme,
        },
        layout.controls,
    );

    frame.render_widget(
        ProblemList {
            groups: &view.groups,
            expansion: &app.expanded,
            progress: &app.progress,
            selected: app.selected,
            theme: app.theme,
        },
        layout.list,
    );

    let hints: &[&str] = match app.input_mode {
        InputMode::Browse => &[
            "[j/k] Move",
            "[Space] Toggle",
            "[/] Search",
            "[d] Difficulty",
            "[p] Platform",
            "[e] Expand/Collapse",
            "[r] Random",
            "[q] Quit",
        ],
        InputMode::Search => &["[Enter] Keep search", "[Esc] Clear search"],
    };
    let hint_line = ui::layout::pack_hint_lines(hints, layout.footer.width as usize)
        .into_iter()
        .next()
        .unwrap_or_default();
    let footer = Paragraph::new(Line::from(Span::styled(
        hint_line,
        Style::default().fg(colors.muted()),
    )));
    frame.render_widget(footer, layout.footer);
}
