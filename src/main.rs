mod admin;
mod app;
mod audio;
mod config;
mod event;
mod input;
mod launch;
mod registry;
mod store;
mod ui;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing::{error, info};

use app::{App, AppScreen};
use event::{AppEvent, EventHandler};
use input::dispatcher::{Catalog as _, Orchestrator as _};
use ui::ModalKind;
use ui::components::admin_panel::AdminPanel;
use ui::components::card_grid::CardGrid;
use ui::components::debug_overlay::DebugOverlayWidget;
use ui::components::dialog::{ConfirmDialog, PasswordPrompt};
use ui::components::loading::LoadingScreen;
use ui::components::notification::Notifications;
use ui::layout::{self, AppLayout};

#[derive(Parser)]
#[command(name = "arcadr", version, about = "Fullscreen terminal arcade-cabinet launcher")]
struct Cli {
    #[arg(short, long, help = "Games registry JSON file")]
    games: Option<PathBuf>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Start with audio muted")]
    muted: bool,

    #[arg(long, help = "Verbose logging")]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug)?;
    info!(version = env!("CARGO_PKG_VERSION"), "arcadr starting");

    let mut app = App::new(cli.games, cli.muted);
    if let Some(ref name) = cli.theme {
        app.set_theme(name);
    }

    install_panic_hook();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(app.config.tick_rate_ms));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref err) = result {
        error!("fatal: {err:?}");
        eprintln!("Error: {err:?}");
    }
    info!("arcadr stopped");
    Ok(())
}

/// Log to a file under the data directory; the raw-mode terminal must
/// never see log output.
fn init_logging(debug: bool) -> Result<()> {
    let dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("arcadr");
    fs::create_dir_all(&dir)?;
    let file = fs::File::options()
        .create(true)
        .append(true)
        .open(dir.join("arcadr.log"))?;

    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

/// A panic must not leave the terminal in raw mode, and must be logged
/// rather than lost to the alternate screen.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        error!("panic: {panic_info}");
        default_hook(panic_info);
    }));
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => app.on_key(key),
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize(width, _) => app.on_resize(width),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &mut App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    app.surface.set_term_width(area.width);

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Grid => render_grid(frame, app),
        AppScreen::Admin => render_admin(frame, app),
    }

    // Overlays, bottom to top: notices, debug, modal, loading.
    let notifications = Notifications::new(&app.surface.notices, app.theme);
    frame.render_widget(notifications, area);

    if app.dispatcher.debug_overlay().visible() {
        let info = app.debug_info();
        frame.render_widget(DebugOverlayWidget::new(&info, app.theme), area);
    }

    match app.surface.active_modal() {
        Some(ModalKind::PasswordAdmin) => {
            let prompt = PasswordPrompt::new(
                "ADMIN ACCESS",
                app.surface.password.input.chars().count(),
                app.surface.password.error,
                app.theme,
            );
            frame.render_widget(prompt, area);
        }
        Some(ModalKind::PasswordExit) => {
            let prompt = PasswordPrompt::new(
                "EXIT LAUNCHER",
                app.surface.password.input.chars().count(),
                app.surface.password.error,
                app.theme,
            );
            frame.render_widget(prompt, area);
        }
        Some(ModalKind::ConfirmExit) => {
            let dialog = ConfirmDialog::new(
                "EXIT LAUNCHER",
                "Close the arcade launcher?",
                app.surface.confirm_yes,
                app.theme,
            );
            frame.render_widget(dialog, area);
        }
        None => {}
    }

    if app.surface.loading() {
        frame.render_widget(LoadingScreen::new("SHUTTING DOWN", app.theme), area);
    }
}

fn render_grid(frame: &mut ratatui::Frame, app: &mut App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let app_layout = AppLayout::new(area);

    let header_text = format!(
        " {} | {} games ",
        app.config.cabinet_title,
        app.registry.len()
    );
    let header_style = if app.surface.flash_active() {
        Style::default()
            .fg(colors.bg())
            .bg(colors.border_selected())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD)
    };
    let header = Paragraph::new(Line::from(Span::styled(header_text, header_style)))
        .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, app_layout.header);

    let columns = layout::estimate_columns(app_layout.main.width).max(1);
    app.surface.record_grid_layout(columns);

    let grid = CardGrid::new(
        app.registry.games(),
        app.dispatcher.selected(),
        columns,
        app.theme,
    )
    .flash(app.surface.flash_active());
    frame.render_widget(&grid, app_layout.main);

    if app.launcher.embedded_active() {
        let title = app.launcher.embedded_title().unwrap_or("game");
        let banner = layout::centered_rect(50, 20, area);
        let block = Block::bordered()
            .title(" NOW PLAYING ")
            .border_style(Style::default().fg(colors.success()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(banner);
        frame.render_widget(ratatui::widgets::Clear, banner);
        frame.render_widget(block, banner);
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                title.to_string(),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "[Esc] Return to launcher",
                Style::default().fg(colors.text_dim()),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center),
            inner,
        );
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        " [↑ ↓ ← →] Choose game   [Enter] Play ",
        Style::default().fg(colors.text_dim()),
    )));
    frame.render_widget(footer, app_layout.footer);
}

fn render_admin(frame: &mut ratatui::Frame, app: &mut App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let app_layout = AppLayout::new(area);

    let header = Paragraph::new(Line::from(Span::styled(
        format!(" {} | ADMIN PANEL ", app.config.cabinet_title),
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, app_layout.header);

    let panel = AdminPanel::new(&app.admin, app.registry.games(), app.theme);
    frame.render_widget(&panel, app_layout.main);

    let footer = Paragraph::new(Line::from(Span::styled(
        " Changes are saved immediately ",
        Style::default().fg(colors.text_dim()),
    )));
    frame.render_widget(footer, app_layout.footer);
}
