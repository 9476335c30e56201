use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use keyrush::app::App;
use keyrush::config::Config;
use keyrush::event::{AppEvent, EventHandler};
use keyrush::identity::{IdentityProvider, MemoryIdentity, resolve_identity};
use keyrush::logging;
use keyrush::prompt::gemini::GeminiConfig;
use keyrush::prompt::{GeminiPromptSource, PassagePromptSource, PromptSource};
use keyrush::score::{HttpScoreStore, MemoryScoreStore, ScoreStore};
use keyrush::session::{Status, TEST_DURATION_SECS};
use keyrush::ui::components::countdown_bar::CountdownBar;
use keyrush::ui::components::results::ResultCards;
use keyrush::ui::components::score_history::ScoreHistoryPanel;
use keyrush::ui::components::typing_area::{TypingArea, progress_label};
use keyrush::ui::layout::{AppLayout, fit_hints};
use keyrush::ui::theme::{DEFAULT_THEME, Theme};

#[derive(Parser)]
#[command(name = "keyrush", version, about = "Timed typing test with generated prompts")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Base url of the score API")]
    score_url: Option<String>,

    #[arg(long, help = "Use built-in passages and keep scores in memory")]
    offline: bool,

    #[arg(long, help = "Use this user id instead of the stored one")]
    user_id: Option<String>,

    #[arg(long, help = "Write the effective configuration to the config file and exit")]
    write_config: bool,

    #[arg(long, help = "List bundled themes and exit")]
    list_themes: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_themes {
        for name in Theme::available_themes() {
            println!("{name}");
        }
        return Ok(());
    }

    if let Err(e) = logging::init(&logging::default_log_path()) {
        eprintln!("warning: logging disabled: {e}");
    }
    log::info!("Starting keyrush {}", env!("CARGO_PKG_VERSION"));

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring unreadable config file: {e}");
            Config::default()
        }
    };
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(url) = cli.score_url {
        config.score_api_url = url;
    }
    config.validate();

    if cli.write_config {
        let path = config.save()?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        log::warn!("Theme {} not found, using {DEFAULT_THEME}", config.theme);
        Theme::default()
    });
    let theme: &'static Theme = Box::leak(Box::new(theme));
    let identity: Box<dyn IdentityProvider> = match cli.user_id.as_deref() {
        Some(id) => Box::new(MemoryIdentity::new(id)),
        None => resolve_identity(),
    };
    let prompt_source = build_prompt_source(&config, cli.offline);
    let score_store = build_score_store(&config, cli.offline);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));
    let mut app = App::new(
        config,
        theme,
        prompt_source,
        score_store,
        identity.as_ref(),
        events.sender(),
    );
    app.start();

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        log::error!("Exited with error: {err:?}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn build_prompt_source(config: &Config, offline: bool) -> Arc<dyn PromptSource> {
    if offline || config.prompt_source == "passages" {
        return Arc::new(PassagePromptSource::from_entropy());
    }
    match Config::gemini_api_key() {
        Some(api_key) => Arc::new(GeminiPromptSource::new(GeminiConfig {
            base_url: config.gemini_base_url.clone(),
            model: config.gemini_model.clone(),
            api_key: Some(api_key),
            timeout_secs: config.request_timeout_secs,
        })),
        None => {
            log::warn!("GEMINI_API_KEY is not set, using built-in passages");
            Arc::new(PassagePromptSource::from_entropy())
        }
    }
}

fn build_score_store(config: &Config, offline: bool) -> Arc<dyn ScoreStore> {
    if offline {
        return Arc::new(MemoryScoreStore::new());
    }
    match HttpScoreStore::new(&config.score_api_url, config.request_timeout_secs) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            log::error!("Score API unavailable, keeping scores in memory: {e}");
            Arc::new(MemoryScoreStore::new())
        }
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => {
                handle_key(app, key);
                app.advance_clock(Instant::now());
            }
            event => app.handle_event(event, Instant::now()),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Only process Press events; Repeat and Release would inflate input.
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    let now = Instant::now();
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab => app.restart(),
        KeyCode::Backspace => {
            app.backspace(now);
        }
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.type_char(ch, now);
        }
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area);
    let session = &app.session;

    let mut header_spans = vec![
        Span::styled(
            " keyrush ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}s ", session.remaining_secs()),
            Style::default()
                .fg(colors.accent())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if session.status() != Status::Finished && !session.is_loading() {
        header_spans.push(Span::styled(
            format!("| {} ", progress_label(session)),
            Style::default()
                .fg(colors.text_pending())
                .bg(colors.header_bg()),
        ));
    }
    let header = Paragraph::new(Line::from(header_spans))
        .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    match (session.status(), session.result()) {
        (Status::Finished, Some(result)) => {
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(5), Constraint::Length(9)])
                .split(layout.main);
            frame.render_widget(
                TypingArea::new(session, app.theme, app.spinner_frame),
                main_layout[0],
            );
            frame.render_widget(ResultCards::new(result, app.theme), main_layout[1]);
        }
        _ => {
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(5), Constraint::Length(3)])
                .split(layout.main);
            frame.render_widget(
                TypingArea::new(session, app.theme, app.spinner_frame),
                main_layout[0],
            );
            frame.render_widget(
                CountdownBar::new(session.remaining_secs(), TEST_DURATION_SECS, app.theme),
                main_layout[1],
            );
        }
    }

    frame.render_widget(
        ScoreHistoryPanel::new(app.history.view(), app.theme),
        layout.history,
    );

    let hints = fit_hints(
        &["[type] Start", "[Tab] Restart", "[Esc] Quit"],
        layout.footer.width as usize,
    );
    let footer = Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(colors.text_pending()),
    )));
    frame.render_widget(footer, layout.footer);
}
