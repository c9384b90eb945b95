mod app;
mod cli;
mod commands;
mod config;
mod data;
mod datasources;
mod error;
mod logic;
mod models;
mod ui;

use anyhow::Context;
use app::{App, FetchMessage, FetchRequest, FetchResult, Screen};
use clap::Parser;
use cli::Cli;
use config::Config;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use data::samples::{MARKET_PRICES, PEST_LIBRARY};
use logic::detection::{detect, ANALYSIS_DELAY};
use logic::search::{filter_pests, filter_prices};
use logic::ConditionsService;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::Span,
    widgets::Paragraph,
    Frame, Terminal,
};
use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing_subscriber::EnvFilter;
use ui::screens::{
    ChatScreen, CropsScreen, DashboardScreen, FeedbackScreen, MarketScreen, PestsScreen,
    SoilScreen, WeatherScreen,
};
use ui::Theme;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.command.is_none())?;

    if let Some(command) = cli.command {
        return commands::run(command, cli.config.as_deref(), cli.json).await;
    }

    let config = Config::load_or_default(cli.config.as_deref())
        .context("Configuration error. Run `cropcare init` or copy config/config.yaml.example")?;

    let service = ConditionsService::new(&config).context("Failed to set up data sources")?;

    let mut app = App::new(&config, service.weather_configured());
    app.request_refresh();
    app.request_connection_check();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, &service).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Logs go to a file while the dashboard owns the terminal, otherwise to
/// stderr. `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: u8, tui: bool) -> anyhow::Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if tui {
        let path = Config::data_dir()?.join("cropcare.log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Cannot open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    service: &ConditionsService,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchMessage>();

    loop {
        for request in app.take_requests() {
            spawn_fetch(service, request, tx.clone());
        }

        while let Ok(message) = rx.try_recv() {
            app.apply(message);
        }

        terminal.draw(|f| draw(f, app))?;

        // Handle input with timeout so finished fetches are picked up
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.quit();
                    }
                    KeyCode::Char('q') if !app.is_editing() => {
                        app.quit();
                    }
                    KeyCode::Esc if !app.is_editing() => {
                        app.switch_screen(Screen::Dashboard);
                    }
                    KeyCode::Char(c) if !app.is_editing() => {
                        if let Some(screen) = Screen::from_key(c) {
                            app.switch_screen(screen);
                        } else {
                            handle_screen_input(app, key.code);
                        }
                    }
                    _ => handle_screen_input(app, key.code),
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Runs one request in the background and reports back on `tx`.
fn spawn_fetch(
    service: &ConditionsService,
    request: FetchRequest,
    tx: UnboundedSender<FetchMessage>,
) {
    let service = service.clone();
    tokio::spawn(async move {
        let message = match request {
            FetchRequest::Conditions { region, generation } => FetchMessage {
                generation,
                result: FetchResult::Conditions(service.fetch_current_conditions(&region).await),
            },
            FetchRequest::Forecast { region, generation } => FetchMessage {
                generation,
                result: FetchResult::Forecast(service.fetch_forecast(&region).await),
            },
            FetchRequest::Regional { state, generation } => FetchMessage {
                generation,
                result: FetchResult::Regional(service.regional_recommendation(&state).await),
            },
            FetchRequest::Prediction {
                request,
                generation,
            } => FetchMessage {
                generation,
                result: FetchResult::Prediction(service.submit_prediction(&request).await),
            },
            FetchRequest::AllRegions { generation } => FetchMessage {
                generation,
                result: FetchResult::AllRegions(service.all_regions_conditions().await),
            },
            FetchRequest::Detection { generation } => {
                tokio::time::sleep(ANALYSIS_DELAY).await;
                FetchMessage {
                    generation,
                    result: FetchResult::Detection(detect(PEST_LIBRARY)),
                }
            }
            FetchRequest::Connections => FetchMessage {
                generation: 0,
                result: FetchResult::Connections(service.check_connections().await),
            },
        };

        if tx.send(message).is_err() {
            tracing::debug!("Dashboard closed before fetch completed");
        }
    });
}

fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    if app.screen == Screen::Dashboard {
        let screen = DashboardScreen::new(app.region_name(), app.conditions.as_ref(), &app.alerts)
            .with_regional(app.regional.as_ref(), app.regional_error.as_deref())
            .loading(app.loading)
            .with_status(app.status_message.as_deref());
        f.render_widget(screen, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    match app.screen {
        Screen::Weather => {
            let screen = WeatherScreen::new(
                app.region_name(),
                app.conditions.as_ref(),
                app.forecast.as_ref(),
            )
            .with_all_regions(&app.all_regions);
            f.render_widget(screen, chunks[0]);
        }
        Screen::Soil => {
            let screen = SoilScreen::new(app.soil_state.sample(), app.soil_state.sample_index);
            f.render_widget(screen, chunks[0]);
        }
        Screen::Crops => {
            let screen = CropsScreen::new(&app.crop_state, app.region_name())
                .with_regional(app.regional.as_ref(), app.regional_error.as_deref());
            f.render_widget(screen, chunks[0]);
        }
        Screen::Pests => {
            let screen =
                PestsScreen::new(PEST_LIBRARY, &app.pest_state).with_detection(&app.detection);
            f.render_widget(screen, chunks[0]);
        }
        Screen::Market => {
            f.render_widget(MarketScreen::new(MARKET_PRICES, &app.market_state), chunks[0]);
        }
        Screen::Chat => {
            f.render_widget(ChatScreen::new(&app.chat_state), chunks[0]);
        }
        Screen::Feedback => {
            f.render_widget(FeedbackScreen::new(&app.feedback_state), chunks[0]);
        }
        Screen::Dashboard => {}
    }

    if let Some(ref msg) = app.status_message {
        let style = if msg.contains("failed") || msg.contains("OFFLINE") {
            Theme::warning()
        } else {
            Theme::dim()
        };
        f.render_widget(Paragraph::new(Span::styled(msg.as_str(), style)), chunks[1]);
    }
}

fn handle_screen_input(app: &mut App, code: KeyCode) {
    match app.screen {
        Screen::Dashboard => handle_dashboard_input(app, code),
        Screen::Weather => handle_weather_input(app, code),
        Screen::Soil => handle_soil_input(app, code),
        Screen::Crops => handle_crops_input(app, code),
        Screen::Pests => handle_pests_input(app, code),
        Screen::Market => handle_market_input(app, code),
        Screen::Chat => handle_chat_input(app, code),
        Screen::Feedback => handle_feedback_input(app, code),
    }
}

fn handle_dashboard_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Left => app.prev_region(),
        KeyCode::Right => app.next_region(),
        KeyCode::Char('r') => app.request_refresh(),
        KeyCode::Char('c') => {
            app.request_connection_check();
            app.set_status("Checking connections...");
        }
        _ => {}
    }
}

fn handle_weather_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Left => app.prev_region(),
        KeyCode::Right => app.next_region(),
        KeyCode::Char('r') => app.request_refresh(),
        KeyCode::Char('a') => app.request_all_regions(),
        _ => {}
    }
}

fn handle_soil_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Left => app.soil_state.prev(),
        KeyCode::Right => app.soil_state.next(),
        KeyCode::Char('c') => {
            let reading = app.soil_state.sample().reading;
            app.fill_crop_form(&reading);
            app.switch_screen(Screen::Crops);
        }
        _ => {}
    }
}

fn handle_crops_input(app: &mut App, code: KeyCode) {
    if app.crop_state.editing {
        match code {
            KeyCode::Esc => app.crop_state.editing = false,
            KeyCode::Enter => app.submit_crop_form(),
            KeyCode::Tab | KeyCode::Down => app.crop_state.next_field(),
            KeyCode::BackTab | KeyCode::Up => app.crop_state.prev_field(),
            KeyCode::Backspace => app.crop_state.pop_char(),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
                app.crop_state.push_char(c);
            }
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('e') => app.crop_state.editing = true,
        KeyCode::Tab | KeyCode::Down => app.crop_state.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.crop_state.prev_field(),
        KeyCode::Enter => app.submit_crop_form(),
        KeyCode::Char('f') => {
            let reading = app
                .region_soil()
                .unwrap_or_else(|| app.soil_state.sample())
                .reading;
            app.fill_crop_form(&reading);
        }
        _ => {}
    }
}

fn handle_pests_input(app: &mut App, code: KeyCode) {
    let state = &mut app.pest_state;
    if state.editing {
        match code {
            KeyCode::Esc | KeyCode::Enter => state.editing = false,
            KeyCode::Backspace => state.pop_char(),
            KeyCode::Char(c) => state.push_char(c),
            _ => {}
        }
        return;
    }

    let count = filter_pests(PEST_LIBRARY, &state.query).len();
    match code {
        KeyCode::Char('/') => state.editing = true,
        KeyCode::Up => state.prev(),
        KeyCode::Down => state.next(count),
        KeyCode::Char('d') => app.request_detection(),
        KeyCode::Char('x') => app.clear_detection(),
        _ => {}
    }
}

fn handle_market_input(app: &mut App, code: KeyCode) {
    let market = &mut app.market_state;
    if market.search.editing {
        match code {
            KeyCode::Esc | KeyCode::Enter => market.search.editing = false,
            KeyCode::Backspace => market.search.pop_char(),
            KeyCode::Char(c) => market.search.push_char(c),
            _ => {}
        }
        return;
    }

    let count = filter_prices(MARKET_PRICES, &market.search.query, &market.filter).len();
    match code {
        KeyCode::Char('/') => market.search.editing = true,
        KeyCode::Char('m') => market.cycle_market(),
        KeyCode::Up => market.search.prev(),
        KeyCode::Down => market.search.next(count),
        _ => {}
    }
}

fn handle_chat_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.switch_screen(Screen::Dashboard),
        KeyCode::Enter => app.chat_state.send(),
        KeyCode::Tab => {
            app.chat_state.cycle_language();
            let language = app.chat_state.bot.language;
            app.set_status(&format!("Chat language: {}", language));
        }
        KeyCode::Up => app.chat_state.prev_quick_question(),
        KeyCode::Down => app.chat_state.next_quick_question(),
        KeyCode::F(2) => app.set_status("Voice input is not available in the terminal"),
        KeyCode::Backspace => {
            app.chat_state.input.pop();
        }
        KeyCode::Char(c) => app.chat_state.input.push(c),
        _ => {}
    }
}

fn handle_feedback_input(app: &mut App, code: KeyCode) {
    let state = &mut app.feedback_state;
    if state.editing {
        match code {
            KeyCode::Esc | KeyCode::Enter => state.editing = false,
            KeyCode::Backspace => state.pop_char(),
            KeyCode::Char(c) => state.push_char(c),
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Tab | KeyCode::Down => state.next_field(),
        KeyCode::BackTab | KeyCode::Up => state.prev_field(),
        KeyCode::Char('e') | KeyCode::Enter => state.start_editing(),
        KeyCode::Left => state.adjust(false),
        KeyCode::Right => state.adjust(true),
        KeyCode::Char('s') => app.submit_feedback(),
        _ => {}
    }
}
