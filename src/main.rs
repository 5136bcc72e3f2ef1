use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use std::fs::File;
use std::sync::mpsc::channel;
use std::sync::Mutex;
use std::time::Duration;
use taste_harmony::cache::LOG_FILE;
use taste_harmony::error_display::user_message_from_pairing;
use taste_harmony::{
    chart_export, dashboard_for_args, loader, App, AppConfig, AppEvent, Args, CacheManager,
    ConfigManager, DashboardOptions, NavState, OpenOptions, Theme, APP_NAME,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn render(terminal: &mut DefaultTerminal, app: &App) -> Result<()> {
    terminal.draw(|frame| frame.render_widget(app, frame.area()))?;
    Ok(())
}

fn run(mut terminal: DefaultTerminal, args: &Args, config: &AppConfig, theme: Theme) -> Result<()> {
    let (tx, rx) = channel::<AppEvent>();
    let mut app = App::new_with_config(tx.clone(), theme, config);
    app.set_options(DashboardOptions::from_args_and_config(args, config));
    if let Some(view) = args.view {
        app.set_nav(NavState::from(view));
    }
    app.set_initial_wine(args.wine.clone());

    let opts = OpenOptions::from_args_and_config(args, config);
    render(&mut terminal, &app)?;
    app.send_event(AppEvent::Open(loader::data_path(args, config), opts))?;

    let poll_interval = Duration::from_millis(config.performance.event_poll_interval_ms);
    loop {
        if crossterm::event::poll(poll_interval)? {
            match crossterm::event::read()? {
                crossterm::event::Event::Key(key) => tx.send(AppEvent::Key(key))?,
                crossterm::event::Event::Resize(cols, rows) => {
                    tx.send(AppEvent::Resize(cols, rows))?
                }
                _ => {}
            }
        }

        let updated = match rx.recv_timeout(Duration::from_millis(0)) {
            Ok(event) => {
                match event {
                    AppEvent::Exit => break,
                    event => {
                        if let Some(event) = app.event(&event) {
                            tx.send(event)?;
                        }
                    }
                }
                true
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => false,
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        };

        if updated {
            render(&mut terminal, &app)?;
        }
    }
    Ok(())
}

fn handle_early_exit_flags(args: &Args) -> Result<Option<()>> {
    if args.clear_cache {
        match CacheManager::new(APP_NAME) {
            Ok(cache) => {
                if let Err(e) = cache.clear_all() {
                    eprintln!("Error clearing cache: {}", e);
                    std::process::exit(1);
                }
                println!("Cache cleared successfully");
                return Ok(Some(()));
            }
            Err(_e) => {
                println!("No cache to clear");
                return Ok(Some(()));
            }
        }
    }

    if args.generate_config {
        match ConfigManager::new(APP_NAME) {
            Ok(manager) => match manager.write_default_config(args.force) {
                Ok(path) => {
                    println!("Configuration written to {}", path.display());
                    return Ok(Some(()));
                }
                Err(e) => {
                    eprintln!("Error writing config: {}", e);
                    std::process::exit(1);
                }
            },
            Err(e) => {
                eprintln!("Error initializing config manager: {}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(None)
}

/// Log to a file in the cache dir; the terminal belongs to the dashboard.
/// Failing to open the log file leaves logging disabled. Runs before
/// `ratatui::init`, so a subscriber error can still go to stderr.
fn init_logging(debug: bool) {
    let Ok(cache) = CacheManager::new(APP_NAME) else {
        return;
    };
    if cache.ensure_cache_dir().is_err() {
        return;
    }
    let Ok(file) = File::create(cache.cache_file(LOG_FILE)) else {
        return;
    };
    if let Err(e) = install_subscriber(file, debug) {
        eprintln!("Logging disabled: {}", e);
    }
}

fn install_subscriber(
    file: File,
    debug: bool,
) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
}

/// `--json` and `--export-charts`: aggregate once, print or write, exit.
fn run_batch(args: &Args, config: &AppConfig, theme: &Theme) -> Result<()> {
    let view = match dashboard_for_args(args, config) {
        Ok(view) => view,
        Err(e) => {
            eprintln!("{}", user_message_from_pairing(&e));
            std::process::exit(1);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    }
    if let Some(dir) = &args.export_charts {
        for path in chart_export::export_dashboard_charts(dir, &view, theme)? {
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(()) = handle_early_exit_flags(&args)? {
        return Ok(());
    }

    color_eyre::install()?;
    let config = AppConfig::load(APP_NAME)?;
    init_logging(args.debug || config.debug.enabled);
    info!(version = env!("CARGO_PKG_VERSION"), "starting");
    let theme = Theme::from_config(&config.theme)?;

    if args.json || args.export_charts.is_some() {
        return run_batch(&args, &config, &theme);
    }

    let terminal = ratatui::init();
    let result = run(terminal, &args, &config, theme);
    ratatui::restore();
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use taste_harmony::pairings::TieBreak;

    #[test]
    fn test_args_override_analysis_config() {
        let args = Args::try_parse_from(["taste-harmony", "--top-n", "5", "--tie-break", "alphabetical"])
            .unwrap();
        let opts = DashboardOptions::from_args_and_config(&args, &AppConfig::default());
        assert_eq!(opts.top_n, 5);
        assert_eq!(opts.tie_break, TieBreak::Alphabetical);

        let args = Args::try_parse_from(["taste-harmony"]).unwrap();
        let opts = DashboardOptions::from_args_and_config(&args, &AppConfig::default());
        assert_eq!(opts, DashboardOptions::default());
    }

    #[test]
    fn test_second_subscriber_install_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let first = File::create(dir.path().join("a.log")).unwrap();
        let second = File::create(dir.path().join("b.log")).unwrap();
        let _ = install_subscriber(first, false);
        assert!(install_subscriber(second, true).is_err());
    }
}
