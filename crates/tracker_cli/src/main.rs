//! Interactive shell host for the tracker core.
//!
//! # Responsibility
//! - Parse flags into a `TrackerConfig` and open the SQLite-backed store.
//! - Act as the page: feed navigation and view events to the router, print
//!   the rendered view, and ask delete confirmations on the terminal.

mod command;

use clap::Parser;
use command::{Command, HELP};
use log::warn;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracker_core::{
    core_version, init_logging, Container, Host, LogLevel, NoticeBoard, Page, Route, Router,
    SqliteStore, Storage, TrackerConfig,
};

#[derive(Debug, Parser)]
#[command(name = "tracker", version, about = "Project, user and task tracker")]
struct Cli {
    /// SQLite file holding the tracker data; in-memory when omitted.
    #[arg(long)]
    db: Option<PathBuf>,
    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
    /// View shown at startup.
    #[arg(long, default_value = "projects")]
    route: String,
}

impl Cli {
    fn into_config(self) -> Result<TrackerConfig, String> {
        let log_level = match self.log_level.as_deref() {
            Some(level) => LogLevel::parse(level).map_err(|err| err.to_string())?,
            None => LogLevel::build_default(),
        };
        let config = TrackerConfig {
            db_path: self.db,
            log_level,
            log_dir: self.log_dir,
            initial_route: Route::from_fragment(&self.route),
        };
        config.validate().map_err(|err| err.to_string())?;
        Ok(config)
    }
}

/// Headless page whose confirmations are answered on the terminal.
struct Terminal {
    page: Page,
}

impl Host for Terminal {
    fn content(&mut self) -> Option<&mut Container> {
        self.page.content()
    }

    fn notices(&mut self) -> &mut NoticeBoard {
        self.page.notices()
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }

    fn set_active_nav(&mut self, route: Route) {
        self.page.set_active_nav(route);
    }
}

fn main() -> ExitCode {
    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("tracker: {err}");
            return ExitCode::from(2);
        }
    };

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(config.log_level, log_dir) {
            eprintln!("tracker: logging disabled: {err}");
        }
    }

    let store = match &config.db_path {
        Some(path) => SqliteStore::open(path),
        None => SqliteStore::open_in_memory(),
    };
    let store = match store {
        Ok(store) => store,
        Err(err) => {
            eprintln!("tracker: cannot open store: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut router = Router::new(Storage::new(store));
    let mut terminal = Terminal { page: Page::new() };

    println!("tracker {} (type `help`)", core_version());
    if let Err(err) = router.start(config.initial_route.as_str(), &mut terminal) {
        eprintln!("tracker: {err}");
        return ExitCode::FAILURE;
    }
    print_view(&terminal);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{}> ", router.current().map_or("-", Route::as_str));
        if io::stdout().flush().is_err() {
            break;
        }
        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("tracker: {err}");
                return ExitCode::FAILURE;
            }
        }
        if line.trim().is_empty() {
            continue;
        }

        match command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Show) => print_view(&terminal),
            Ok(Command::Notices) => print_notices(&terminal),
            Ok(Command::Navigate(fragment)) => {
                match router.navigate(&fragment, &mut terminal) {
                    Ok(_) => print_view(&terminal),
                    Err(err) => eprintln!("tracker: {err}"),
                }
            }
            Ok(Command::Event(event)) => match router.dispatch(event, &mut terminal) {
                Ok(outcome) => {
                    println!("{outcome:?}");
                    print_notices(&terminal);
                }
                Err(err) => {
                    warn!("event=cli_dispatch module=cli status=error error={err}");
                    eprintln!("tracker: {err}");
                }
            },
            Err(message) => eprintln!("{message}"),
        }
        terminal.page.notices().prune_at(Instant::now());
    }

    ExitCode::SUCCESS
}

fn print_view(terminal: &Terminal) {
    println!("{}", terminal.page.render_nav());
    println!("{}", terminal.page.content_html());
}

fn print_notices(terminal: &Terminal) {
    for notice in terminal.page.notice_board().visible() {
        println!("[{:?}] {}", notice.kind, notice.message);
    }
}
