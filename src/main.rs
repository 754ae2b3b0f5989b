mod app;
mod help;
mod jumpto;
mod theme;
mod widget;
use crate::app::App;
use anyhow::{anyhow, Context};
use lexopt::{Arg, Parser, ValueExt};
use monthgrid::{Calendar, CalendarDate, CalendarOptions, MarkingMap};
use ratatui::DefaultTerminal;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunArgs),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunArgs {
    date: Option<CalendarDate>,
    config: Option<PathBuf>,
    marks: Option<PathBuf>,
    log: Option<PathBuf>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = RunArgs::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('m') | Arg::Long("marks") => {
                    args.marks = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log") => args.log = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if args.date.is_none() => args.date = Some(value.parse()?),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(args))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(args) => {
                if let Some(path) = &args.log {
                    init_tracing(path)?;
                }
                let mut options = match &args.config {
                    Some(path) => load_options(path)?,
                    None => CalendarOptions::default(),
                };
                if args.date.is_some() {
                    options.current = args.date;
                }
                let mut calendar = Calendar::new(options, CalendarDate::today());
                if let Some(path) = &args.marks {
                    calendar.set_marks(Some(load_marks(path)?));
                }
                tracing::info!(anchor = %calendar.anchor(), "starting calendar");
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(calendar).run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: monthgrid [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Browse a month calendar with markings, one month at a time");
                println!();
                println!("Options:");
                println!("  -c, --config <FILE>  Read calendar options from a JSON file");
                println!("  -m, --marks <FILE>   Read date markings from a JSON file");
                println!("      --log <FILE>     Write a log to the given file; filter with RUST_LOG");
                println!("  -h, --help           Display this help message and exit");
                println!("  -V, --version        Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn load_options(path: &Path) -> anyhow::Result<CalendarOptions> {
    let src = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    CalendarOptions::from_json(&src)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

fn load_marks(path: &Path) -> anyhow::Result<MarkingMap> {
    let src = fs::read_to_string(path)
        .with_context(|| format!("failed to read marks file {}", path.display()))?;
    MarkingMap::from_json(&src)
        .with_context(|| format!("failed to parse marks file {}", path.display()))
}

/// The terminal belongs to the calendar, so logs only ever go to a file
fn init_tracing(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse(&[]).unwrap(), Command::Run(RunArgs::default()));
    }

    #[test]
    fn test_full_args() {
        let cmd = parse(&["-c", "opts.json", "--marks=marks.json", "--log", "cal.log", "2024-03-05"])
            .unwrap();
        assert_eq!(
            cmd,
            Command::Run(RunArgs {
                date: Some("2024-03-05".parse().unwrap()),
                config: Some(PathBuf::from("opts.json")),
                marks: Some(PathBuf::from("marks.json")),
                log: Some(PathBuf::from("cal.log")),
            })
        );
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse(&["2024-03-05", "--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_bad_date() {
        assert!(parse(&["2024-13-05"]).is_err());
        assert!(parse(&["2024-03-05", "2024-03-06"]).is_err());
    }
}
