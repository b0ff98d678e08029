use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use monthpick::{
    parse_date, App, AppExit, CalendarBuilder, CalendarMode, ConfigError, EventDay, Labels,
};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use time::{Date, OffsetDateTime};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable holding the log filter directives
const LOG_ENV_VAR: &str = "MONTHPICK_LOG";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    date: Option<Date>,
    mode: CalendarMode,
    select: Option<Date>,
    events: Vec<EventDay>,
    month_names: Option<Vec<String>>,
    day_names: Option<Vec<String>>,
    log_file: Option<PathBuf>,
}

impl RunOptions {
    fn builder(self, today: Date) -> Result<CalendarBuilder, ConfigError> {
        let mut labels = Labels::default();
        if let Some(months) = self.month_names {
            labels = labels.with_months(months)?;
        }
        if let Some(days) = self.day_names {
            labels = labels.with_weekdays(days)?;
        }
        let mut builder = CalendarBuilder::new(today)
            .mode(self.mode)
            .events(self.events)
            .labels(labels);
        if let Some(date) = self.select {
            builder = builder.selected_date(date);
        }
        Ok(builder)
    }
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('m') | Arg::Long("mode") => opts.mode = parser.value()?.parse()?,
                Arg::Short('s') | Arg::Long("select") => {
                    opts.select = Some(parser.value()?.parse_with(parse_date)?);
                }
                Arg::Short('e') | Arg::Long("event") => opts.events.push(parser.value()?.parse()?),
                Arg::Long("month-names") => {
                    opts.month_names = Some(split_csv(&parser.value()?.string()?));
                }
                Arg::Long("day-names") => {
                    opts.day_names = Some(split_csv(&parser.value()?.string()?));
                }
                Arg::Long("log-file") => opts.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if opts.date.is_none() => {
                    opts.date = Some(value.parse_with(parse_date)?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                if let Some(path) = opts.log_file.as_deref() {
                    init_logging(path)?;
                }
                let today = match opts.date {
                    Some(date) => date,
                    None => OffsetDateTime::now_local()
                        .context("failed to determine local date")?
                        .date(),
                };
                let picker = opts
                    .builder(today)
                    .and_then(CalendarBuilder::build)
                    .context("invalid calendar configuration")?;
                let exit = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(picker)
                        .run(terminal)
                        .context("failed to run calendar")
                })?;
                if let AppExit::Confirmed(dates) = exit {
                    for date in dates {
                        println!("{date}");
                    }
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: monthpick [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Paged month calendar with date pickers");
                println!();
                println!("The date argument is used as today's date.  Dates confirmed with 'y' are");
                println!("printed one per line on exit.");
                println!();
                println!("Options:");
                println!("  -m, --mode <MODE>         One of classic, one-day, many-days, range");
                println!("                            [default: classic]");
                println!("  -s, --select <DATE>       Initially selected date (one-day mode only)");
                println!("  -e, --event <DATE[=LABEL]>");
                println!("                            Mark a date as an event day; may be repeated");
                println!("      --month-names <CSV>   Twelve comma-separated month names");
                println!("      --day-names <CSV>     Seven comma-separated weekday names, Monday");
                println!("                            first");
                println!("      --log-file <PATH>     Write logs to PATH, filtered by ${LOG_ENV_VAR}");
                println!("  -h, --help                Display this help message and exit");
                println!("  -V, --version             Show the program version and exit");
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

fn split_csv(s: &str) -> Vec<String> {
    s.split(',').map(|name| name.trim().to_owned()).collect()
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_filter(env_filter),
        )
        .try_init()
        .context("failed to initialize logging")?;
    Ok(())
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
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse(&[]).unwrap(), Command::Run(RunOptions::default()));
    }

    #[test]
    fn test_full_options() {
        let cmd = parse(&[
            "--mode",
            "one-day",
            "-s",
            "2024-06-14",
            "-e",
            "2024-06-20=Dentist",
            "--event=2024-06-21",
            "--log-file",
            "monthpick.log",
            "2024-06-12",
        ])
        .unwrap();
        let Command::Run(opts) = cmd else {
            panic!("expected a run command, got {cmd:?}");
        };
        assert_eq!(opts.date, Some(date!(2024 - 06 - 12)));
        assert_eq!(opts.mode, CalendarMode::OneDayPicker);
        assert_eq!(opts.select, Some(date!(2024 - 06 - 14)));
        assert_eq!(opts.events.len(), 2);
        assert_eq!(opts.events[0].label(), Some("Dentist"));
        assert_eq!(opts.log_file, Some(PathBuf::from("monthpick.log")));
        let picker = opts
            .builder(date!(2024 - 06 - 12))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(picker.selected_date(), Ok(date!(2024 - 06 - 14)));
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse(&["-m", "range", "--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_bad_values() {
        assert!(parse(&["--mode", "weekly"]).is_err());
        assert!(parse(&["2024-13-01"]).is_err());
        assert!(parse(&["-e", "June 20"]).is_err());
        assert!(parse(&["2024-06-12", "2024-06-13"]).is_err());
    }

    #[test]
    fn test_labels() {
        let cmd = parse(&["--day-names", "L, Ma, Me, J, V, S, D"]).unwrap();
        let Command::Run(opts) = cmd else {
            panic!("expected a run command, got {cmd:?}");
        };
        let picker = opts
            .builder(date!(2024 - 06 - 12))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(picker.labels().weekday(0), "L");
        assert_eq!(picker.labels().weekday(6), "D");
        assert_eq!(picker.labels().month(time::Month::June), "June");
    }

    #[test]
    fn test_selection_needs_one_day_mode() {
        let Command::Run(opts) = parse(&["-m", "range", "-s", "2024-06-14"]).unwrap() else {
            panic!("expected a run command");
        };
        assert_eq!(
            opts.builder(date!(2024 - 06 - 12)).and_then(CalendarBuilder::build).err(),
            Some(ConfigError::SelectionNotSupported {
                mode: CalendarMode::RangePicker
            })
        );
    }

    #[test]
    fn test_wrong_label_count() {
        let Command::Run(opts) = parse(&["--month-names", "Jan,Feb"]).unwrap() else {
            panic!("expected a run command");
        };
        assert_eq!(
            opts.builder(date!(2024 - 06 - 12)).err(),
            Some(ConfigError::LabelCount {
                what: "month",
                expected: 12,
                got: 2
            })
        );
    }
}
