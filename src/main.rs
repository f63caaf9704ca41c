mod app;
mod command;
mod config;
mod consts;
mod difficulty;
mod game;
mod gamepad;
mod leaderboard;
mod menu;
mod notice;
mod storage;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::difficulty::Difficulty;
use crate::leaderboard::Leaderboards;
use crate::notice::Notice;
use crate::storage::{JsonFileStore, LoadError, NullStore, ScoreStore};
use crate::util::Globals;
use anyhow::Context;
use lexopt::{Arg, ValueExt};
use std::collections::VecDeque;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

static USAGE: &str = concat!(
    "Usage: boomsnake [<options>]\n",
    "\n",
    "A terminal snake game with bombs\n",
    "\n",
    "Options:\n",
    "  -c <file>, --config <file>      Read configuration from <file> instead of\n",
    "                                  the default configuration file\n",
    "  -d <tier>, --difficulty <tier>  Play at <tier> (easy, normal, or hard),\n",
    "                                  overriding the configured difficulty\n",
    "  -h, --help                      Display this help message and exit\n",
    "  -V, --version                   Show the program version and exit\n",
);

fn main() -> ExitCode {
    let args = match Args::parse() {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", env!("CARGO_PKG_NAME"));
            return ExitCode::from(2);
        }
    };
    let (globals, notices) = match startup(args) {
        Ok(startup) => startup,
        Err(e) => {
            eprintln!("{}: {e:#}", env!("CARGO_PKG_NAME"));
            return ExitCode::from(2);
        }
    };
    let terminal = ratatui::init();
    let r = App::new(globals, notices).run(terminal);
    ratatui::restore();
    io_exit(r)
}

/// Command-line arguments
#[derive(Clone, Debug, Eq, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    difficulty: Option<Difficulty>,
}

impl Args {
    fn parse() -> Result<Option<Args>, lexopt::Error> {
        Args::parse_from(lexopt::Parser::from_env())
    }

    /// Parse command-line arguments.  Returns `Ok(None)` if the invocation
    /// was fully handled by the parser (`--help` or `--version`).
    fn parse_from(mut parser: lexopt::Parser) -> Result<Option<Args>, lexopt::Error> {
        let mut args = Args {
            config: None,
            difficulty: None,
        };
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('d') | Arg::Long("difficulty") => {
                    args.difficulty = Some(parser.value()?.parse()?);
                }
                Arg::Short('h') | Arg::Long("help") => {
                    print!("{USAGE}");
                    return Ok(None);
                }
                Arg::Short('V') | Arg::Long("version") => {
                    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                    return Ok(None);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Some(args))
    }
}

/// Resolve the configuration and the score store for this run.  Problems
/// with a sensible fallback become notices for the main menu to display;
/// only a configuration file named on the command line may abort startup.
fn startup(args: Args) -> anyhow::Result<(Globals, VecDeque<Notice>)> {
    let mut notices = VecDeque::new();
    let config = match args.config {
        Some(ref path) => Config::load(path, false)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => match Config::default_path().and_then(|path| Config::load(&path, true)) {
            Ok(config) => config,
            Err(e) => {
                notices.push_back(Notice::from(e));
                Config::default()
            }
        },
    };
    let store: Rc<dyn ScoreStore> = if config.save_scores() {
        match config.scores_file() {
            Some(path) => Rc::new(JsonFileStore::new(path)),
            None => {
                notices.push_back(Notice::from(LoadError::no_path()));
                Rc::new(NullStore)
            }
        }
    } else {
        Rc::new(NullStore)
    };
    let scores = match Leaderboards::load(&*store) {
        Ok(scores) => scores,
        Err(e) => {
            notices.push_back(Notice::from(e));
            Leaderboards::default()
        }
    };
    let globals = Globals {
        difficulty: args.difficulty.unwrap_or(config.difficulty),
        scores,
        store,
    };
    Ok((globals, notices))
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Option<Args>, lexopt::Error> {
        Args::parse_from(lexopt::Parser::from_iter(
            std::iter::once("boomsnake").chain(args.iter().copied()),
        ))
    }

    #[test]
    fn no_arguments() {
        assert_eq!(
            parse(&[]).unwrap(),
            Some(Args {
                config: None,
                difficulty: None,
            })
        );
    }

    #[test]
    fn config_and_difficulty() {
        assert_eq!(
            parse(&["-c", "custom.toml", "--difficulty", "hard"]).unwrap(),
            Some(Args {
                config: Some(PathBuf::from("custom.toml")),
                difficulty: Some(Difficulty::Hard),
            })
        );
    }

    #[test]
    fn unknown_option_is_rejected() {
        assert!(parse(&["--fast"]).is_err());
    }

    #[test]
    fn bad_difficulty_is_rejected() {
        assert!(parse(&["-d", "brutal"]).is_err());
    }

    #[test]
    fn positional_arguments_are_rejected() {
        assert!(parse(&["hard"]).is_err());
    }
}
