use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};

mod config;
mod debug_log;
mod menu;
mod state;
mod ui;

use config::Config;
use state::{ActionLog, Theme};
use ui::App;

/// Options parsed from the command line.
#[derive(Debug, Default)]
struct Options {
    config_path: Option<PathBuf>,
    theme: Option<Theme>,
    debug: bool,
}

enum Parsed {
    Run(Options),
    Exit(ExitCode),
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Parsed::Run(options) => options,
        Parsed::Exit(code) => return code,
    };

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: &[String]) -> Parsed {
    let mut options = Options::default();
    let mut args = args.iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("rpgkit {}", env!("CARGO_PKG_VERSION"));
                return Parsed::Exit(ExitCode::SUCCESS);
            }
            "--help" | "-h" => {
                print_help();
                return Parsed::Exit(ExitCode::SUCCESS);
            }
            "--debug" => options.debug = true,
            "--config" => match args.next() {
                Some(path) => options.config_path = Some(PathBuf::from(path)),
                None => return missing_value("--config"),
            },
            "--theme" => match args.next().map(|t| t.parse::<Theme>()) {
                Some(Ok(theme)) => options.theme = Some(theme),
                Some(Err(e)) => {
                    eprintln!("error: {e}");
                    return Parsed::Exit(ExitCode::FAILURE);
                }
                None => return missing_value("--theme"),
            },
            arg => {
                eprintln!("error: unknown argument '{arg}'");
                eprintln!("run 'rpgkit --help' for usage");
                return Parsed::Exit(ExitCode::FAILURE);
            }
        }
    }

    Parsed::Run(options)
}

fn missing_value(flag: &str) -> Parsed {
    eprintln!("error: {flag} requires a value");
    Parsed::Exit(ExitCode::FAILURE)
}

fn run(options: Options) -> Result<()> {
    if options.debug {
        let path = debug_log::init().context("failed to start debug log")?;
        debug_log::log_debug(&format!("logging to {}", path.display()));
    }

    let config_path = options.config_path.unwrap_or_else(Config::default_path);
    let mut config = Config::load(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    if let Some(theme) = options.theme {
        config.theme = theme;
    }

    let action_log = ActionLog::new(config.log_dir());
    action_log.log_started(env!("CARGO_PKG_VERSION"));

    let mut app = App::new(&config, action_log.clone());
    if let Err(e) = app.run() {
        action_log.log_error(&e.to_string());
        return Err(e).context("cannot start the menu shell");
    }

    Ok(())
}

fn print_help() {
    println!(
        "rpgkit {} - Terminal menu shell for the RPG toolkit

USAGE:
    rpgkit [OPTIONS]

OPTIONS:
    -h, --help            Print help information
    -V, --version         Print version information
    --config <PATH>       Read configuration from PATH
    --theme <light|dark>  Start with the given theme
    --debug               Write a debug log to ~/.rpgkit/debug.log

KEYS:
    Alt+F/E/V/P/T/H       Focus the File/Edit/View/Project/Tools/Help menu
    Enter, Space          Open or close the focused menu
    Ctrl+N/O/S/Z/Y/X/C/V  New, Open, Save, Undo, Redo, Cut, Copy, Paste
    Right click           Context menu
    Ctrl+Q                Quit",
        env!("CARGO_PKG_VERSION")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_no_args() {
        let Parsed::Run(options) = parse_args(&[]) else {
            panic!("expected options");
        };
        assert!(!options.debug);
        assert!(options.config_path.is_none());
        assert!(options.theme.is_none());
    }

    #[test]
    fn test_parse_all_options() {
        let Parsed::Run(options) =
            parse_args(&args(&["--debug", "--config", "/tmp/x.json", "--theme", "light"]))
        else {
            panic!("expected options");
        };
        assert!(options.debug);
        assert_eq!(options.config_path, Some(PathBuf::from("/tmp/x.json")));
        assert_eq!(options.theme, Some(Theme::Light));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(parse_args(&args(&["--bogus"])), Parsed::Exit(_)));
        assert!(matches!(parse_args(&args(&["--theme", "sepia"])), Parsed::Exit(_)));
        assert!(matches!(parse_args(&args(&["--config"])), Parsed::Exit(_)));
    }
}
