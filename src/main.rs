mod logging;
mod report;

use openhours::Editor;
use std::io::{self, IsTerminal, Read};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    logging::init(config.verbosity);

    match config.mode {
        Mode::Parse(input) => {
            let editor = Editor::from_text(input.trim());
            report::print_run(&input, &editor, config.color);
            if !editor.is_valid() {
                std::process::exit(1);
            }
        }
        Mode::Corpus(path) => {
            let text = match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(err) => {
                    eprintln!("error: failed to read corpus '{path}': {err}");
                    std::process::exit(2);
                }
            };
            let survey = openhours::corpus::survey(text.lines());
            report::print_survey(&path, &survey, config.color);
        }
    }
}

enum Mode {
    Parse(String),
    Corpus(String),
}

struct CliConfig {
    mode: Mode,
    color: bool,
    verbosity: u8,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut corpus: Option<String> = None;
    let mut color = io::stdout().is_terminal();
    let mut verbosity: u8 = 0;
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("openhours {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--verbose" => verbosity = verbosity.saturating_add(1),
            "--corpus" => {
                let value = args.next().ok_or_else(|| "error: --corpus expects a file".to_string())?;
                corpus = Some(value);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if is_verbosity_flag(&arg) => {
                let count = u8::try_from(arg.len() - 1).unwrap_or(u8::MAX);
                verbosity = verbosity.saturating_add(count);
            }
            _ if arg.starts_with("--corpus=") => {
                corpus = Some(arg.trim_start_matches("--corpus=").to_string());
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let mode = match (corpus, input) {
        (Some(_), Some(_)) => return Err("error: --corpus cannot be combined with an input".to_string()),
        (Some(path), None) => Mode::Corpus(path),
        (None, Some(value)) => Mode::Parse(value),
        (None, None) => Mode::Parse(read_stdin_input()?),
    };

    if let Mode::Parse(input) = &mode {
        if input.trim().is_empty() {
            return Err(format!("error: no input provided\n\n{}", help_text()));
        }
    }

    Ok(CliConfig { mode, color, verbosity })
}

/// `-v`, `-vv`, `-vvv`, ...
fn is_verbosity_flag(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-') && arg[1..].chars().all(|c| c == 'v')
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "openhours {version}

Parse an OpenStreetMap opening_hours string and print its rule tree and
canonical form.

Usage:
  openhours [OPTIONS] [--] <input...>
  openhours [OPTIONS] --input <text>
  openhours [OPTIONS] --corpus <file>

Options:
  -i, --input <text>         Input text to parse. If omitted, reads remaining args
                             or stdin when no args are provided.
  --corpus <file>            Parse every line of <file> and report the parse rate.
                             Blank lines and lines starting with '#' are skipped.
  -v, --verbose              Increase log output (-vv for debug, -vvv for trace).
                             RUST_LOG overrides this when set.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success.
  1  The input did not parse.
  2  Invalid arguments, missing input or unreadable corpus.
",
        version = env!("CARGO_PKG_VERSION")
    )
}
