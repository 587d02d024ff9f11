mod debug_report;

use headword::{Annotations, HeadwordSink, Options, analyze, compare_focus};
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let opts = Options { trace: config.trace, ..Options::default() };
    let (tree, analysis) = match analyze(&config.input, &opts) {
        Ok(result) => result,
        Err(headword::Error::Tree(err)) => {
            eprintln!("error: invalid tree: {err}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let focus = config.focus.as_deref().map(|word| {
        let focus = tree.tokens().into_iter().find(|&t| tree.text_of(t).eq_ignore_ascii_case(word));
        let mut annotations = Annotations::new();
        annotations.set_focus(focus);
        if let Some(headword) = analysis.headword {
            annotations.write_headword(headword);
        }
        compare_focus(&tree, &annotations)
    });

    debug_report::print_run(&tree, &analysis, focus.as_ref(), config.color);
}

/// Logs go to stderr; `HEADWORD_LOG` takes an `EnvFilter` directive
/// (e.g. `HEADWORD_LOG=debug`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("HEADWORD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

struct CliConfig {
    input: String,
    focus: Option<String>,
    trace: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut focus: Option<String> = None;
    let mut trace = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("headword {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "-t" | "--trace" => trace = true,
            "--focus" => {
                let value = args.next().ok_or_else(|| "error: --focus expects a value".to_string())?;
                focus = Some(value);
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
            _ if arg.starts_with("--focus=") => {
                focus = Some(arg.trim_start_matches("--focus=").to_string());
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

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, focus, trace, color })
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
        "headword {version}

Find the headword of a question from its constituency parse.

Usage:
  headword [OPTIONS] [--] <tree...>
  headword [OPTIONS] --input <tree>

The tree is given in Penn Treebank bracket notation, e.g.
  (ROOT (SBARQ (WHNP (WDT Which) (NN country)) (SQ ...) (. ?)))
Leaves may carry a lemma as a third element: (NNS chocolates chocolate).

Options:
  -i, --input <tree>         Bracketed tree. If omitted, reads remaining args
                             or stdin when no args are provided.
  -t, --trace                Print the descent trace.
  --focus <word>             Compare the headword with this focus word.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  HEADWORD_LOG               Log filter for stderr (e.g. debug, trace).

Exit codes:
  0  Success.
  1  Internal error (malformed tree structure).
  2  Invalid arguments or unreadable tree.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}
