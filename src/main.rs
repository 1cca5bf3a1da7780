mod report;

use sanskrit_morph::{GenderlessCase, Options, RuleMask, constrain_path_verbose_with, parse_paths};
use std::io::{self, IsTerminal, Read};
use std::num::NonZeroUsize;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SANSKRIT_MORPH_LOG";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_logging(config.debug);

    let paths = match parse_paths(&config.source) {
        Ok(paths) => paths,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    let mut runs = Vec::with_capacity(paths.len());
    for path in &paths {
        match constrain_path_verbose_with(path, &config.options) {
            Ok(run) => runs.push(run),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    }

    if config.json {
        match report::to_json(&paths, &runs) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    } else {
        for (path, run) in paths.iter().zip(&runs) {
            report::print_run(path, run, config.color);
        }
    }
}

struct CliConfig {
    source: String,
    options: Options,
    json: bool,
    color: bool,
    debug: bool,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut options = Options::default();
    let mut json = false;
    let mut color = io::stdout().is_terminal();
    let mut debug = false;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("sanskrit-morph {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--need-lakara" => options.require_lakara = true,
            "--exempt-genderless" => options.genderless_case = GenderlessCase::Exempt,
            "--json" => json = true,
            "--color" => color = true,
            "--no-color" => color = false,
            "--debug" => debug = true,
            "--max-solutions" => {
                let value = args.next().ok_or_else(|| "error: --max-solutions expects a value".to_string())?;
                options.max_solutions = Some(parse_limit(&value)?);
            }
            "--disable" => {
                let value = args.next().ok_or_else(|| "error: --disable expects a rule name".to_string())?;
                options.disabled_rules |= parse_rule(&value)?;
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a file".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            _ if arg.starts_with("--max-solutions=") => {
                options.max_solutions = Some(parse_limit(arg.trim_start_matches("--max-solutions="))?);
            }
            _ if arg.starts_with("--disable=") => {
                options.disabled_rules |= parse_rule(arg.trim_start_matches("--disable="))?;
            }
            _ if arg.starts_with("--input=") => {
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(arg.trim_start_matches("--input=").to_string());
            }
            _ if arg.starts_with('-') && arg != "-" => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(arg);
            }
        }
    }

    let source = match input.as_deref() {
        None | Some("-") => read_stdin_input()?,
        Some(file) => {
            std::fs::read_to_string(file).map_err(|err| format!("error: failed to read '{file}': {err}"))?
        }
    };

    if source.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { source, options, json, color, debug })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_limit(value: &str) -> Result<usize, String> {
    value
        .parse::<NonZeroUsize>()
        .map(NonZeroUsize::get)
        .map_err(|_| format!("error: invalid --max-solutions '{value}' (expected a positive integer)"))
}

fn parse_rule(value: &str) -> Result<RuleMask, String> {
    RuleMask::from_rule_name(value).ok_or_else(|| format!("error: unknown rule '{value}'"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "sanskrit-morph {version}

Checks tagged sandhi splits against morphological agreement rules and prints
every consistent analysis.

Usage:
  sanskrit-morph [OPTIONS] [FILE]

Input (FILE, --input or stdin) is either JSON or one pada per line:
  surface: stem{{tag tag ...}} | stem{{tag ...}}
A blank line starts a new split.

Options:
  -i, --input <file>         Read splits from <file> ('-' for stdin).
  --need-lakara              Require exactly one finite verb per split.
  --max-solutions <n>        Stop after <n> analyses per split.
  --exempt-genderless        Exempt case-bearing padas without gender from
                             agreement instead of rejecting the input.
  --disable <rule>           Leave out a rule. One of: single-lakara,
                             final-pada, upasarga, prathama-agreement,
                             vibhakti-agreement, samasa-continuation.
  --json                     Print analyses as JSON.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  --debug                    Log rule evaluation to stderr
                             (otherwise filtered by ${log_env}).
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success (including splits without a valid analysis).
  1  Malformed tags in a split.
  2  Invalid arguments or unreadable input.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}
