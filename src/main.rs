mod report;

use atomos::{parse_processor, to_atoms, to_atoms_with, Kind, Processor};
use std::io::{self, IsTerminal, Read};

fn main() {
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")
        .and_then(|logger| logger.log_to_stderr().start())
        .ok();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let mut atoms = match config.kind {
        Some(kind) => to_atoms_with(&config.input, kind),
        None => to_atoms(&config.input),
    };
    report::print_run(&config.input, &mut atoms, config.color);
}

struct CliConfig {
    input: String,
    kind: Option<Kind>,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut kind: Option<Kind> = None;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("atomos {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--kind" | "-k" => {
                let value = args.next().ok_or_else(|| "error: --kind expects a value".to_string())?;
                kind = Some(parse_kind(&value)?);
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
            _ if arg.starts_with("--kind=") => {
                let value = arg.trim_start_matches("--kind=");
                kind = Some(parse_kind(value)?);
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
        // Explicit empty input is meaningful (the empty kind claims it);
        // only the no-input-at-all case is an error.
        Some(value) => value,
        None => {
            let value = read_stdin_input()?;
            if value.trim().is_empty() {
                return Err(format!("error: no input provided\n\n{}", help_text()));
            }
            value.trim_end_matches(['\n', '\r']).to_string()
        }
    };

    Ok(CliConfig { input, kind, color })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_kind(value: &str) -> Result<Kind, String> {
    parse_processor(value)
        .map(|processor| processor.kind())
        .map_err(|err| format!("error: {err}"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "atomos {version}

Text fact-extraction CLI: recognizes a value's kind, prints its canonical
form and the named atoms extracted from it.

Usage:
  atomos [OPTIONS] [--] <input...>
  atomos [OPTIONS] --input <text>

Options:
  -i, --input <text>   Input text to atomize. If omitted, reads remaining args
                       or stdin when no args are provided.
  -k, --kind <name>    Pin the processor kind instead of scoring
                       (empty|untyped|words|integer|float|currency).
  --color              Force ANSI color output.
  --no-color           Disable ANSI color output.
  -h, --help           Show this help message.
  -V, --version        Print version information.

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION")
    )
}
