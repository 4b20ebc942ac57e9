//! Purpose: `queryjson` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, runs commands, emits JSON on stdout.
//! Invariants: Commands emit stable JSON on stdout (pretty or compact by flag).
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::error::Error as StdError;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

use queryjson::api::{Error, ErrorKind, QueryDeserializer, QueryType, to_exit_code};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                let message = err.to_string();
                let summary = message.lines().next().unwrap_or("invalid arguments");
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(summary.trim_start_matches("error: ").to_string())
                        .with_hint("Run `queryjson --help` for usage."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    init_tracing();
    let color_mode = cli.color;
    dispatch_command(cli.command).map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "queryjson",
    version,
    about = "Validate JSON query documents into typed queries",
    long_about = None,
    after_help = r#"EXAMPLES
  $ queryjson decode query.json
  $ echo '{"signature":{"pubkey":"ab","signature":"cd"},"creator_account_id":"a@b","created_ts":100,"query_hash":"h","query_counter":1,"query_type":"get_account","account_id":"a@b"}' | queryjson decode
  $ queryjson check query.json
  $ queryjson types

Set RUST_LOG=debug to log why a document was rejected."#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Decode a query document and print the typed query")]
    Decode {
        #[arg(
            help = "Path to a JSON query document, or - for stdin (default)",
            value_hint = ValueHint::FilePath
        )]
        input: Option<PathBuf>,
        #[arg(long, help = "Emit single-line JSON instead of pretty output")]
        compact: bool,
    },
    #[command(about = "Report whether a query document is valid, without diagnostics")]
    Check {
        #[arg(
            help = "Path to a JSON query document, or - for stdin (default)",
            value_hint = ValueHint::FilePath
        )]
        input: Option<PathBuf>,
    },
    #[command(about = "List supported query types and their required fields")]
    Types,
}

fn dispatch_command(command: Command) -> Result<RunOutcome, Error> {
    match command {
        Command::Decode { input, compact } => {
            let bytes = read_input(input.as_ref())?;
            let query = QueryDeserializer::new().try_deserialize_slice(&bytes)?;
            let value = serde_json::to_value(&query).map_err(|err| {
                Error::new(ErrorKind::Internal)
                    .with_message("failed to encode query")
                    .with_source(err)
            })?;
            emit_json(&value, !compact);
            Ok(RunOutcome::ok())
        }
        Command::Check { input } => {
            let bytes = read_input(input.as_ref())?;
            match QueryDeserializer::new().deserialize_slice(&bytes) {
                Some(query) => {
                    emit_json(
                        &json!({"valid": true, "query_type": query.query_type().as_str()}),
                        false,
                    );
                    Ok(RunOutcome::ok())
                }
                None => {
                    emit_json(&json!({"valid": false}), false);
                    Ok(RunOutcome::with_code(1))
                }
            }
        }
        Command::Types => {
            let table = QueryDeserializer::new().table();
            let types: Vec<Value> = QueryType::ALL
                .iter()
                .filter(|query_type| table.lookup(query_type.as_str()).is_some())
                .map(|query_type| {
                    json!({
                        "name": query_type.as_str(),
                        "required_fields": query_type.required_fields(),
                    })
                })
                .collect();
            emit_json(&json!({ "query_types": types }), true);
            Ok(RunOutcome::ok())
        }
    }
}

fn read_input(input: Option<&PathBuf>) -> Result<Vec<u8>, Error> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read(path).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message(format!("failed to read {}", path.display()))
                .with_source(err)
        }),
        _ => {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read stdin")
                    .with_source(err)
            })?;
            Ok(bytes)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn emit_json(value: &Value, pretty: bool) {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    let json = json.unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let json = serde_json::to_string(&error_json(err)).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Parse => "query document is not valid JSON".to_string(),
        ErrorKind::MissingField => "required field is missing".to_string(),
        ErrorKind::InvalidField => "field has the wrong type".to_string(),
        ErrorKind::UnknownQueryType => "unknown query type".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(field) = err.field() {
        inner.insert("field".to_string(), json!(field));
    }
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = vec![format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    )];
    if let Some(field) = err.field() {
        lines.push(format!(
            "{} {field}",
            colorize_label("field:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    lines.join("\n")
}
