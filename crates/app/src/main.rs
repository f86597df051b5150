use std::fmt;
use std::io;

use neuropath_core::model::SubmissionKind;
use services::{AppServices, Clock};

mod terminal;

use terminal::TerminalQuiz;

const DEFAULT_DB_URL: &str = "sqlite://neuropath.sqlite3";
const MEMORY_DB_URL: &str = "sqlite::memory:";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidField { raw: String },
    InvalidDbUrl { raw: String },
    InvalidKind { raw: String },
    MissingKind,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidField { raw } => {
                write!(f, "invalid --field value (expected name=value): {raw}")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidKind { raw } => write!(
                f,
                "invalid submission kind: {raw} (expected waitlist, feedback or lesson_unlock)"
            ),
            ArgsError::MissingKind => write!(f, "list requires a submission kind"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  neuropath quiz     [--db <sqlite_url>]");
    eprintln!("  neuropath waitlist [--db <sqlite_url>] --field <name=value>...");
    eprintln!("  neuropath feedback [--db <sqlite_url>] --field <name=value>...");
    eprintln!("  neuropath list     [--db <sqlite_url>] <waitlist|feedback|lesson_unlock>");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}   (use {MEMORY_DB_URL} for a throwaway store)");
    eprintln!();
    eprintln!("Environment (also read from .env):");
    eprintln!("  NEUROPATH_DB_URL, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quiz,
    Waitlist,
    Feedback,
    List,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "quiz" => Some(Self::Quiz),
            "waitlist" => Some(Self::Waitlist),
            "feedback" => Some(Self::Feedback),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    db_url: String,
    fields: Vec<(String, String)>,
    kind: Option<SubmissionKind>,
}

impl Args {
    fn parse(
        cmd: Command,
        args: &mut impl Iterator<Item = String>,
        env_db_url: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = env_db_url.map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut fields = Vec::new();
        let mut kind = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--field" if matches!(cmd, Command::Waitlist | Command::Feedback) => {
                    let value = require_value(args, "--field")?;
                    let (name, field_value) = value
                        .split_once('=')
                        .ok_or_else(|| ArgsError::InvalidField { raw: value.clone() })?;
                    fields.push((name.to_string(), field_value.to_string()));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                raw if cmd == Command::List && kind.is_none() && !raw.starts_with("--") => {
                    kind = Some(
                        raw.parse::<SubmissionKind>()
                            .map_err(|_| ArgsError::InvalidKind { raw: raw.to_string() })?,
                    );
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if cmd == Command::List && kind.is_none() {
            return Err(ArgsError::MissingKind);
        }

        Ok(Self {
            db_url,
            fields,
            kind,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == MEMORY_DB_URL || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn open_services(db_url: &str) -> Result<AppServices, Box<dyn std::error::Error>> {
    let clock = Clock::system();
    if db_url == MEMORY_DB_URL {
        log::info!("using in-memory submission store");
        return Ok(AppServices::in_memory(clock));
    }
    prepare_sqlite_file(db_url)?;
    log::info!("opening submission store at {db_url}");
    Ok(AppServices::new_sqlite(db_url, clock).await?)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand runs the quiz.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Quiz,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Quiz,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            io::Error::new(io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter, std::env::var("NEUROPATH_DB_URL").ok()).map_err(
        |e| {
            eprintln!("{e}");
            print_usage();
            e
        },
    )?;

    let services = open_services(&parsed.db_url).await?;

    match cmd {
        Command::Quiz => {
            let stdin = io::stdin();
            let mut term = TerminalQuiz::new(stdin.lock(), io::stdout());
            term.run(&services.quiz()).await?;
        }
        Command::Waitlist => {
            let receipt = services.submissions().submit_waitlist(parsed.fields).await?;
            println!("{}", receipt.message);
        }
        Command::Feedback => {
            let receipt = services.submissions().submit_feedback(parsed.fields).await?;
            println!("{}", receipt.message);
        }
        Command::List => {
            let kind = parsed.kind.ok_or(ArgsError::MissingKind)?;
            let submissions = services.submissions().list(kind).await?;
            println!("{}", serde_json::to_string_pretty(&submissions)?);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
