use std::fmt;

use classtrack_core::catalog::Catalog;
use classtrack_core::model::{ExerciseId, Roster, StudentId, SubjectId};
use services::ProgressStore;
use storage::PersistenceAdapter;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingFlag { flag: &'static str },
    UnknownArg(String),
    InvalidStudentId { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingFlag { flag } => write!(f, "{flag} is required for this command"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidStudentId { raw } => write!(f, "invalid --student value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
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
    eprintln!("  cargo run -p app -- board  [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- toggle --student <id> --subject <id> --exercise <id>");
    eprintln!("  cargo run -p app -- add    --first <name> --last <name>");
    eprintln!("  cargo run -p app -- reset  --student <id> [--subject <id>]");
    eprintln!("  cargo run -p app -- seed   [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:classtrack.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CLASSTRACK_DB_URL");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Board,
    Toggle,
    Add,
    Reset,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "board" => Some(Self::Board),
            "toggle" => Some(Self::Toggle),
            "add" => Some(Self::Add),
            "reset" => Some(Self::Reset),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

struct Args {
    db_url: String,
    student: Option<StudentId>,
    subject: Option<SubjectId>,
    exercise: Option<ExerciseId>,
    first: Option<String>,
    last: Option<String>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            db_url: std::env::var("CLASSTRACK_DB_URL")
                .ok()
                .map_or_else(|| "sqlite://classtrack.sqlite3".into(), normalize_sqlite_url),
            student: None,
            subject: None,
            exercise: None,
            first: None,
            last: None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    parsed.db_url = normalize_sqlite_url(value);
                }
                "--student" => {
                    let value = require_value(args, "--student")?;
                    let id = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidStudentId { raw: value.clone() })?;
                    parsed.student = Some(id);
                }
                "--subject" => {
                    parsed.subject = Some(SubjectId::new(require_value(args, "--subject")?));
                }
                "--exercise" => {
                    parsed.exercise = Some(ExerciseId::new(require_value(args, "--exercise")?));
                }
                "--first" => parsed.first = Some(require_value(args, "--first")?),
                "--last" => parsed.last = Some(require_value(args, "--last")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    fn require_student(&self) -> Result<StudentId, ArgsError> {
        self.student.ok_or(ArgsError::MissingFlag { flag: "--student" })
    }

    fn require_subject(&self) -> Result<SubjectId, ArgsError> {
        self.subject
            .clone()
            .ok_or(ArgsError::MissingFlag { flag: "--subject" })
    }

    fn require_exercise(&self) -> Result<ExerciseId, ArgsError> {
        self.exercise
            .clone()
            .ok_or(ArgsError::MissingFlag { flag: "--exercise" })
    }

    fn require_name(&self) -> Result<(String, String), ArgsError> {
        let first = self
            .first
            .clone()
            .ok_or(ArgsError::MissingFlag { flag: "--first" })?;
        let last = self
            .last
            .clone()
            .ok_or(ArgsError::MissingFlag { flag: "--last" })?;
        Ok((first, last))
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
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
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

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

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: show the leaderboard when no subcommand is given.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Board,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Board,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let args = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // The CLI always runs without a host shell, so the adapter resolves to
    // the local sqlite store.
    prepare_sqlite_file(&args.db_url)?;
    let adapter = PersistenceAdapter::detect(None, &args.db_url).await?;

    match cmd {
        Command::Board => {
            let store = ProgressStore::hydrate(adapter).await;
            let catalog = Catalog::standard();
            print_board(&store, &catalog);
            Ok(())
        }
        Command::Toggle => {
            let student = args.require_student()?;
            let subject = args.require_subject()?;
            let exercise = args.require_exercise()?;

            let mut store = ProgressStore::hydrate(adapter).await;
            let Some(found) = store.student(student) else {
                eprintln!("no student with id {student}");
                return Ok(());
            };
            let name = found.full_name();

            store.toggle_exercise(student, &subject, &exercise);
            store.flush().await;

            let completed = store
                .student(student)
                .is_some_and(|s| s.is_completed(&subject, &exercise));
            let state = if completed { "complete" } else { "not complete" };
            println!("{subject}/{exercise} is now {state} for {name}");
            Ok(())
        }
        Command::Add => {
            let (first, last) = args.require_name()?;
            let mut store = ProgressStore::hydrate(adapter).await;
            let id = store.add_student(first, last)?;
            store.flush().await;
            println!("added student {id}");
            Ok(())
        }
        Command::Reset => {
            let student = args.require_student()?;
            let mut store = ProgressStore::hydrate(adapter).await;
            if store.student(student).is_none() {
                eprintln!("no student with id {student}");
                return Ok(());
            }
            store.reset_progress(student, args.subject.as_ref());
            store.flush().await;
            match &args.subject {
                Some(subject) => println!("reset {subject} progress for student {student}"),
                None => println!("reset all progress for student {student}"),
            }
            Ok(())
        }
        Command::Seed => {
            adapter.save(&Roster::seed()).await;
            println!("stored the seed roster");
            Ok(())
        }
    }
}

fn print_board(store: &ProgressStore, catalog: &Catalog) {
    println!("{:>4}  {:<24} {:>9} {:>6}", "rank", "student", "completed", "%");
    for student in store.sorted_by_progress() {
        let rank = store.rank(student.id());
        let overall = store.total_progress(student.id(), catalog);
        let marker = if rank.is_ex_aequo { "  ex æquo" } else { "" };
        println!(
            "{:>4}  {:<24} {:>9} {:>5}%{marker}",
            rank.rank,
            student.full_name(),
            store.total_completed(student.id()),
            overall.percentage,
        );
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
