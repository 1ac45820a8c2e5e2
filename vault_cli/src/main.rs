use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use vault_core::*;

#[derive(Parser)]
#[command(name = "ironvault")]
#[command(about = "Workout generator and set tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available training modes
    Modes,

    /// Print the playlist for a mode without starting a session
    Generate {
        /// Mode name, e.g. "Upper Power"
        mode: String,

        /// Emit the playlist as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a session, logging sets typed on stdin
    Start {
        /// Mode name, e.g. "Upper Power"
        mode: String,
    },

    /// Plates per side for a target barbell weight
    Plates {
        /// Target weight in kg
        weight: String,
    },

    /// Estimated one-rep max for a set
    OneRm {
        /// Weight lifted in kg
        weight: String,
        /// Reps completed
        reps: String,
    },

    /// Show the most recent set logged for an exercise
    History {
        /// Exercise name (exact match)
        exercise: Option<String>,

        /// List every logged set instead
        #[arg(long, conflicts_with = "exercise")]
        all: bool,
    },

    /// Print the training guide
    Guide {
        /// Emit the chapters as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    vault_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    match cli.command {
        Commands::Modes => cmd_modes(catalog),
        Commands::Generate { mode, json } => cmd_generate(catalog, data_dir, &mode, json, &config),
        Commands::Start { mode } => cmd_start(catalog, data_dir, &mode, &config),
        Commands::Plates { weight } => cmd_plates(&weight, &config),
        Commands::OneRm { weight, reps } => {
            println!("Estimated 1RM: {} kg", estimated_one_rep_max(&weight, &reps));
            Ok(())
        }
        Commands::History { exercise, all } => cmd_history(data_dir, exercise, all),
        Commands::Guide { json } => cmd_guide(json),
    }
}

fn cmd_modes(catalog: &Catalog) -> Result<()> {
    for family in [
        ModeFamily::Phat,
        ModeFamily::Specialty,
        ModeFamily::Conditioning,
        ModeFamily::Mobility,
    ] {
        println!("{}", family);
        for mode in catalog.family(family) {
            println!("  {:<18} {} exercises", mode.name, mode.slots.len());
        }
        println!();
    }
    Ok(())
}

fn cmd_generate(
    catalog: &Catalog,
    data_dir: PathBuf,
    mode: &str,
    json: bool,
    config: &Config,
) -> Result<()> {
    let mode = resolve_mode(catalog, mode);
    let log = CsvSetLog::open(&data_dir)?;
    let playlist = generate(catalog, &log, &mode, &GenerateOptions::from(&config.generation));

    if json {
        println!("{}", serde_json::to_string_pretty(&playlist)?);
        return Ok(());
    }

    println!("\n{}", mode.to_uppercase());
    println!("─────────────────────────────────────────");
    for (i, item) in playlist.iter().enumerate() {
        println!(
            "{:>2}. [{}] {} — {} ({})",
            i + 1,
            item.category,
            item.name,
            item.reps,
            item.history
        );
        println!("      {}", item.cue);
    }
    println!();
    Ok(())
}

fn cmd_start(catalog: &Catalog, data_dir: PathBuf, mode: &str, config: &Config) -> Result<()> {
    let mode = resolve_mode(catalog, mode);
    let log = CsvSetLog::open(&data_dir)?;
    let playlist = generate(catalog, &log, &mode, &GenerateOptions::from(&config.generation));

    let mut player = SessionPlayer::from_config(log, &config.session);
    player.load(playlist);
    if player.is_complete() {
        println!("Nothing to do for '{}'.", mode);
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut last_tick = Instant::now();

    while let Some(item) = player.current() {
        let position = match player.state() {
            PlayerState::Presenting(i) => i + 1,
            PlayerState::Idle => break,
        };
        display_item(item, position, player.queue().len(), &player.rest_display());

        print!("weight reps > ");
        io::stdout().flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => {
                player.exit();
                println!("\nSession ended.");
                break;
            }
        };

        // Rest keeps counting while the set is being performed
        player.tick(last_tick.elapsed());
        last_tick = Instant::now();

        let input = line.trim();
        if input.eq_ignore_ascii_case("q") {
            player.exit();
            println!("\nSession exited.");
            break;
        }
        let mut fields = input.split_whitespace();
        let weight = fields.next().unwrap_or("");
        let reps = fields.next().unwrap_or("");
        player.enter(weight, reps);

        match player.advance() {
            Advance::Stepped { logged, step } => {
                match logged {
                    LogOutcome::Logged(record) => println!(
                        "✓ Logged {} {}kg x {} (est. 1RM {})",
                        record.exercise, record.weight, record.reps, record.one_rep_max
                    ),
                    LogOutcome::Skipped => println!("  (not logged)"),
                    LogOutcome::StoreFailed(reason) => {
                        println!("! Could not save set: {}", reason)
                    }
                }
                match step {
                    // A line-based prompt cannot double-submit, so the
                    // debounce is flushed right away
                    Step::Next(_) => {
                        player.tick(config.session.advance_delay());
                    }
                    Step::Completed(summary) => {
                        display_summary(&summary);
                        break;
                    }
                }
            }
            Advance::Ignored => continue,
            Advance::NotRunning => break,
        }
    }

    Ok(())
}

fn cmd_plates(weight: &str, config: &Config) -> Result<()> {
    let calculator = config.plates.calculator()?;
    println!("Load: {}", calculator.load_text(weight));
    Ok(())
}

fn cmd_history(data_dir: PathBuf, exercise: Option<String>, all: bool) -> Result<()> {
    let log = CsvSetLog::open(&data_dir)?;

    if all {
        let records = log.records()?;
        if records.is_empty() {
            println!("No sets logged yet.");
        }
        for record in records {
            println!(
                "{}  {:<24} {:>7}kg x {:<4} 1RM {}",
                record.date, record.exercise, record.weight, record.reps, record.one_rep_max
            );
        }
        return Ok(());
    }

    match exercise {
        Some(name) => println!("{}: {}", name, log.most_recent(&name)?),
        None => eprintln!("Give an exercise name or --all."),
    }
    Ok(())
}

fn cmd_guide(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(vault_core::guide::chapters())?);
        return Ok(());
    }

    for chapter in vault_core::guide::chapters() {
        println!("{}", chapter.title);
        println!("{}", chapter.subtitle);
        println!();
        println!("{}", chapter.body);
        println!("\n");
    }
    Ok(())
}

/// Exact mode name, falling back to a case-insensitive match
fn resolve_mode(catalog: &Catalog, input: &str) -> String {
    if catalog.get(input).is_some() {
        return input.to_string();
    }
    match catalog.names().find(|name| name.eq_ignore_ascii_case(input)) {
        Some(name) => name.to_string(),
        None => {
            if catalog::has_bookends(input) {
                eprintln!("Unknown mode: {}. Only warm-up and cool-down will be shown.", input);
            } else {
                eprintln!("Unknown mode: {}. Nothing to show.", input);
            }
            input.to_string()
        }
    }
}

fn display_item(item: &PlaylistItem, position: usize, total: usize, rest: &str) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {} · {}/{}", item.category, position, total);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {}", item.name);
    println!("  {}", item.reps);
    println!("  {}", item.history);
    println!("  {}", item.cue);
    if !rest.is_empty() {
        println!();
        println!("  {}", rest);
    }
    println!();
}

fn display_summary(summary: &SessionSummary) {
    println!("\n✓ Session complete!");
    println!("  Sets logged: {}", summary.sets_logged);
    println!("  Tonnage: {} kg", summary.tonnage);
    if summary.sets_failed > 0 {
        println!("  Sets not saved: {}", summary.sets_failed);
    }
}
