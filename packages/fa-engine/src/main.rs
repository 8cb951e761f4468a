use std::{fs::File, sync::Mutex};

use chrono::Local;
use clap::{Parser, Subcommand};
use colored::Colorize;
use fa_engine_lib::{
    automaton::Automaton,
    config::{EngineConfig, LoggerConfig, OutputFormat},
    format::text::ToAutomatonFormat,
};

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the automaton as it was read.
    Show,
    Determinize,
    EliminateEpsilon,
    Complete,
    Complement,
    Minimize,
    /// Check which of the given words are accepted.
    Accepts {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Check whether both automata accept the same language.
    Equivalent { other_file: String },
}

#[derive(Parser, Debug)]
#[command(name = "Finite Automaton Engine")]
#[command(version = "0.1")]
#[command(about = "Transform and compare finite automata", long_about = None)]
struct Args {
    /// The automaton, either `.json` or the textual format (`.aut`, `.txt`).
    file: String,

    #[arg(short, long)]
    config: Option<String>,

    /// Overrides the output format of the config.
    #[arg(short, long)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Command,
}

fn init_logger(config: &LoggerConfig) -> anyhow::Result<()> {
    if !config.enabled {
        return Ok(());
    }

    let level = config.log_level.to_tracing_level();

    if config.log_file {
        std::fs::create_dir_all("./logs")?;
        let file = File::create(format!(
            "./logs/fa_engine_{}.txt",
            Local::now().format("%Y-%m-%d_%H-%M-%S")
        ))?;

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}

fn render(automaton: &Automaton, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => automaton.to_string(),
        OutputFormat::Json => automaton.to_json()?,
        OutputFormat::Dot => automaton.to_graphviz(),
        OutputFormat::Automaton => automaton.to_automaton_format(),
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = EngineConfig::from_optional_file(args.config)?;
    init_logger(&config.logger)?;
    colored::control::set_override(config.output.color);

    let format = args.format.unwrap_or(config.output.format);
    let mut automaton = Automaton::from_file(&args.file)?;

    tracing::info!(
        file = %args.file,
        vertices = automaton.vertex_count(),
        edges = automaton.edge_count(),
        "loaded automaton"
    );

    match args.command {
        Command::Show => {}
        Command::Determinize => automaton.to_deterministic(),
        Command::EliminateEpsilon => automaton.eliminate_epsilon(),
        Command::Complete => automaton.complete(),
        Command::Complement => automaton.complement(),
        Command::Minimize => automaton.minimize(),
        Command::Accepts { words } => {
            for word in words {
                if automaton.has_word(&word) {
                    println!("{:?}: {}", word, "accepted".green());
                } else {
                    println!("{:?}: {}", word, "rejected".red());
                }
            }
            return Ok(());
        }
        Command::Equivalent { other_file } => {
            let other = Automaton::from_file(&other_file)?;
            match automaton.distinguishing_word(&other) {
                None => println!("{}", "equivalent".green()),
                Some(word) => {
                    println!("{}", "not equivalent".red());
                    let (accepting, rejecting) = if automaton.has_word(&word) {
                        (&args.file, &other_file)
                    } else {
                        (&other_file, &args.file)
                    };
                    println!("{:?} is accepted by {} but not by {}", word, accepting, rejecting);
                }
            }
            return Ok(());
        }
    }

    println!("{}", render(&automaton, format)?);

    Ok(())
}
