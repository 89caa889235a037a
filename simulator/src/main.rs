use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use crown_anchor_execution::{
    crown::{dice, keys::shortcut, seed_commitment, GameSession},
    Directory, Memory, Store,
};
use crown_anchor_simulator::{
    config::{Config, ValidatedConfig},
    Api, Session, Simulator,
};
use crown_anchor_types::{
    api::{Intent, Response},
    crown::{decode_receipt, SessionSeed, Symbol},
};
use std::{
    io::{self, BufRead, Write},
    net::SocketAddr,
    path::PathBuf,
    sync::Arc,
    thread,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML configuration file. Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the table over HTTP.
    Serve {
        /// Overrides the configured port.
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Play at the terminal using the keyboard shortcuts.
    Play,
    /// Check a round receipt against a revealed session seed.
    Verify {
        /// Session seed (64 hex characters).
        seed: String,
        /// Round receipt (hex).
        receipt: String,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<ValidatedConfig> {
    let config = match path {
        Some(path) => {
            let file = std::fs::read_to_string(path)
                .with_context(|| format!("could not read config file {}", path.display()))?;
            serde_yaml::from_str::<Config>(&file)
                .with_context(|| format!("could not parse config file {}", path.display()))?
        }
        None => Config::default(),
    };
    Ok(config.validate()?)
}

fn open_session(config: &ValidatedConfig) -> Result<Session> {
    let store: Box<dyn Store + Send> = match &config.directory {
        Some(directory) => Box::new(
            Directory::open(directory)
                .with_context(|| format!("could not open store at {}", directory.display()))?,
        ),
        None => Box::new(Memory::default()),
    };
    Ok(GameSession::load(store, config.table.clone()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;

    match args.command {
        Command::Serve { port } => {
            tracing_subscriber::fmt()
                .with_max_level(config.log_level)
                .init();
            let session = open_session(&config)?;
            info!(
                commitment = %session.commitment(),
                round = session.round(),
                "session ready"
            );

            let simulator = Arc::new(Simulator::new(session, config.reveal_delay));
            let api = Api::new(simulator);
            let app = api.router();

            let addr = SocketAddr::from(([0, 0, 0, 0], port.unwrap_or(config.port)));
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            info!("Listening on {}", addr);
            axum::serve(listener, app.into_make_service())
                .await
                .context("server failed")?;
        }
        Command::Play => {
            // Logs would interleave with the table, so only warnings go out.
            tracing_subscriber::fmt()
                .with_max_level(tracing::Level::WARN)
                .with_writer(io::stderr)
                .init();
            let session = open_session(&config)?;
            play(session, &config)?;
        }
        Command::Verify { seed, receipt } => verify(&seed, &receipt)?,
    }
    Ok(())
}

const LEGEND: &str = "\
bets: q=crown w=anchor e=heart a=diamond d=club f=spade
chips: 1-4   space: roll   c: clear   r: repeat   m: sound   ?: help   x: exit";

fn play(mut session: Session, config: &ValidatedConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "Crown & Anchor (commitment {})", session.commitment())?;
    writeln!(stdout, "{LEGEND}")?;
    print_table(&mut stdout, &session)?;

    for line in stdin.lock().lines() {
        let line = line?;
        // An empty line is a bare enter, which rolls.
        let keys: Vec<char> = if line.is_empty() {
            vec![' ']
        } else {
            line.chars().collect()
        };
        for key in keys {
            match key {
                'x' | 'X' => return Ok(()),
                '?' => writeln!(stdout, "{LEGEND}")?,
                key => {
                    let Some(intent) = shortcut(key, &config.table.chip_tiers) else {
                        continue;
                    };
                    if intent == Intent::Roll && !config.reveal_delay.is_zero() {
                        writeln!(stdout, "🎲 rolling...")?;
                        thread::sleep(config.reveal_delay);
                    }
                    let response = session.dispatch(intent);
                    print_response(&mut stdout, &response)?;
                }
            }
        }
        print_table(&mut stdout, &session)?;
    }
    Ok(())
}

fn print_response(out: &mut impl Write, response: &Response) -> io::Result<()> {
    for message in &response.messages {
        writeln!(out, "  {}", message.text)?;
    }
    for unlocked in &response.unlocked {
        writeln!(
            out,
            "  {} {}: {}",
            unlocked.info.icon, unlocked.info.title, unlocked.info.description
        )?;
    }
    if let Some(round) = &response.round {
        writeln!(out, "  receipt {}", round.receipt)?;
    }
    Ok(())
}

fn print_table(out: &mut impl Write, session: &Session) -> io::Result<()> {
    let bets = session.bets();
    let placed: Vec<String> = Symbol::ALL
        .iter()
        .filter(|&&symbol| bets[symbol] > 0)
        .map(|&symbol| format!("{}${}", symbol.emoji(), bets[symbol]))
        .collect();
    writeln!(
        out,
        "balance ${} | chip ${} | bets [{}]",
        session.balance(),
        session.selected_chip(),
        placed.join(" ")
    )?;
    out.flush()
}

fn verify(seed: &str, receipt: &str) -> Result<()> {
    let seed = SessionSeed::from_hex(seed.trim())
        .ok_or_else(|| anyhow!("seed must be 32 bytes of hex"))?;
    let summary = decode_receipt(receipt).map_err(|e| anyhow!("{e}"))?;
    println!("commitment {}", seed_commitment(&seed));
    if !dice::verify(&seed, &summary) {
        bail!(
            "round {} does not match the seed (receipt shows {})",
            summary.round,
            summary.outcome.display()
        );
    }
    println!(
        "round {} verified: {} wagered ${} won ${}",
        summary.round,
        summary.outcome.display(),
        summary.wagered,
        summary.winnings
    );
    Ok(())
}
