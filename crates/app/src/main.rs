use std::{
    fs::OpenOptions,
    io::{self, BufRead},
    path::{Path, PathBuf},
    thread,
};

use clap::{Parser, Subcommand};
use ornament_core::{
    command_channel, AppConfig, BitmapRenderer, Chain, Command, CommandSender, Dispatcher,
    OutputMode, Pattern, PatternKind, RenderGraph, Renderer, StripRenderer,
};
use tracing_subscriber::EnvFilter;

fn main() -> ornament_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            bitmap,
            sequence,
            strip,
        } => run_live(config.as_deref(), bitmap, sequence, strip.as_deref()),
        Commands::Snapshot {
            pattern,
            frames,
            output,
            config,
        } => run_snapshot(&pattern, frames, &output, config.as_deref()),
        Commands::Patterns => {
            for kind in PatternKind::ALL {
                println!("{kind}");
            }
            Ok(())
        }
    }
}

fn run_live(
    config: Option<&Path>,
    bitmap: Option<PathBuf>,
    sequence: bool,
    strip: Option<&Path>,
) -> ornament_core::Result<()> {
    let config = load_config(config)?;
    tracing::info!(pattern = %config.engine.default_pattern, "starting ornament");

    let mut outputs = RenderGraph::new();
    if let Some(path) = strip {
        let device = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        tracing::info!(path = %path.display(), "creating strip output");
        outputs.register(Box::new(StripRenderer::new(device)));
    }
    if bitmap.is_some() || outputs.is_empty() {
        let root = bitmap.unwrap_or_else(|| PathBuf::from("ornament"));
        let mode = if sequence {
            OutputMode::Sequence
        } else {
            OutputMode::Single
        };
        let bitmap = BitmapRenderer::new(root, mode, config.render.clone());
        outputs.register(Box::new(bitmap));
    }

    let (commands, inbox) = command_channel();
    spawn_stdin_receiver(commands);

    let mut dispatcher = Dispatcher::new(Chain::xmas()?, &config, inbox, outputs)?;
    dispatcher.run()
}

fn run_snapshot(
    pattern: &str,
    frames: usize,
    output: &Path,
    config: Option<&Path>,
) -> ornament_core::Result<()> {
    let config = load_config(config)?;
    let kind = PatternKind::from_name(pattern)?;
    let mut chain = Chain::xmas()?;
    let settings = config.engine.initial_settings();
    let mut bitmap = BitmapRenderer::new(output, OutputMode::Sequence, config.render.clone());
    bitmap.set_brightness(settings.brightness);

    let mut sequence = kind.instantiate(&config.patterns, &chain);
    for _ in 0..frames {
        if sequence.is_done() {
            sequence = kind.instantiate(&config.patterns, &chain);
        }
        sequence.advance(&mut chain, &settings);
        let path = bitmap.write(chain.frame())?;
        tracing::debug!(path = %path.display(), "wrote snapshot");
    }

    tracing::info!(
        pattern = %kind,
        frames,
        root = %bitmap.root().display(),
        "snapshot complete"
    );
    Ok(())
}

/// Reads `key=value` command bodies from stdin, one per line, and queues the
/// parsed commands. Lines that fail to parse are reported and dropped.
fn spawn_stdin_receiver(commands: CommandSender) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(error) => {
                    tracing::warn!(%error, "stdin receiver stopped");
                    return;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            match Command::parse_body(&line) {
                Ok(parsed) => {
                    tracing::info!(commands = parsed.len(), "accepted");
                    for command in parsed {
                        if commands.send(command).is_err() {
                            return;
                        }
                    }
                }
                Err(error) => tracing::warn!(%error, %line, "rejected"),
            }
        }
        tracing::info!("stdin closed, no more commands");
    });
}

fn load_config(path: Option<&Path>) -> ornament_core::Result<AppConfig> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            AppConfig::from_json_file(path)
        }
        None => Ok(AppConfig::default()),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Christmas ornament animator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Animate forever, taking `key=value` commands on stdin.
    Run {
        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write PNG frames using this path root.
        #[arg(long)]
        bitmap: Option<PathBuf>,
        /// Number PNG frames instead of overwriting a single file.
        #[arg(long)]
        sequence: bool,
        /// Stream GRB bytes to this device or file.
        #[arg(long)]
        strip: Option<PathBuf>,
    },
    /// Render the first frames of a pattern to numbered PNG files.
    Snapshot {
        /// Pattern name, see `patterns`.
        pattern: String,
        /// How many frames to render.
        #[arg(short, long, default_value_t = 10)]
        frames: usize,
        /// Path root for the PNG files.
        #[arg(short, long, default_value = "snapshot")]
        output: PathBuf,
        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List the available patterns.
    Patterns,
}
