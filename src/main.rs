use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tokio::time::MissedTickBehavior;

use liveconf::config::{SETTINGS_FILE, WatchSettings};
use liveconf::messages::ConsoleSink;
use liveconf::{ConfigDispatcher, ConfigReloader, ConfigStore, MessageSink, ParserRegistry, Settings, logging};

#[derive(Parser)]
#[command(name = "liveconf", version)]
#[command(about = "Watch a directory and live-reload typed JSON configs")]
struct Cli {
    /// Settings file to use instead of ./liveconf.toml
    #[arg(long, global = true, env = "LIVECONF_SETTINGS")]
    settings: Option<PathBuf>,

    /// Disable coloured notifications
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default settings file and sample config documents
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Watch the config directory and apply changes as they settle
    Watch {
        /// Directory to watch (overrides settings)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Quiet period before a changed file is loaded (overrides settings)
        #[arg(long)]
        cooldown_ms: Option<u64>,

        /// Print every stored config as JSON after each change
        #[arg(long)]
        print: bool,
    },

    /// Load one config document and print the parsed value
    Check {
        /// Path to the JSON document
        file: PathBuf,
    },

    /// Show the effective settings
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .map_err(|e| anyhow!("failed to load settings: {e}"))?;

    logging::init_with_config(&settings.logging);

    let sink: Arc<dyn MessageSink> = Arc::new(ConsoleSink::new(!cli.no_color));

    match cli.command {
        Commands::Init { force } => {
            let path = cli.settings.as_deref().unwrap_or(Path::new(SETTINGS_FILE));
            init(path, &settings.watch, force)
        }
        Commands::Watch {
            dir,
            cooldown_ms,
            print,
        } => {
            if let Some(dir) = dir {
                settings.watch.directory = dir;
            }
            if let Some(cooldown_ms) = cooldown_ms {
                settings.watch.cooldown_ms = cooldown_ms;
            }
            watch(&settings.watch, print, sink).await
        }
        Commands::Check { file } => check(&file, sink),
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&settings)?);
            Ok(())
        }
    }
}

const SAMPLES: [(&str, &str); 3] = [
    (
        "background.json",
        r#"{
  "dataType": "solidColorBackground",
  "color": { "type": "ColorF", "r": 0.6, "g": 0.8, "b": 0.7 }
}
"#,
    ),
    (
        "circle.json",
        r#"{
  "dataType": "circleObject",
  "center": { "type": "Vec2", "x": 640, "y": 360 },
  "radius": { "type": "double", "value": 100 }
}
"#,
    ),
    (
        "print.json",
        r#"{
  "dataType": "printTest",
  "text": { "type": "String", "value": "hello" },
  "count": { "type": "int", "value": 3 },
  "enabled": { "type": "bool", "value": true }
}
"#,
    ),
];

fn init(settings_path: &Path, watch: &WatchSettings, force: bool) -> Result<()> {
    let path = Settings::init_config_file(settings_path, force).map_err(|e| anyhow!("{e}"))?;
    println!("Created default settings at: {}", path.display());

    std::fs::create_dir_all(&watch.directory)
        .with_context(|| format!("cannot create {}", watch.directory.display()))?;

    for (name, contents) in SAMPLES {
        let sample = watch.directory.join(name);
        if sample.exists() && !force {
            println!("Kept existing {}", sample.display());
            continue;
        }
        std::fs::write(&sample, contents)
            .with_context(|| format!("cannot write {}", sample.display()))?;
        println!("Wrote sample {}", sample.display());
    }

    println!("Run 'liveconf watch' and edit the files in {}", watch.directory.display());
    Ok(())
}

async fn watch(settings: &WatchSettings, print: bool, sink: Arc<dyn MessageSink>) -> Result<()> {
    let mut reloader = ConfigReloader::from_settings(settings, sink)
        .with_context(|| format!("cannot watch {}", settings.directory.display()))?;

    let mut ticker = tokio::time::interval(Duration::from_millis(settings.tick_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    liveconf::log_event!(
        "watch",
        "started",
        "{} (Ctrl-C to stop)",
        reloader.monitor().directory().display()
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let report = reloader.tick();
                if print && report.changed() {
                    print_store(reloader.store())?;
                }
            }
            _ = &mut shutdown => {
                liveconf::log_event!("watch", "stopping");
                break;
            }
        }
    }

    Ok(())
}

fn print_store(store: &ConfigStore) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&store.configs())?);
    Ok(())
}

fn check(file: &Path, sink: Arc<dyn MessageSink>) -> Result<()> {
    let dispatcher = ConfigDispatcher::new(ParserRegistry::builtin(), sink);
    let config = dispatcher
        .load(file)
        .with_context(|| format!("{} is not a valid config document", file.display()))?;

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
