use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::Mutex;

use flowstore::config::StoreConfig;
use flowstore::counter::{CounterEvent, CounterReducer, CounterState};
use flowstore::logging::init_tracing;
use flowstore::store::{Observer, ObserverError, Store};

/// Feed counter events through a store and print what each observer sees.
#[derive(Debug, Parser)]
#[command(name = "flowstore", version)]
struct Cli {
    /// Config file (default: ~/.config/flowstore/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// Print states as JSON
    #[arg(long)]
    json: bool,

    /// Events to apply in order: set:<n>, inc:<n>, clear, label:<text>
    #[arg(value_name = "EVENT")]
    events: Vec<String>,
}

/// Observer that prints every state it receives under a name.
struct Printer {
    name: &'static str,
    json: bool,
    out: Arc<Mutex<io::Stdout>>,
}

impl Observer<CounterState> for Printer {
    fn on_state(&self, state: &CounterState) -> Result<(), ObserverError> {
        let line = render(state, self.json).map_err(ObserverError::other)?;
        let mut out = self.out.lock();
        writeln!(out, "{}: {}", self.name, line).map_err(ObserverError::other)
    }
}

fn render(state: &CounterState, json: bool) -> serde_json::Result<String> {
    if json {
        serde_json::to_string(state)
    } else {
        Ok(state.to_string())
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<StoreConfig> {
    match path {
        Some(path) => StoreConfig::load_from(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => StoreConfig::load().context("loading default config"),
    }
}

fn run(cli: Cli) -> Result<()> {
    let events = cli
        .events
        .iter()
        .map(|token| token.parse::<CounterEvent>())
        .collect::<Result<Vec<_>, _>>()?;
    let config = load_config(cli.config.as_ref())?;
    let store: Store<CounterReducer> = Store::new(config);

    let out = Arc::new(Mutex::new(io::stdout()));
    let foo = Arc::new(Printer {
        name: "Foo",
        json: cli.json,
        out: Arc::clone(&out),
    });
    let boo = Arc::new(Printer {
        name: "Boo",
        json: cli.json,
        out: Arc::clone(&out),
    });
    store.subscribe(&foo);
    store.subscribe(&boo);

    for event in events {
        store
            .accept(event)
            .context("observer failed while applying event")?;
    }

    let final_state = render(&store.state(), cli.json)?;
    writeln!(out.lock(), "state: {}", final_state)?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
