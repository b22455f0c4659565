//! Conveyor belt simulation runner.
//!
//! Builds a belt from command-line options, optionally pretty-prints the belt
//! and its workers after every tick, and prints the production summary.

use beltsim::core::execution::config::{DEFAULT_SIZE, DEFAULT_TICKS};
use beltsim::{BeltConfig, BeltView, SimulationEngine, Symbol, TickObserver, TickOutcome, Worker};
use clap::Parser;

const DEFAULT_OFFSET: usize = 4;

#[derive(Parser)]
#[command(
    name = "belt_simulation",
    about = "Simulation of a conveyor belt that assembles components into finished products",
    version
)]
struct Cli {
    /// Pretty-print the belt and the workers at each tick
    #[arg(short, long)]
    print: bool,

    /// Number of spaces to insert before each line when pretty-printing
    #[arg(short, long, default_value_t = DEFAULT_OFFSET)]
    offset: usize,

    /// Number of ticks to run the simulation for
    #[arg(short, long, default_value_t = DEFAULT_TICKS)]
    number: u64,

    /// Size of the conveyor belt
    #[arg(short, long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Fix the random seed for reproducibility
    #[arg(short, long)]
    rand: Option<u64>,

    /// Fill the belt with random components before the first tick
    #[arg(short, long)]
    fill: bool,

    /// Log at INFO level
    #[arg(short, long)]
    verbose: bool,

    /// Log at DEBUG level
    #[arg(short, long)]
    debug: bool,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

/// Renders the belt as three rows: up workers, slots, down workers
struct BeltPrinter {
    offset: usize,
}

impl BeltPrinter {
    fn cell(worker: &Worker) -> String {
        worker.to_string()
    }

    fn slot(symbol: Symbol, touched: bool) -> String {
        format!("[{}{}]", symbol, if touched { '*' } else { ' ' })
    }
}

impl TickObserver for BeltPrinter {
    fn on_tick(&mut self, view: &BeltView<'_>, outcome: &TickOutcome) {
        let width = view
            .pairs
            .iter()
            .flat_map(|pair| [Self::cell(pair.up()), Self::cell(pair.down())])
            .map(|cell| cell.len())
            .max()
            .unwrap_or(0)
            .max(4);
        let pad = " ".repeat(self.offset);

        let ups: Vec<String> = view
            .pairs
            .iter()
            .map(|pair| format!("{:<width$}", Self::cell(pair.up()), width = width))
            .collect();
        let slots: Vec<String> = view
            .slots
            .iter()
            .zip(view.touched)
            .map(|(symbol, touched)| {
                format!("{:<width$}", Self::slot(*symbol, *touched), width = width)
            })
            .collect();
        let downs: Vec<String> = view
            .pairs
            .iter()
            .map(|pair| format!("{:<width$}", Self::cell(pair.down()), width = width))
            .collect();

        println!(
            "Tick {} (in: '{}', out: '{}'{}, changed: {})",
            view.tick,
            outcome.injected,
            outcome.ejected,
            if outcome.ejected_touched { " touched" } else { "" },
            outcome.changed
        );
        println!("{}{}", pad, ups.join(" "));
        println!("{}{}", pad, slots.join(" "));
        println!("{}{}", pad, downs.join(" "));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = BeltConfig::new()
        .with_size(cli.size)
        .with_ticks(cli.number)
        .with_pre_fill(cli.fill);
    if let Some(seed) = cli.rand {
        config = config.with_seed(seed);
    }

    if !cli.json {
        println!("Running the simulation with the following parameters:");
        println!("  Number of iterations            : {}", config.ticks);
        println!("  Size of the conveyor belt       : {}", config.size);
        println!("  Pretty-print the belt           : {}", cli.print);
        println!("  Offset for pretty-printing      : {}", cli.offset);
        println!("  Fill the belt initially         : {}", config.pre_fill);
        println!(
            "  Random seed                     : {}",
            config
                .seed
                .map(|seed| seed.to_string())
                .unwrap_or_else(|| "generated by the system".to_string())
        );
    }

    let mut engine = SimulationEngine::new(config)?;
    if cli.print {
        engine.add_observer(Box::new(BeltPrinter { offset: cli.offset }));
    }
    let report = engine.run()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "\nNumber of finished products generated in {} ticks: {}",
        report.config.ticks,
        report.finished()
    );
    for (symbol, count) in &report.untouched {
        println!(
            "Number of '{}' components untouched by any worker (generated or still on the belt): {}",
            symbol, count
        );
    }
    println!(
        "Number of conveyor belt changes in {} ticks: {}",
        report.config.ticks, report.changes
    );
    println!("Done.");
    Ok(())
}
