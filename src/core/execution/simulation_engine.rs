use super::belt::{Belt, BeltView, SymbolCounts, TickOutcome, WorkSummary};
use super::config::BeltConfig;
use crate::core::state::SimulationError;
use crate::core::types::Symbol;
use log::info;
use rand::rngs::StdRng;
use serde::Serialize;

/// Observer trait for belt ticks
pub trait TickObserver {
    /// Called after every tick with the belt state at the end of that tick
    fn on_tick(&mut self, view: &BeltView<'_>, outcome: &TickOutcome);
}

/// Final figures of a simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    pub config: BeltConfig,
    /// Ejected symbols that were finished or never picked up
    pub produced: SymbolCounts,
    /// Ticks in which at least one worker changed something
    pub changes: u64,
    /// Symbols still on the belt, by the same rule as `produced`
    pub in_progress: SymbolCounts,
    /// Raw components no worker touched, ejected or still on the belt
    pub untouched: SymbolCounts,
}

impl SimulationReport {
    /// Finished products that left the belt
    pub fn finished(&self) -> u64 {
        self.produced.get(&Symbol::Finished).copied().unwrap_or(0)
    }
}

/// Drives a belt built from a [`BeltConfig`] and notifies observers
pub struct SimulationEngine {
    config: BeltConfig,
    belt: Belt<StdRng>,
    observers: Vec<Box<dyn TickObserver>>,
}

impl SimulationEngine {
    /// Validate the configuration, build the belt and pre-fill it if asked to
    pub fn new(config: BeltConfig) -> Result<Self, SimulationError> {
        let mut belt = Belt::from_config(&config)?;
        if config.pre_fill {
            belt.pre_fill();
        }
        Ok(Self {
            config,
            belt,
            observers: Vec::new(),
        })
    }

    /// Add an observer to the simulation
    pub fn add_observer(&mut self, observer: Box<dyn TickObserver>) {
        self.observers.push(observer);
    }

    pub fn config(&self) -> &BeltConfig {
        &self.config
    }

    pub fn belt(&self) -> &Belt<StdRng> {
        &self.belt
    }

    /// Run the configured number of ticks and report the result
    pub fn run(&mut self) -> Result<SimulationReport, SimulationError> {
        info!(
            "Running belt of size {} for {} ticks (pre-fill: {}, seed: {:?})",
            self.config.size, self.config.ticks, self.config.pre_fill, self.config.seed
        );

        let mut summary = WorkSummary::new();
        for _ in 0..self.config.ticks {
            let outcome = self.belt.tick()?;
            summary.record(&outcome);
            self.notify_tick(&outcome);
        }

        let in_progress = self.belt.get_in_progress();
        let untouched = Symbol::COMPONENTS
            .iter()
            .map(|symbol| {
                let ejected = summary.counts.get(symbol).copied().unwrap_or(0);
                let resident = in_progress.get(symbol).copied().unwrap_or(0);
                (*symbol, ejected + resident)
            })
            .collect();

        let report = SimulationReport {
            config: self.config.clone(),
            produced: summary.counts,
            changes: summary.changes,
            in_progress,
            untouched,
        };
        info!(
            "Finished {} ticks: {} products, {} belt changes",
            self.config.ticks,
            report.finished(),
            report.changes
        );
        Ok(report)
    }

    fn notify_tick(&mut self, outcome: &TickOutcome) {
        let view = self.belt.view();
        for observer in &mut self.observers {
            observer.on_tick(&view, outcome);
        }
    }
}
