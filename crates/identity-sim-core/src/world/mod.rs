use crate::agent::{self, Agent};
use crate::arbitration::arbitrate;
use crate::config::{SimConfig, SimConfigError};
use crate::field::Field;
use crate::metrics::{AgentEnergy, FrontCount, RunSummary, TickObservation};
use crate::stimulus::{RandomStimulus, StimulusSource};
use thiserror::Error;

/// Lifecycle of a simulation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running { tick: u64 },
    Completed { ticks: u64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldInitError {
    #[error(transparent)]
    Config(#[from] SimConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("ticks must be non-negative (got {ticks})")]
    NegativeTicks { ticks: i64 },
    #[error("ticks ({actual}) exceed supported maximum ({max})")]
    TooManyTicks { max: i64, actual: i64 },
    #[error("simulation already completed after {ticks} ticks")]
    AlreadyCompleted { ticks: u64 },
}

/// Simulation context: owns the population and every per-run resource.
///
/// Each stage of a tick borrows the population in turn; nothing outside the
/// world holds on to it between ticks.
pub struct World<S: StimulusSource = RandomStimulus> {
    agents: Vec<Agent>,
    config: SimConfig,
    field: Field,
    source: S,
    state: RunState,
    front_counts: Vec<usize>,
    winners: Vec<Option<usize>>,
}

impl World<RandomStimulus> {
    /// Build a world whose stimuli come from a generator seeded with `config.seed`.
    pub fn new(config: SimConfig) -> Result<Self, WorldInitError> {
        let source = RandomStimulus::from_seed(config.seed);
        Self::with_source(config, source)
    }
}

impl<S: StimulusSource> World<S> {
    pub fn with_source(config: SimConfig, source: S) -> Result<Self, WorldInitError> {
        config.validate()?;
        let agents = config.build_population();
        let field = Field::new(config.field_intensity);
        let front_counts = vec![0; agents.len()];
        Ok(Self {
            agents,
            config,
            field,
            source,
            state: RunState::NotStarted,
            front_counts,
            winners: Vec::new(),
        })
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn agent(&self, name: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.name() == name)
    }

    /// Run the tick count from the config.
    pub fn run_configured(&mut self) -> Result<RunSummary, RunError> {
        self.run(self.config.ticks)
    }

    pub fn run_configured_with<F>(&mut self, observer: F) -> Result<RunSummary, RunError>
    where
        F: FnMut(&TickObservation),
    {
        self.run_with(self.config.ticks, observer)
    }

    pub fn run(&mut self, ticks: i64) -> Result<RunSummary, RunError> {
        self.run_with(ticks, |_| {})
    }

    /// Execute exactly `ticks` ticks, handing each observation to `observer`.
    ///
    /// The observer is a sink only; it cannot affect the run.
    pub fn run_with<F>(&mut self, ticks: i64, mut observer: F) -> Result<RunSummary, RunError>
    where
        F: FnMut(&TickObservation),
    {
        if let RunState::Completed { ticks } = self.state {
            return Err(RunError::AlreadyCompleted { ticks });
        }
        if ticks < 0 {
            return Err(RunError::NegativeTicks { ticks });
        }
        if ticks > SimConfig::MAX_TICKS {
            return Err(RunError::TooManyTicks {
                max: SimConfig::MAX_TICKS,
                actual: ticks,
            });
        }
        let ticks = ticks as u64;
        tracing::info!(
            ticks,
            agents = self.agents.len(),
            seed = self.config.seed,
            "starting simulation"
        );

        self.winners.reserve(ticks as usize);
        for tick in 0..ticks {
            self.state = RunState::Running { tick };
            let observation = self.step(tick);
            observer(&observation);
        }
        self.state = RunState::Completed { ticks };

        let summary = self.summary(ticks);
        tracing::info!(
            ticks,
            idle_ticks = summary.idle_ticks,
            "simulation completed"
        );
        Ok(summary)
    }

    /// One full tick: stimulus, field, intake, arbitration, front, decay, observe.
    fn step(&mut self, tick: u64) -> TickObservation {
        let stimulus = self.source.next_stimulus();

        self.field.modulate(&mut self.agents, self.config.kernel_boost);

        let config = &self.config;
        let candidates: Vec<usize> = self
            .agents
            .iter_mut()
            .enumerate()
            .filter_map(|(idx, a)| {
                a.receive_stimulus(
                    &stimulus,
                    &config.sensitivity,
                    config.default_sensitivity,
                    config.front_threshold,
                )
                .then_some(idx)
            })
            .collect();
        tracing::debug!(
            tick,
            kind = %stimulus.kind,
            intensity = stimulus.intensity,
            candidates = candidates.len(),
            "stimulus processed"
        );

        let front = arbitrate(&self.agents, &candidates)
            .map(|winner| agent::front(&mut self.agents, winner, self.config.inhibition_rate));
        if let Some(event) = &front {
            self.front_counts[event.index] += 1;
        }
        self.winners.push(front.as_ref().map(|e| e.index));

        agent::decay(&mut self.agents, self.config.energy_decay);

        TickObservation::capture(tick, stimulus, candidates.len(), front, &self.agents)
    }

    fn summary(&self, ticks: u64) -> RunSummary {
        let idle_ticks = self.winners.iter().filter(|w| w.is_none()).count() as u64;
        RunSummary {
            schema_version: 1,
            ticks,
            seed: self.config.seed,
            idle_ticks,
            front_counts: self
                .agents
                .iter()
                .zip(&self.front_counts)
                .map(|(a, &count)| FrontCount {
                    name: a.name().to_owned(),
                    count,
                })
                .collect(),
            winners: self
                .winners
                .iter()
                .map(|w| w.map(|idx| self.agents[idx].name().to_owned()))
                .collect(),
            final_energies: self
                .agents
                .iter()
                .map(|a| AgentEnergy {
                    name: a.name().to_owned(),
                    energy: a.energy,
                })
                .collect(),
        }
    }
}
