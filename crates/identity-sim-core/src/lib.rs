pub mod agent;
pub mod arbitration;
pub mod config;
pub mod constants;
pub mod field;
pub mod metrics;
pub mod rng;
pub mod role;
pub mod sensitivity;
pub mod stimulus;
pub mod world;

pub use config::{AgentSpec, SimConfig, SimConfigError};
pub use metrics::{AgentEnergy, FrontCount, FrontEvent, RunSummary, TickObservation};
pub use stimulus::{RandomStimulus, ScriptedStimulus, Stimulus, StimulusKind, StimulusSource};
pub use world::{RunError, RunState, World, WorldInitError};
