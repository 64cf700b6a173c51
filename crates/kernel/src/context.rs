//! One-shot engine bootstrap.
//!
//! [`EngineContext`] has no public constructor other than
//! [`EngineContext::bootstrap`]; holding one proves the registry, random
//! source and animation clock are ready.

use crate::clock::AnimationClock;
use crate::config::EngineConfig;
use crate::registry::{ConstructionRegistry, RegistryError};
use crate::rng::SimRng;
use lincity_common::SimulationSpeed;

/// A subsystem brought up during bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupStep {
    ConstructionRegistry,
    RandomSource,
    AnimationClock,
}

/// Startup failures. None of these are recoverable.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("failed to populate construction registry: {0}")]
    Registry(#[from] RegistryError),
    #[error("failed to seed random source from the system clock: {0}")]
    Clock(#[from] std::time::SystemTimeError),
}

/// Process-wide simulation state established at startup.
#[derive(Debug)]
pub struct EngineContext {
    registry: ConstructionRegistry,
    rng: SimRng,
    clock: AnimationClock,
    speed: SimulationSpeed,
    steps: Vec<StartupStep>,
}

impl EngineContext {
    /// Bootstrap with default settings.
    pub fn bootstrap() -> Result<Self, BootstrapError> {
        Self::bootstrap_with(&EngineConfig::default())
    }

    /// Bring up the subsystems in order: registry, random source, clock.
    pub fn bootstrap_with(config: &EngineConfig) -> Result<Self, BootstrapError> {
        let mut steps = Vec::with_capacity(3);

        // Loaded worlds name construction types by id, so this comes first.
        let registry = ConstructionRegistry::builtin()?;
        steps.push(StartupStep::ConstructionRegistry);
        tracing::debug!(types = registry.len(), "construction registry populated");

        let rng = match config.seed {
            Some(seed) => SimRng::with_seed(seed),
            None => SimRng::from_wall_clock()?,
        };
        steps.push(StartupStep::RandomSource);
        tracing::debug!(seed = rng.seed(), "random source seeded");

        let mut clock = AnimationClock::new();
        clock.reset_start_time();
        steps.push(StartupStep::AnimationClock);
        tracing::debug!("animation clock reset");

        Ok(Self {
            registry,
            rng,
            clock,
            speed: config.speed,
            steps,
        })
    }

    pub fn registry(&self) -> &ConstructionRegistry {
        &self.registry
    }

    pub fn rng(&self) -> &SimRng {
        &self.rng
    }

    pub fn rng_mut(&mut self) -> &mut SimRng {
        &mut self.rng
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn simulation_speed(&self) -> SimulationSpeed {
        self.speed
    }

    pub fn set_simulation_speed(&mut self, speed: SimulationSpeed) {
        self.speed = speed;
    }

    /// Subsystems in the order bootstrap brought them up.
    pub fn startup_steps(&self) -> &[StartupStep] {
        &self.steps
    }
}
