//! Fluent builder for constructing a [`Sim`].

use am_carrier::Fleet;
use am_core::{CarrierId, IdGenerator, SimConfig};
use am_pool::AllocationEngine;

use crate::{DELAY_PENALTY, DeliveryLog, ItemSource, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<S>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — fleet size, building, capacity, tick ceiling
/// - `S: ItemSource` — where mail comes from
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                          |
/// |-------------------------|----------------------------------|
/// | `.carrier_ids(g)`       | `IdGenerator::new()` (from `R0`) |
/// | `.delay_penalty(p)`     | [`DELAY_PENALTY`]                |
pub struct SimBuilder<S: ItemSource> {
    config:      SimConfig,
    source:      S,
    carrier_ids: Option<IdGenerator<CarrierId>>,
    penalty:     f64,
}

impl<S: ItemSource> SimBuilder<S> {
    pub fn new(config: SimConfig, source: S) -> Self {
        Self {
            config,
            source,
            carrier_ids: None,
            penalty: DELAY_PENALTY,
        }
    }

    /// Supply the generator carrier ids are drawn from.
    pub fn carrier_ids(mut self, ids: IdGenerator<CarrierId>) -> Self {
        self.carrier_ids = Some(ids);
        self
    }

    /// Exponent applied to delivery delay when scoring.
    pub fn delay_penalty(mut self, penalty: f64) -> Self {
        self.penalty = penalty;
        self
    }

    /// Validate the configuration, create the fleet and engine, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<S>> {
        let config = self.config;

        if config.carriers == 0 {
            return Err(SimError::Config("fleet needs at least one carrier".into()));
        }
        if config.building.floors < config.building.mailroom_floor {
            return Err(SimError::Config(format!(
                "top floor {} is below the mailroom floor {}",
                config.building.floors, config.building.mailroom_floor
            )));
        }
        if !config.capacity.is_ordered() {
            return Err(SimError::Config(format!(
                "weight bands must increase: solo {} / pair {} / triple {}",
                config.capacity.solo_max, config.capacity.pair_max, config.capacity.triple_max
            )));
        }
        if !self.penalty.is_finite() || self.penalty < 0.0 {
            return Err(SimError::Config(format!("invalid delay penalty {}", self.penalty)));
        }

        let mut ids = self.carrier_ids.unwrap_or_default();
        let fleet = Fleet::new(config.carriers, &config.building, config.capacity, &mut ids);
        let pool = AllocationEngine::new(config.capacity);

        Ok(Sim::new(config, fleet, pool, self.source, DeliveryLog::new(self.penalty)))
    }
}
