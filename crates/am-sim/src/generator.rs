//! Random mail generation.
//!
//! Draws a complete arrival schedule up front from a [`SimRng`], so a run is
//! fully determined by its seed.  Destinations never include the mailroom
//! floor itself.

use am_core::{Building, IdGenerator, ItemId, MailItem, SimRng, Tick};

use crate::{ScheduledArrivals, SimError, SimResult};

/// Parameters of the random mail stream.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    /// Number of items to create.
    pub mail_count: usize,

    /// Items arrive uniformly over `0..=last_arrival`.
    pub last_arrival: u64,

    /// Inclusive weight range in grams.
    pub min_weight: u32,
    pub max_weight: u32,

    /// Probability that an item is priority mail.
    pub priority_chance: f64,

    /// Levels a priority item draws from, uniformly.
    pub priority_levels: Vec<u32>,
}

impl GeneratorConfig {
    pub fn validate(&self, building: &Building) -> SimResult<()> {
        if self.min_weight == 0 || self.min_weight > self.max_weight {
            return Err(SimError::Config(format!(
                "weight range {}..={} is empty or starts at zero",
                self.min_weight, self.max_weight
            )));
        }
        if building.floors <= building.mailroom_floor {
            return Err(SimError::Config(format!(
                "building has no floors above the mailroom (floor {})",
                building.mailroom_floor
            )));
        }
        if self.priority_chance > 0.0 && self.priority_levels.is_empty() {
            return Err(SimError::Config(
                "priority_chance is set but priority_levels is empty".into(),
            ));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            mail_count:      80,
            last_arrival:    100,
            min_weight:      200,
            max_weight:      3_000,
            priority_chance: 0.1,
            priority_levels: vec![10, 100],
        }
    }
}

/// Draw `config.mail_count` items with sequential ids starting at `M0`.
pub fn generate_mail(
    config:   &GeneratorConfig,
    building: &Building,
    rng:      &mut SimRng,
) -> SimResult<ScheduledArrivals> {
    config.validate(building)?;

    let mut ids = IdGenerator::<ItemId>::new();
    let mut schedule = ScheduledArrivals::new();

    for _ in 0..config.mail_count {
        let arrival = Tick(rng.gen_range(0..=config.last_arrival));
        let destination = rng.gen_range(building.mailroom_floor + 1..=building.floors);
        let weight = rng.gen_range(config.min_weight..=config.max_weight);
        let mut item = MailItem::new(ids.next_id(), destination, arrival, weight);

        if rng.gen_bool(config.priority_chance) {
            let pick = rng.gen_range(0..config.priority_levels.len());
            item = item.with_priority(config.priority_levels[pick]);
        }
        schedule.push(item);
    }

    Ok(schedule)
}
