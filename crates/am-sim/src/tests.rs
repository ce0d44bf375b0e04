//! Unit and integration tests for am-sim.

use std::io::Cursor;

use am_carrier::Transition;
use am_core::{Building, Capacity, CarrierId, IdGenerator, ItemId, MailError, MailItem, SimConfig, SimRng, Tick};
use am_pool::AllocationEngine;

use crate::{
    DeliveryRecord, GeneratorConfig, ItemSource, NoopObserver, ScheduledArrivals, SimBuilder,
    SimError, SimObserver, SimSummary, TracingObserver, generate_mail, load_arrivals_reader,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(carriers: usize, total_ticks: u64) -> SimConfig {
    SimConfig {
        total_ticks,
        seed:     42,
        carriers,
        building: Building::new(10, 1),
        capacity: Capacity::default(),
    }
}

fn item(id: u32, arrival: u64, dest: u32, weight: u32) -> MailItem {
    MailItem::new(ItemId(id), dest, Tick(arrival), weight)
}

fn schedule(items: Vec<MailItem>) -> ScheduledArrivals {
    ScheduledArrivals::from_items(items)
}

/// Observer that counts every callback.
#[derive(Default)]
struct Counter {
    tick_starts: usize,
    tick_ends:   usize,
    arrivals:    usize,
    transitions: Vec<Transition>,
    deliveries:  Vec<DeliveryRecord>,
    ends:        usize,
}

impl SimObserver for Counter {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.tick_starts += 1;
    }
    fn on_arrival(&mut self, _item: &MailItem) {
        self.arrivals += 1;
    }
    fn on_transition(&mut self, transition: &Transition) {
        self.transitions.push(*transition);
    }
    fn on_delivery(&mut self, record: &DeliveryRecord) {
        self.deliveries.push(*record);
    }
    fn on_tick_end(&mut self, _tick: Tick, _pool: &AllocationEngine) {
        self.tick_ends += 1;
    }
    fn on_sim_end(&mut self, _summary: &SimSummary) {
        self.ends += 1;
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = SimBuilder::new(test_config(3, 10), ScheduledArrivals::new())
            .build()
            .unwrap();
        assert_eq!(sim.fleet.len(), 3);
        assert!(sim.pool.idle().is_empty());
        assert_eq!(sim.clock.now(), Tick(0));
    }

    #[test]
    fn zero_carriers_errors() {
        let result = SimBuilder::new(test_config(0, 10), ScheduledArrivals::new()).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn unordered_bands_error() {
        let mut config = test_config(2, 10);
        config.capacity = Capacity { solo_max: 2_000, pair_max: 2_000, triple_max: 3_000 };
        let result = SimBuilder::new(config, ScheduledArrivals::new()).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn mailroom_above_top_floor_errors() {
        let mut config = test_config(2, 10);
        config.building = Building::new(3, 5);
        let result = SimBuilder::new(config, ScheduledArrivals::new()).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn negative_penalty_errors() {
        let result = SimBuilder::new(test_config(1, 10), ScheduledArrivals::new())
            .delay_penalty(-1.0)
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn carrier_ids_come_from_supplied_generator() {
        let sim = SimBuilder::new(test_config(2, 10), ScheduledArrivals::new())
            .carrier_ids(IdGenerator::starting_at(5))
            .build()
            .unwrap();
        let ids: Vec<CarrierId> = sim.fleet.ids().collect();
        assert_eq!(ids, vec![CarrierId(5), CarrierId(6)]);
    }
}

// ── Running ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn single_light_item_timeline() {
        let mail = schedule(vec![item(0, 0, 5, 1_500)]);
        let mut sim = SimBuilder::new(test_config(1, 100), mail).build().unwrap();

        let summary = sim.run(&mut NoopObserver).unwrap();

        // T0 register, T1 dispatch, T2–T5 climb, T6 hand over.
        let records = sim.deliveries.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tick, Tick(6));
        assert_eq!(records[0].delay(), 6);
        assert!(summary.completed);
        assert_eq!(summary.final_tick, Tick(7));
        assert_eq!(summary.delivered, 1);
        let expected = 6f64.powf(1.2) * 2.0;
        assert!((summary.score - expected).abs() < 1e-9);
    }

    #[test]
    fn pair_item_is_reported_once() {
        let mail = schedule(vec![item(0, 0, 3, 2_400)]);
        let mut sim = SimBuilder::new(test_config(2, 100), mail).build().unwrap();
        let mut counter = Counter::default();

        let summary = sim.run(&mut counter).unwrap();

        assert!(summary.completed);
        assert_eq!(counter.deliveries.len(), 1);
        let departures = counter
            .transitions
            .iter()
            .filter(|t| t.is_state_change() && t.started_route())
            .count();
        assert_eq!(departures, 2);
    }

    #[test]
    fn empty_source_finishes_immediately() {
        let mut sim = SimBuilder::new(test_config(2, 100), ScheduledArrivals::new())
            .build()
            .unwrap();
        let summary = sim.run(&mut NoopObserver).unwrap();
        assert!(summary.completed);
        assert_eq!(summary.final_tick, Tick(0));
        assert_eq!(summary.mean_delay, 0.0);
    }

    #[test]
    fn too_heavy_item_aborts_the_run() {
        let mail = schedule(vec![item(0, 0, 5, 3_500)]);
        let mut sim = SimBuilder::new(test_config(3, 100), mail).build().unwrap();
        let err = sim.run(&mut NoopObserver).unwrap_err();
        assert!(matches!(
            err,
            SimError::Mail(MailError::ItemTooHeavy { item: ItemId(0), weight: 3_500, .. })
        ));
        assert_eq!(sim.pool.pending(), 1);
    }

    #[test]
    fn stops_at_tick_ceiling() {
        let mail = schedule(vec![item(0, 0, 10, 100)]);
        let mut sim = SimBuilder::new(test_config(1, 3), mail).build().unwrap();
        let summary = sim.run(&mut NoopObserver).unwrap();
        assert!(!summary.completed);
        assert_eq!(summary.final_tick, Tick(3));
        assert_eq!(summary.delivered, 0);
        assert!(summary.to_string().ends_with("(incomplete)"));
        assert!(summary.score.is_sign_positive());
        assert!(summary.to_string().contains("score 0.00,"), "{summary}");
    }

    #[test]
    fn triple_item_with_two_carriers_never_leaves() {
        let mail = schedule(vec![item(0, 0, 5, 2_900)]);
        let mut sim = SimBuilder::new(test_config(2, 200), mail).build().unwrap();

        let summary = sim.run(&mut TracingObserver).unwrap();

        assert!(!summary.completed);
        assert_eq!(summary.final_tick, Tick(200));
        assert_eq!(summary.delivered, 0);
        let coalition = sim.pool.coalition().unwrap();
        assert_eq!(coalition.len(), 2);
        assert!(coalition.is_stranded(sim.fleet.len()));
    }

    #[test]
    fn run_ticks_advances_clock() {
        let mut sim = SimBuilder::new(test_config(1, 100), ScheduledArrivals::new())
            .build()
            .unwrap();
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock.now(), Tick(5));
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock.now(), Tick(8));
    }

    #[test]
    fn observer_sees_every_phase() {
        let mail = schedule(vec![item(0, 0, 2, 500), item(1, 2, 4, 700)]);
        let mut sim = SimBuilder::new(test_config(1, 100), mail).build().unwrap();
        let mut counter = Counter::default();

        let summary = sim.run(&mut counter).unwrap();

        assert_eq!(counter.tick_starts, counter.tick_ends);
        assert_eq!(counter.tick_starts as u64, summary.final_tick.0);
        assert_eq!(counter.arrivals, 2);
        assert_eq!(counter.deliveries.len(), 2);
        assert_eq!(counter.ends, 1);
        // First thing every carrier does is register.
        assert_eq!(counter.transitions[0].tick, Tick(0));
    }

    #[test]
    fn priority_item_preempts_waiting_coalition() {
        // R0 takes the solo item to the top floor while R1 holds the pair
        // item alone.  The priority item arriving meanwhile is at the head
        // when R0 returns, so the half-formed coalition is broken up.
        let mail = schedule(vec![
            item(0, 0, 10, 500),
            item(1, 0, 5, 2_400),
            item(2, 3, 2, 400).with_priority(10),
        ]);
        let mut sim = SimBuilder::new(test_config(2, 500), mail).build().unwrap();
        let mut counter = Counter::default();

        let summary = sim.run(&mut counter).unwrap();

        assert!(summary.completed);
        let order: Vec<ItemId> = counter.deliveries.iter().map(|r| r.item.id).collect();
        assert_eq!(order, vec![ItemId(0), ItemId(2), ItemId(1)]);
        assert_eq!(sim.pool.pending(), 0);
        assert!(sim.pool.coalition().is_none());
    }

    #[test]
    fn generated_mail_is_all_delivered() {
        let config = SimConfig { building: Building::default(), ..test_config(3, 10_000) };
        let mut rng = SimRng::new(config.seed);
        let mail = generate_mail(&GeneratorConfig::default(), &config.building, &mut rng).unwrap();
        let expected = mail.len();
        let mut sim = SimBuilder::new(config, mail).build().unwrap();

        let summary = sim.run(&mut TracingObserver).unwrap();

        assert!(summary.completed);
        assert_eq!(summary.arrived, expected);
        assert_eq!(summary.delivered, expected);
        let mut ids: Vec<u32> = sim.deliveries.records().iter().map(|r| r.item.id.0).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), expected);
        assert_eq!(sim.pool.pending(), 0);
    }

    #[test]
    fn same_seed_same_summary() {
        let run = || {
            let config = SimConfig { building: Building::default(), ..test_config(3, 10_000) };
            let mut rng = SimRng::new(7);
            let mail = generate_mail(&GeneratorConfig::default(), &config.building, &mut rng).unwrap();
            SimBuilder::new(config, mail).build().unwrap().run(&mut NoopObserver).unwrap()
        };
        assert_eq!(run(), run());
    }
}

// ── Item sources ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod source_tests {
    use super::*;

    #[test]
    fn arrivals_drain_due_ticks_only() {
        let mut s = schedule(vec![item(0, 0, 2, 1), item(1, 2, 2, 1), item(2, 2, 3, 1), item(3, 5, 2, 1)]);
        assert_eq!(s.len(), 4);
        assert_eq!(s.arrivals(Tick(0)).len(), 1);
        assert!(s.arrivals(Tick(1)).is_empty());
        let due: Vec<ItemId> = s.arrivals(Tick(3)).iter().map(|i| i.id).collect();
        assert_eq!(due, vec![ItemId(1), ItemId(2)]);
        assert_eq!(s.next_tick(), Some(Tick(5)));
        assert!(!s.is_exhausted());
        assert_eq!(s.arrivals(Tick(9)).len(), 1);
        assert!(s.is_exhausted());
        assert!(s.is_empty());
    }
}

#[cfg(test)]
mod generator_tests {
    use super::*;

    #[test]
    fn respects_ranges() {
        let config = GeneratorConfig {
            mail_count:   200,
            last_arrival: 50,
            min_weight:   100,
            max_weight:   2_600,
            ..GeneratorConfig::default()
        };
        let building = Building::new(8, 1);
        let mail = generate_mail(&config, &building, &mut SimRng::new(3)).unwrap();
        assert_eq!(mail.len(), 200);
        for item in mail.iter() {
            assert!((2..=8).contains(&item.destination), "{item}");
            assert!((100..=2_600).contains(&item.weight), "{item}");
            assert!(item.arrival <= Tick(50), "{item}");
            assert!(item.priority == 1 || item.priority == 10 || item.priority == 100);
        }
    }

    #[test]
    fn ids_are_unique_and_sequential() {
        let mail = generate_mail(&GeneratorConfig::default(), &Building::default(), &mut SimRng::new(1)).unwrap();
        let mut ids: Vec<u32> = mail.iter().map(|i| i.id.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..80).collect::<Vec<_>>());
    }

    #[test]
    fn deterministic_per_seed() {
        let a = generate_mail(&GeneratorConfig::default(), &Building::default(), &mut SimRng::new(9)).unwrap();
        let b = generate_mail(&GeneratorConfig::default(), &Building::default(), &mut SimRng::new(9)).unwrap();
        let xs: Vec<&MailItem> = a.iter().collect();
        let ys: Vec<&MailItem> = b.iter().collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn always_priority_when_chance_is_one() {
        let config = GeneratorConfig { priority_chance: 1.0, priority_levels: vec![7], ..GeneratorConfig::default() };
        let mail = generate_mail(&config, &Building::default(), &mut SimRng::new(2)).unwrap();
        assert!(mail.iter().all(|i| i.priority == 7));
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let building = Building::default();
        let inverted = GeneratorConfig { min_weight: 500, max_weight: 100, ..GeneratorConfig::default() };
        assert!(matches!(inverted.validate(&building), Err(SimError::Config(_))));

        let no_levels = GeneratorConfig { priority_levels: vec![], ..GeneratorConfig::default() };
        assert!(matches!(no_levels.validate(&building), Err(SimError::Config(_))));

        let flat = Building::new(1, 1);
        assert!(matches!(GeneratorConfig::default().validate(&flat), Err(SimError::Config(_))));
    }
}

#[cfg(test)]
mod loader_tests {
    use super::*;

    const CSV: &str = "\
arrival_tick,weight,destination,priority\n\
0,1500,5,\n\
0,2400,5,\n\
3,2800,7,5\n\
";

    #[test]
    fn parses_rows_in_order() {
        let mail = load_arrivals_reader(Cursor::new(CSV), &Building::new(10, 1)).unwrap();
        let items: Vec<&MailItem> = mail.iter().collect();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, ItemId(0));
        assert_eq!(items[0].priority, 1);
        assert_eq!(items[1].weight, 2_400);
        assert_eq!(items[2].id, ItemId(2));
        assert_eq!(items[2].arrival, Tick(3));
        assert_eq!(items[2].priority, 5);
    }

    #[test]
    fn destination_outside_building_errors() {
        let csv = "arrival_tick,weight,destination,priority\n0,100,12,\n";
        let err = load_arrivals_reader(Cursor::new(csv), &Building::new(10, 1)).unwrap_err();
        match err {
            SimError::Parse(msg) => assert!(msg.contains("line 2"), "{msg}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn zero_weight_errors() {
        let csv = "arrival_tick,weight,destination,priority\n0,0,3,\n";
        assert!(matches!(
            load_arrivals_reader(Cursor::new(csv), &Building::new(10, 1)),
            Err(SimError::Parse(_))
        ));
    }

    #[test]
    fn malformed_row_errors() {
        let csv = "arrival_tick,weight,destination,priority\nsoon,100,3,\n";
        assert!(matches!(
            load_arrivals_reader(Cursor::new(csv), &Building::new(10, 1)),
            Err(SimError::Parse(_))
        ));
    }
}

#[cfg(test)]
mod delivery_tests {
    use crate::{DELAY_PENALTY, DeliveryLog};
    use am_carrier::DeliverySink;

    use super::*;

    #[test]
    fn records_are_stamped_with_current_tick() {
        let mut log = DeliveryLog::default();
        log.set_tick(Tick(4));
        log.deliver(item(0, 1, 3, 100));
        log.set_tick(Tick(9));
        log.deliver(item(1, 1, 3, 100).with_priority(100));

        assert_eq!(log.records()[0].tick, Tick(4));
        assert_eq!(log.records()[1].delay(), 8);
        assert!((log.mean_delay() - 5.5).abs() < 1e-9);

        let expected = 3f64.powf(DELAY_PENALTY) * 2.0 + 8f64.powf(DELAY_PENALTY) * 11.0;
        assert!((log.total_score() - expected).abs() < 1e-9);
    }

    #[test]
    fn empty_log_scores_zero() {
        let log = DeliveryLog::default();
        assert!(log.is_empty());
        assert_eq!(log.total_score(), 0.0);
        assert!(log.total_score().is_sign_positive());
        assert_eq!(log.mean_delay(), 0.0);
    }
}
