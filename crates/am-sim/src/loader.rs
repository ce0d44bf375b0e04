//! CSV arrivals loader.
//!
//! # CSV format
//!
//! One row per item.  Ids are assigned in row order starting at `M0`.
//! `priority` may be left empty for regular mail.
//!
//! ```csv
//! arrival_tick,weight,destination,priority
//! 0,1500,5,
//! 0,2400,5,
//! 3,2800,7,5
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use am_core::{Building, IdGenerator, ItemId, MailItem, Tick};

use crate::{ScheduledArrivals, SimError, SimResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ArrivalRecord {
    arrival_tick: u64,
    weight:       u32,
    destination:  u32,
    priority:     Option<u32>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load an arrival schedule from a CSV file, checking every destination
/// against `building`.
pub fn load_arrivals_csv(path: &Path, building: &Building) -> SimResult<ScheduledArrivals> {
    let file = std::fs::File::open(path).map_err(SimError::Io)?;
    load_arrivals_reader(file, building)
}

/// Like [`load_arrivals_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for schedules embedded
/// in a binary.
pub fn load_arrivals_reader<R: Read>(reader: R, building: &Building) -> SimResult<ScheduledArrivals> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut ids = IdGenerator::<ItemId>::new();
    let mut schedule = ScheduledArrivals::new();

    for (row, result) in csv_reader.deserialize::<ArrivalRecord>().enumerate() {
        let record = result.map_err(|e| SimError::Parse(e.to_string()))?;
        let line = row + 2; // header is line 1

        if record.weight == 0 {
            return Err(SimError::Parse(format!("line {line}: weight must be positive")));
        }
        if !building.contains(record.destination) {
            return Err(SimError::Parse(format!(
                "line {line}: destination {} outside floors {}..={}",
                record.destination, building.mailroom_floor, building.floors
            )));
        }

        let mut item = MailItem::new(
            ids.next_id(),
            record.destination,
            Tick(record.arrival_tick),
            record.weight,
        );
        if let Some(level) = record.priority {
            item = item.with_priority(level);
        }
        schedule.push(item);
    }

    Ok(schedule)
}
