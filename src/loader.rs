use crate::error::QvResult;
use crate::protocol::{ArrowEvent, SessionFile};
use crate::scorer::{RawArrow, ScoreAggregate};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, warn};

pub struct LoadedEvents {
    pub events: Vec<ArrowEvent>,
    pub skipped: usize,
}

/// Reads keypad events from CSV with the header `end,slot,value`.
///
/// Rows that cannot be parsed are skipped and counted. Whether a parsed value
/// is allowed is decided later, when the event is applied.
pub fn load_events<R: Read>(reader: R) -> QvResult<LoadedEvents> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut events = Vec::new();
    let mut skipped = 0;

    for (row_idx, result) in rdr.records().enumerate() {
        let row = row_idx + 2; // header is line 1
        let rec = match result {
            Ok(rec) => rec,
            Err(e) => {
                warn!("[Row {}] CSV Parse Error: {}", row, e);
                skipped += 1;
                continue;
            }
        };

        if rec.len() < 2 {
            warn!("[Row {}] Expected end,slot,value", row);
            skipped += 1;
            continue;
        }

        let end_number = match rec[0].parse::<u32>() {
            Ok(v) => v,
            Err(_) => {
                warn!("[Row {}] Invalid end number '{}'", row, &rec[0]);
                skipped += 1;
                continue;
            }
        };
        let slot_index = match rec[1].parse::<usize>() {
            Ok(v) => v,
            Err(_) => {
                warn!("[Row {}] Invalid slot index '{}'", row, &rec[1]);
                skipped += 1;
                continue;
            }
        };
        let value = match rec.get(2).unwrap_or("").parse::<RawArrow>() {
            Ok(v) => v,
            Err(e) => {
                warn!("[Row {}] {}", row, e);
                skipped += 1;
                continue;
            }
        };

        events.push(ArrowEvent::new(end_number, slot_index, value));
    }

    debug!("Loaded {} events ({} skipped)", events.len(), skipped);
    Ok(LoadedEvents { events, skipped })
}

pub fn load_events_from_file<P: AsRef<Path>>(path: P) -> QvResult<LoadedEvents> {
    let file = File::open(path.as_ref())?;
    load_events(file)
}

/// Writes one CSV row per end: `end,a1..aN,end_score,x_count,running_total`.
pub fn write_ends_csv<W: Write>(aggregate: &ScoreAggregate, writer: W) -> QvResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let arrows = aggregate.config().arrows_per_end as usize;

    let mut header = vec!["end".to_string()];
    header.extend((1..=arrows).map(|i| format!("a{}", i)));
    header.extend(["end_score", "x_count", "running_total"].map(String::from));
    wtr.write_record(&header)?;

    for (end, (_, running)) in aggregate.ends().iter().zip(aggregate.running_totals()) {
        let mut row = vec![end.end_number().to_string()];
        row.extend(end.labels());
        row.push(end.end_score().to_string());
        row.push(end.x_count().to_string());
        row.push(running.to_string());
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn export_ends_to_file<P: AsRef<Path>>(aggregate: &ScoreAggregate, path: P) -> QvResult<()> {
    let file = File::create(path.as_ref())?;
    write_ends_csv(aggregate, file)
}

pub fn load_session<P: AsRef<Path>>(path: P) -> QvResult<ScoreAggregate> {
    let path = path.as_ref();
    debug!("Loading session from {:?}", path);
    let content = fs::read_to_string(path)?;
    let file: SessionFile = serde_json::from_str(&content)?;
    ScoreAggregate::from_session_file(&file)
}

pub fn save_session<P: AsRef<Path>>(aggregate: &ScoreAggregate, path: P) -> QvResult<()> {
    let json = serde_json::to_string_pretty(&aggregate.to_session_file())?;
    fs::write(path.as_ref(), json)?;
    Ok(())
}
