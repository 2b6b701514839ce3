//! Rendering of squad claims into chat-sized reply batches.

use crate::registry::SquadRecord;
use squadclaim_common::{format_clock_time, truncate_chars, ClockZone};

/// Squad names are cut to this many characters.
pub const SQUAD_NAME_WIDTH: usize = 10;

/// Line shown instead of an empty list.
pub const NO_SQUADS_MESSAGE: &str = "No custom squads created yet.";

/// Turns squad records into numbered lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFormatter {
    zone: ClockZone,
}

impl OutputFormatter {
    /// Create a formatter rendering creation times in `zone`.
    pub const fn new(zone: ClockZone) -> Self {
        Self { zone }
    }

    /// One line per record, numbered from 1 in the given order.
    ///
    /// `records` are expected oldest first, as the registry returns them.
    pub fn format_list(&self, records: &[SquadRecord]) -> Vec<String> {
        if records.is_empty() {
            return vec![NO_SQUADS_MESSAGE.to_string()];
        }

        records
            .iter()
            .enumerate()
            .map(|(index, record)| self.format_line(index + 1, record))
            .collect()
    }

    fn format_line(&self, position: usize, record: &SquadRecord) -> String {
        format!(
            "{}. Squad {}[{}], created {}",
            position,
            record.squad_id,
            truncate_chars(&record.squad_name, SQUAD_NAME_WIDTH),
            format_clock_time(&record.created_at, self.zone)
        )
    }
}

/// Group `lines` into newline-joined batches of at most `chunk_size` lines.
///
/// A `chunk_size` of zero is treated as one.
pub fn paginate(lines: &[String], chunk_size: usize) -> Vec<String> {
    lines.chunks(chunk_size.max(1)).map(|chunk| chunk.join("\n")).collect()
}
