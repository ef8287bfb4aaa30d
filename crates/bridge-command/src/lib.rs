//! Command Processor: translates inbound JSON commands into outbound SDK
//! messages (spec §4.7).
//!
//! The table is built once from every writable catalog entry. Parsing is a
//! bounded hand-scan for the two fields the wire format actually carries —
//! `"variable"` and `"value"` — rather than a general JSON parser, since the
//! format is fixed and small.

use bridge_catalog::{Catalog, VariableFlag};
use bridge_record::Record;
use bridge_sdk::{Payload, SimMessage};
use std::collections::HashMap;
use tracing::debug;

struct Entry {
    message_id: u64,
    logical_index: usize,
    is_step: bool,
}

/// Builds once from the catalog; immutable and lock-free thereafter.
pub struct CommandProcessor {
    table: HashMap<String, Entry>,
}

impl CommandProcessor {
    /// Populates the table from every catalog entry whose access is
    /// `write` or `read-write` (spec §4.7).
    #[must_use]
    pub fn build(catalog: &Catalog) -> Self {
        let mut table = HashMap::new();
        for entry in catalog.iter() {
            if !entry.access.is_writable() {
                continue;
            }
            table.insert(
                entry.name.to_owned(),
                Entry {
                    message_id: entry.message_id,
                    logical_index: entry.logical_index,
                    is_step: matches!(entry.flag, VariableFlag::Step),
                },
            );
        }
        CommandProcessor { table }
    }

    /// Parses each raw JSON command, looks up its variable, and returns an
    /// outbound [`SimMessage`] per command that resolved. Unknown
    /// variables, parse failures, and non-numeric values are dropped and
    /// logged at debug level, never stopping the rest of the batch.
    ///
    /// Step-flag variables are additionally applied to `record` so the
    /// locally visible state tracks the command without waiting for a host
    /// round-trip (spec §4.7).
    pub fn process(&self, commands: &[String], record: &Record) -> Vec<SimMessage> {
        let mut out = Vec::with_capacity(commands.len());
        for raw in commands {
            match self.process_one(raw, record) {
                Some(message) => out.push(message),
                None => debug!(command = %raw, "command did not resolve to an outbound message"),
            }
        }
        out
    }

    fn process_one(&self, raw: &str, record: &Record) -> Option<SimMessage> {
        let (name, value) = scan_variable_and_value(raw)?;
        let entry = self.table.get(name)?;

        if entry.is_step {
            let current = record.read_scalar(entry.logical_index);
            let _ = record.store_scalar(entry.logical_index, (current + value).clamp(0.0, 1.0));
        }

        Some(SimMessage::new(entry.message_id, Payload::F64(value)))
    }
}

/// Finds the first `{`..`}` span in `raw` and extracts `"variable"` (a
/// quoted string) and `"value"` (a JSON number) from it by bounded scan.
fn scan_variable_and_value(raw: &str) -> Option<(&str, f64)> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    let body = &raw[start + 1..end];

    let name = scan_string_field(body, "variable")?;
    let value = scan_number_field(body, "value")?;
    Some((name, value))
}

fn scan_string_field<'a>(body: &'a str, key: &str) -> Option<&'a str> {
    let key_pos = find_key(body, key)?;
    let after_colon = &body[key_pos..];
    let colon = after_colon.find(':')?;
    let rest = after_colon[colon + 1..].trim_start();
    let rest = rest.strip_prefix('"')?;
    let close = rest.find('"')?;
    Some(&rest[..close])
}

fn scan_number_field(body: &str, key: &str) -> Option<f64> {
    let key_pos = find_key(body, key)?;
    let after_colon = &body[key_pos..];
    let colon = after_colon.find(':')?;
    let rest = after_colon[colon + 1..].trim_start();
    let end = rest
        .find(|c: char| c == ',' || c == '}' || c.is_whitespace())
        .unwrap_or(rest.len());
    rest[..end].parse::<f64>().ok()
}

/// Finds the byte offset just after a `"key"` token within `body`, i.e.
/// where the following `:` is expected.
fn find_key(body: &str, key: &str) -> Option<usize> {
    let needle = format!("\"{key}\"");
    let pos = body.find(&needle)?;
    Some(pos + needle.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_catalog::Catalog;

    fn processor_and_record(tag: &str) -> (CommandProcessor, Catalog, Record) {
        let catalog = Catalog::new().unwrap();
        let processor = CommandProcessor::build(&catalog);
        let record = Record::open_or_create(
            &format!("aerofly_bridge_command_{tag}_{}", std::process::id()),
            &catalog,
        )
        .unwrap();
        (processor, catalog, record)
    }

    #[test]
    fn resolves_a_well_formed_command() {
        let (processor, catalog, record) = processor_and_record("ok");
        let raw = r#"{"variable": "Controls.Throttle", "value": 0.75}"#.to_owned();
        let messages = processor.process(&[raw], &record);
        assert_eq!(messages.len(), 1);
        let entry = catalog.entry(catalog.index_of("Controls.Throttle").unwrap()).unwrap();
        assert_eq!(messages[0].id, entry.message_id);
        assert_eq!(messages[0].payload, Payload::F64(0.75));
    }

    #[test]
    fn unknown_variable_yields_no_message() {
        let (processor, _catalog, record) = processor_and_record("unknown");
        let raw = r#"{"variable": "Nonexistent.Thing", "value": 1.0}"#.to_owned();
        assert!(processor.process(&[raw], &record).is_empty());
    }

    #[test]
    fn malformed_json_yields_no_message() {
        let (processor, _catalog, record) = processor_and_record("malformed");
        let raw = "not even json".to_owned();
        assert!(processor.process(&[raw], &record).is_empty());
    }

    #[test]
    fn step_variable_also_applies_to_the_local_record() {
        let (processor, catalog, record) = processor_and_record("step");
        let index = catalog.index_of("Doors.Left").unwrap();
        let raw = r#"{"variable":"Doors.Left","value":0.4}"#.to_owned();
        let messages = processor.process(&[raw], &record);
        assert_eq!(messages.len(), 1);
        assert!((record.read_scalar(index) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn read_only_variable_is_not_in_the_table() {
        let (processor, _catalog, record) = processor_and_record("readonly");
        let raw = r#"{"variable":"Aircraft.Altitude","value":1000.0}"#.to_owned();
        assert!(processor.process(&[raw], &record).is_empty());
    }

    #[test]
    fn non_numeric_value_yields_no_message() {
        let (processor, _catalog, record) = processor_and_record("nonnumeric");
        let raw = r#"{"variable":"Controls.Throttle","value":"fast"}"#.to_owned();
        assert!(processor.process(&[raw], &record).is_empty());
    }
}
