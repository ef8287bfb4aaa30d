//! The JSON Builder: one function, reused across the TCP and WebSocket
//! transports, producing an identical payload for both (spec §4.4, §9 "JSON
//! builder"). Reuses a caller-supplied buffer instead of allocating per
//! variable.

use bridge_catalog::{Catalog, VariableKind};
use bridge_record::Record;
use std::fmt::Write as _;

/// `schema_version` of the broadcast document (spec §4.4). Bump alongside
/// any change to the document's shape.
pub const SCHEMA_VERSION: u32 = 1;

/// Builds broadcast JSON documents, reusing one internal buffer across
/// calls.
#[derive(Debug, Default)]
pub struct JsonBuilder {
    buffer: String,
}

impl JsonBuilder {
    #[must_use]
    pub fn new() -> Self {
        JsonBuilder {
            buffer: String::with_capacity(16 * 1024),
        }
    }

    /// Render the current record into a single-line JSON document followed
    /// by `\n`, and return it as a borrowed `&str` valid until the next
    /// call to `build`.
    pub fn build(&mut self, catalog: &Catalog, record: &Record, broadcast_rate_hz: f64) -> &str {
        let buffer = &mut self.buffer;
        buffer.clear();

        buffer.push_str("{\"schema\":\"aerofly-bridge-telemetry\"");
        let _ = write!(buffer, ",\"schema_version\":{SCHEMA_VERSION}");
        let _ = write!(buffer, ",\"timestamp\":{}", record.timestamp_us());
        buffer.push_str(",\"timestamp_unit\":\"microseconds\"");
        let _ = write!(buffer, ",\"data_valid\":{}", u8::from(record.data_valid()));
        let _ = write!(buffer, ",\"update_counter\":{}", record.update_counter());
        buffer.push_str(",\"broadcast_rate_hz\":");
        push_fixed6(buffer, broadcast_rate_hz);

        buffer.push_str(",\"variables\":{");
        let mut first = true;
        for entry in catalog.iter() {
            match entry.kind {
                VariableKind::Scalar => {
                    push_separator(buffer, &mut first);
                    push_key(buffer, entry.name);
                    push_fixed6(buffer, record.read_scalar(entry.logical_index));
                }
                VariableKind::Vec2 => {
                    if let Some(v) = record.read_vec2(entry.logical_index) {
                        for (component, suffix) in v.iter().zip(["X", "Y"]) {
                            push_separator(buffer, &mut first);
                            push_component_key(buffer, entry.name, suffix);
                            push_fixed6(buffer, *component);
                        }
                    }
                }
                VariableKind::Vec3 => {
                    if let Some(v) = record.read_vec3(entry.logical_index) {
                        for (component, suffix) in v.iter().zip(["X", "Y", "Z"]) {
                            push_separator(buffer, &mut first);
                            push_component_key(buffer, entry.name, suffix);
                            push_fixed6(buffer, *component);
                        }
                    }
                }
                VariableKind::Vec4 => {
                    if let Some(v) = record.read_vec4(entry.logical_index) {
                        for (component, suffix) in v.iter().zip(["X", "Y", "Z", "W"]) {
                            push_separator(buffer, &mut first);
                            push_component_key(buffer, entry.name, suffix);
                            push_fixed6(buffer, *component);
                        }
                    }
                }
                VariableKind::String => {
                    if let Some(s) = record.read_string(entry.logical_index) {
                        push_separator(buffer, &mut first);
                        push_key(buffer, entry.name);
                        push_json_string(buffer, &s);
                    }
                }
                // Opaque variables carry no persisted value to report.
                VariableKind::Opaque => {}
            }
        }
        buffer.push_str("}}\n");

        buffer.as_str()
    }
}

fn push_separator(buffer: &mut String, first: &mut bool) {
    if !*first {
        buffer.push(',');
    }
    *first = false;
}

fn push_key(buffer: &mut String, name: &str) {
    buffer.push('"');
    buffer.push_str(name);
    buffer.push_str("\":");
}

fn push_component_key(buffer: &mut String, name: &str, suffix: &str) {
    buffer.push('"');
    buffer.push_str(name);
    buffer.push('.');
    buffer.push_str(suffix);
    buffer.push_str("\":");
}

/// Six fractional digits, no scientific notation, matching spec §4.4's
/// numeric-formatting rule.
fn push_fixed6(buffer: &mut String, value: f64) {
    let _ = write!(buffer, "{value:.6}");
}

/// Minimal JSON string escaping. Values passing through here have already
/// gone through [`bridge_record::sanitize_string`], so only the quote and
/// backslash characters (both printable ASCII) need escaping.
fn push_json_string(buffer: &mut String, value: &str) {
    buffer.push('"');
    for ch in value.chars() {
        match ch {
            '"' => buffer.push_str("\\\""),
            '\\' => buffer.push_str("\\\\"),
            _ => buffer.push(ch),
        }
    }
    buffer.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_catalog::Catalog;

    fn fresh_record(tag: &str, catalog: &Catalog) -> Record {
        Record::open_or_create(
            &format!("aerofly_bridge_json_{tag}_{}", std::process::id()),
            catalog,
        )
        .unwrap()
    }

    #[test]
    fn altitude_round_trips_through_the_broadcast_document() {
        let catalog = Catalog::new().unwrap();
        let record = fresh_record("altitude", &catalog);
        let index = catalog.index_of("Aircraft.Altitude").unwrap();
        record.begin_tick();
        record.store_scalar(index, 1524.0).unwrap();
        record.end_tick();

        let mut builder = JsonBuilder::new();
        let json = builder.build(&catalog, &record, 50.0).to_owned();
        assert!(json.ends_with('\n'));

        let parsed: serde_json::Value = serde_json::from_str(json.trim_end()).unwrap();
        assert_eq!(parsed["schema"], "aerofly-bridge-telemetry");
        assert_eq!(parsed["update_counter"], record.update_counter());
        assert_eq!(
            parsed["variables"]["Aircraft.Altitude"].as_f64().unwrap(),
            1524.0
        );
        assert_eq!(json.matches("\"Aircraft.Altitude\":1524.000000").count(), 1);
    }

    #[test]
    fn vector_kinds_expand_into_component_keys() {
        let catalog = Catalog::new().unwrap();
        let record = fresh_record("vector", &catalog);
        let index = catalog.index_of("Aircraft.Position").unwrap();
        record.store_vec3(index, [1.0, 2.0, 3.0]).unwrap();

        let mut builder = JsonBuilder::new();
        let json = builder.build(&catalog, &record, 50.0).to_owned();
        let parsed: serde_json::Value = serde_json::from_str(json.trim_end()).unwrap();
        assert_eq!(parsed["variables"]["Aircraft.Position.X"], 1.0);
        assert_eq!(parsed["variables"]["Aircraft.Position.Y"], 2.0);
        assert_eq!(parsed["variables"]["Aircraft.Position.Z"], 3.0);
    }

    #[test]
    fn string_values_are_quoted_and_escaped() {
        let catalog = Catalog::new().unwrap();
        let record = fresh_record("string", &catalog);
        let index = catalog.index_of("Aircraft.Name").unwrap();
        record.store_string(index, "Cessna \"172\"").unwrap();

        let mut builder = JsonBuilder::new();
        let json = builder.build(&catalog, &record, 50.0).to_owned();
        let parsed: serde_json::Value = serde_json::from_str(json.trim_end()).unwrap();
        assert_eq!(parsed["variables"]["Aircraft.Name"], "Cessna \"172\"");
    }

    #[test]
    fn builder_reuses_its_buffer_across_calls() {
        let catalog = Catalog::new().unwrap();
        let record = fresh_record("reuse", &catalog);
        let mut builder = JsonBuilder::new();
        let first_capacity = {
            let _ = builder.build(&catalog, &record, 50.0);
            builder.buffer.capacity()
        };
        let second_capacity = {
            let _ = builder.build(&catalog, &record, 50.0);
            builder.buffer.capacity()
        };
        assert_eq!(first_capacity, second_capacity);
    }
}
