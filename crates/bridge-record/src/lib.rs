//! The Shared Record: a fixed-layout, named shared-memory structure that
//! mirrors the most recent telemetry tick for same-host zero-copy readers.
//!
//! Single writer (the sim thread), many readers (other processes mapping the
//! same named region, plus this process's own JSON builder). Consistency is
//! gated by `data_valid`, not by any cross-process lock (spec §4.2, §5).

mod layout;
mod offsets;

pub use layout::{RecordLayout, SideSlot, STRING_FIELD_LEN};
pub use offsets::{OffsetsDescriptor, OffsetsError, VariableOffset};

use bridge_catalog::{Catalog, VariableKind};
use shared_memory::{Shmem, ShmemConf, ShmemError};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Instant;
use thiserror::Error;

/// Bumped whenever the on-wire byte layout of the record changes. Readers
/// that bypass the network and map the region directly are expected to
/// treat a mismatch as a hard error on their side (spec §9 open question);
/// the bridge itself only guarantees the descriptor and the record agree.
pub const LAYOUT_VERSION: u32 = 1;

/// Default name of the named shared-memory region (spec §6).
pub const DEFAULT_REGION_NAME: &str = "AeroflyBridgeData";

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("shared memory region unavailable: {0}")]
    ResourceUnavailable(String),
    #[error("logical index {0} is out of bounds")]
    IndexOutOfBounds(usize),
    #[error("variable at logical index {0} has no {1} side field")]
    KindMismatch(usize, &'static str),
}

#[repr(C)]
struct RecordHeader {
    timestamp_us: AtomicU64,
    data_valid: AtomicU32,
    update_counter: AtomicU32,
    layout_version: u32,
    _reserved: u32,
}

/// The mapped shared record. Owns the OS-level mapping; dropping it unmaps
/// (and, if this process created the region, releases) the memory.
pub struct Record {
    shmem: Shmem,
    layout: RecordLayout,
    start: Instant,
}

// `Shmem` holds a raw pointer but the region it maps is exclusively written
// by one thread at a time per the orchestrator's tick discipline (spec §5);
// nothing here relies on thread-affinity of the mapping itself.
unsafe impl Send for Record {}

impl Record {
    /// Create the named region if absent, or map an existing one, sized to
    /// fit every variable in `catalog` under the current layout.
    ///
    /// # Errors
    /// Returns [`RecordError::ResourceUnavailable`] if the OS refuses to
    /// create or map the region. Per spec §7 this is fatal at init.
    pub fn open_or_create(name: &str, catalog: &Catalog) -> Result<Self, RecordError> {
        let header_size = std::mem::size_of::<RecordHeader>();
        let layout = RecordLayout::compute(catalog, header_size, LAYOUT_VERSION);

        let (shmem, created) = match ShmemConf::new().os_id(name).size(layout.total_size).create()
        {
            Ok(shmem) => (shmem, true),
            Err(ShmemError::MappingIdExists) => {
                let shmem = ShmemConf::new()
                    .os_id(name)
                    .size(layout.total_size)
                    .open()
                    .map_err(|e| RecordError::ResourceUnavailable(e.to_string()))?;
                (shmem, false)
            }
            Err(e) => return Err(RecordError::ResourceUnavailable(e.to_string())),
        };

        if created {
            // SAFETY: `shmem` was just created with `layout.total_size` bytes
            // and is not yet visible to any other reader.
            unsafe {
                std::ptr::write_bytes(shmem.as_ptr(), 0, layout.total_size);
            }
        }

        let record = Record {
            shmem,
            layout,
            start: Instant::now(),
        };
        if created {
            // SAFETY: header fits within the mapped region by construction.
            unsafe {
                let header_ptr = record.shmem.as_ptr().cast::<RecordHeader>();
                (*header_ptr).layout_version = LAYOUT_VERSION;
            }
        }

        Ok(record)
    }

    fn header(&self) -> &RecordHeader {
        // SAFETY: the mapped region is at least `size_of::<RecordHeader>()`
        // bytes (enforced by `RecordLayout::compute`) and outlives `self`.
        unsafe { &*self.shmem.as_ptr().cast::<RecordHeader>() }
    }

    fn values_ptr(&self) -> *mut f64 {
        // SAFETY: `array_base_offset` and the array's extent were computed
        // against the same mapped region's size.
        unsafe {
            self.shmem
                .as_ptr()
                .add(self.layout.array_base_offset)
                .cast::<f64>()
        }
    }

    fn side_ptr(&self, offset: usize) -> *mut u8 {
        // SAFETY: `offset` always comes from `self.layout.side_slots`, which
        // was computed to fit within `self.layout.total_size`.
        unsafe { self.shmem.as_ptr().add(offset) }
    }

    #[must_use]
    pub fn layout(&self) -> &RecordLayout {
        &self.layout
    }

    /// Begin a tick: mark the record inconsistent, bump the update counter,
    /// and stamp the current monotonic timestamp. Must be paired with
    /// [`Record::end_tick`] before any broadcast reads the record.
    pub fn begin_tick(&self) {
        self.header().data_valid.store(0, Ordering::Release);
        self.header().update_counter.fetch_add(1, Ordering::Relaxed);
        let us = u64::try_from(self.start.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.header().timestamp_us.store(us, Ordering::Relaxed);
    }

    /// Mark the record consistent. Readers that observe `data_valid == 1`
    /// before and after reading the payload see a complete tick.
    pub fn end_tick(&self) {
        self.header().data_valid.store(1, Ordering::Release);
    }

    #[must_use]
    pub fn data_valid(&self) -> bool {
        self.header().data_valid.load(Ordering::Acquire) == 1
    }

    #[must_use]
    pub fn update_counter(&self) -> u32 {
        self.header().update_counter.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn timestamp_us(&self) -> u64 {
        self.header().timestamp_us.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn layout_version(&self) -> u32 {
        self.header().layout_version
    }

    /// Consistency-gated read of the whole header, for readers that want a
    /// single torn-free snapshot check (spec §4.2, property 3).
    #[must_use]
    pub fn read_consistent<R>(&self, read_payload: impl FnOnce(&Self) -> R) -> Option<R> {
        if !self.data_valid() {
            return None;
        }
        let result = read_payload(self);
        if !self.data_valid() {
            return None;
        }
        Some(result)
    }

    /// # Errors
    /// Returns [`RecordError::IndexOutOfBounds`] if `index` exceeds the
    /// catalog's logical index range.
    pub fn store_scalar(&self, index: usize, value: f64) -> Result<(), RecordError> {
        if index >= self.layout.count {
            return Err(RecordError::IndexOutOfBounds(index));
        }
        // SAFETY: bounds checked above.
        unsafe { self.values_ptr().add(index).write(value) };
        Ok(())
    }

    #[must_use]
    pub fn read_scalar(&self, index: usize) -> f64 {
        if index >= self.layout.count {
            return 0.0;
        }
        // SAFETY: bounds checked above.
        unsafe { self.values_ptr().add(index).read() }
    }

    /// # Errors
    /// Returns [`RecordError::KindMismatch`] if the variable at `index` is
    /// not a `vec2` in the catalog.
    pub fn store_vec2(&self, index: usize, value: [f64; 2]) -> Result<(), RecordError> {
        match self.layout.side_slot(index) {
            Some(SideSlot::Vec2 { offset }) => {
                // SAFETY: offset and extent computed by `RecordLayout`.
                unsafe { self.side_ptr(offset).cast::<[f64; 2]>().write(value) };
                Ok(())
            }
            _ => Err(RecordError::KindMismatch(index, "vec2")),
        }
    }

    #[must_use]
    pub fn read_vec2(&self, index: usize) -> Option<[f64; 2]> {
        match self.layout.side_slot(index) {
            // SAFETY: offset and extent computed by `RecordLayout`.
            Some(SideSlot::Vec2 { offset }) => {
                Some(unsafe { self.side_ptr(offset).cast::<[f64; 2]>().read() })
            }
            _ => None,
        }
    }

    /// # Errors
    /// Returns [`RecordError::KindMismatch`] if the variable at `index` is
    /// not a `vec3` in the catalog.
    pub fn store_vec3(&self, index: usize, value: [f64; 3]) -> Result<(), RecordError> {
        match self.layout.side_slot(index) {
            Some(SideSlot::Vec3 { offset }) => {
                unsafe { self.side_ptr(offset).cast::<[f64; 3]>().write(value) };
                Ok(())
            }
            _ => Err(RecordError::KindMismatch(index, "vec3")),
        }
    }

    #[must_use]
    pub fn read_vec3(&self, index: usize) -> Option<[f64; 3]> {
        match self.layout.side_slot(index) {
            Some(SideSlot::Vec3 { offset }) => {
                Some(unsafe { self.side_ptr(offset).cast::<[f64; 3]>().read() })
            }
            _ => None,
        }
    }

    /// # Errors
    /// Returns [`RecordError::KindMismatch`] if the variable at `index` is
    /// not a `vec4` in the catalog.
    pub fn store_vec4(&self, index: usize, value: [f64; 4]) -> Result<(), RecordError> {
        match self.layout.side_slot(index) {
            Some(SideSlot::Vec4 { offset }) => {
                unsafe { self.side_ptr(offset).cast::<[f64; 4]>().write(value) };
                Ok(())
            }
            _ => Err(RecordError::KindMismatch(index, "vec4")),
        }
    }

    #[must_use]
    pub fn read_vec4(&self, index: usize) -> Option<[f64; 4]> {
        match self.layout.side_slot(index) {
            Some(SideSlot::Vec4 { offset }) => {
                Some(unsafe { self.side_ptr(offset).cast::<[f64; 4]>().read() })
            }
            _ => None,
        }
    }

    /// Sanitize, truncate, and NUL-terminate `value` into the side field for
    /// `index` (spec §3 invariant iv, §9 "String handling").
    ///
    /// # Errors
    /// Returns [`RecordError::KindMismatch`] if the variable at `index` is
    /// not a `string` in the catalog.
    pub fn store_string(&self, index: usize, value: &str) -> Result<(), RecordError> {
        match self.layout.side_slot(index) {
            Some(SideSlot::String { offset, len }) => {
                let sanitized = sanitize_string(value, len - 1);
                let bytes = sanitized.as_bytes();
                // SAFETY: offset/len come from `RecordLayout`; `bytes.len()`
                // is at most `len - 1` so the NUL terminator always fits.
                unsafe {
                    let ptr = self.side_ptr(offset);
                    std::ptr::write_bytes(ptr, 0, len);
                    std::ptr::copy_nonoverlapping(bytes.as_ptr(), ptr, bytes.len());
                }
                Ok(())
            }
            _ => Err(RecordError::KindMismatch(index, "string")),
        }
    }

    #[must_use]
    pub fn read_string(&self, index: usize) -> Option<String> {
        match self.layout.side_slot(index) {
            Some(SideSlot::String { offset, len }) => {
                // SAFETY: offset/len come from `RecordLayout`.
                let bytes = unsafe { std::slice::from_raw_parts(self.side_ptr(offset), len) };
                let nul_at = bytes.iter().position(|&b| b == 0).unwrap_or(len);
                Some(String::from_utf8_lossy(&bytes[..nul_at]).into_owned())
            }
            _ => None,
        }
    }

    /// Build the offsets descriptor that is the only contract with readers
    /// that map this region directly (spec §4.1, §6).
    #[must_use]
    pub fn as_offsets_descriptor(&self, catalog: &Catalog) -> OffsetsDescriptor {
        let variables = catalog
            .iter()
            .map(|entry| {
                let (storage, byte_offset, byte_length, component_order, struct_field_name) =
                    match entry.kind {
                        VariableKind::Scalar => (
                            "all_variables",
                            self.layout.array_base_offset
                                + entry.logical_index * self.layout.stride_bytes,
                            self.layout.stride_bytes,
                            None,
                            None,
                        ),
                        _ => match self.layout.side_slot(entry.logical_index) {
                            Some(SideSlot::Vec2 { offset }) => (
                                "struct_field",
                                offset,
                                16,
                                Some(["x", "y"].as_slice()),
                                Some(format!("side_{}_vec2", entry.logical_index)),
                            ),
                            Some(SideSlot::Vec3 { offset }) => (
                                "struct_field",
                                offset,
                                24,
                                Some(["x", "y", "z"].as_slice()),
                                Some(format!("side_{}_vec3", entry.logical_index)),
                            ),
                            Some(SideSlot::Vec4 { offset }) => (
                                "struct_field",
                                offset,
                                32,
                                Some(["x", "y", "z", "w"].as_slice()),
                                Some(format!("side_{}_vec4", entry.logical_index)),
                            ),
                            Some(SideSlot::String { offset, len }) => (
                                "struct_field",
                                offset,
                                len,
                                None,
                                Some(format!("side_{}_str", entry.logical_index)),
                            ),
                            Some(SideSlot::None) | None => ("message_only", 0, 0, None, None),
                        },
                    };
                VariableOffset {
                    name: entry.name.to_owned(),
                    group: entry.group().to_owned(),
                    logical_index: entry.logical_index,
                    data_type: entry.kind.wire_name(),
                    storage,
                    struct_field_name,
                    byte_offset,
                    byte_length,
                    component_order,
                    unit: entry.unit.to_owned(),
                    message_id: entry.message_id,
                    access: entry.access.wire_name(),
                    flag: entry.flag.wire_name(),
                    is_event: entry.flag.is_event(),
                    is_toggle: entry.flag.is_toggle(),
                    is_active_flag: entry.flag.is_active_flag(),
                    is_value: entry.flag.is_value(),
                }
            })
            .collect();

        OffsetsDescriptor {
            schema: "aerofly-bridge-offsets",
            schema_version: 1,
            layout_version: self.layout.layout_version,
            array_base_offset: self.layout.array_base_offset,
            stride_bytes: self.layout.stride_bytes,
            count: self.layout.count,
            variables,
        }
    }
}

/// Replace every byte outside the printable-ASCII range `[0x20, 0x7E]` with
/// a space, and truncate to `max_len` bytes. Idempotent: sanitizing an
/// already-sanitized string with the same `max_len` is a no-op (spec §8
/// property 6).
#[must_use]
pub fn sanitize_string(input: &str, max_len: usize) -> String {
    input
        .as_bytes()
        .iter()
        .take(max_len)
        .map(|&b| if (0x20..=0x7E).contains(&b) { b as char } else { ' ' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_catalog::Catalog;

    fn temp_region_name(tag: &str) -> String {
        format!(
            "aerofly_bridge_test_{tag}_{}",
            std::process::id()
        )
    }

    #[test]
    fn begin_and_end_tick_toggle_data_valid() {
        let catalog = Catalog::new().unwrap();
        let record = Record::open_or_create(&temp_region_name("valid"), &catalog).unwrap();
        assert!(!record.data_valid());
        record.begin_tick();
        assert!(!record.data_valid());
        record.end_tick();
        assert!(record.data_valid());
    }

    #[test]
    fn update_counter_strictly_increases() {
        let catalog = Catalog::new().unwrap();
        let record = Record::open_or_create(&temp_region_name("counter"), &catalog).unwrap();
        let mut previous = record.update_counter();
        for _ in 0..10 {
            record.begin_tick();
            let current = record.update_counter();
            assert!(current > previous);
            previous = current;
            record.end_tick();
        }
    }

    #[test]
    fn scalar_round_trips_through_values_array() {
        let catalog = Catalog::new().unwrap();
        let index = catalog.index_of("Aircraft.Altitude").unwrap();
        let record = Record::open_or_create(&temp_region_name("scalar"), &catalog).unwrap();
        record.store_scalar(index, 1524.0).unwrap();
        assert_eq!(record.read_scalar(index), 1524.0);
    }

    #[test]
    fn vector_kinds_do_not_touch_the_values_array() {
        let catalog = Catalog::new().unwrap();
        let index = catalog.index_of("Aircraft.Position").unwrap();
        let record = Record::open_or_create(&temp_region_name("vector"), &catalog).unwrap();
        record.store_vec3(index, [1.0, 2.0, 3.0]).unwrap();
        assert_eq!(record.read_vec3(index), Some([1.0, 2.0, 3.0]));
        assert_eq!(record.read_scalar(index), 0.0);
    }

    #[test]
    fn scalar_index_rejects_vector_store() {
        let catalog = Catalog::new().unwrap();
        let index = catalog.index_of("Aircraft.Altitude").unwrap();
        let record = Record::open_or_create(&temp_region_name("mismatch"), &catalog).unwrap();
        assert!(matches!(
            record.store_vec2(index, [0.0, 0.0]),
            Err(RecordError::KindMismatch(_, "vec2"))
        ));
    }

    #[test]
    fn string_field_is_sanitized_and_nul_terminated() {
        let catalog = Catalog::new().unwrap();
        let index = catalog.index_of("Aircraft.Name").unwrap();
        let record = Record::open_or_create(&temp_region_name("string"), &catalog).unwrap();
        record.store_string(index, "N123AB\u{0007}\u{00e9}").unwrap();
        let read_back = record.read_string(index).unwrap();
        assert!(read_back.bytes().all(|b| (0x20..=0x7E).contains(&b)));
        assert!(read_back.starts_with("N123AB"));
    }

    #[test]
    fn sanitize_is_idempotent() {
        let once = sanitize_string("N123AB\u{0007}longer-than-the-field-allows", 8);
        let twice = sanitize_string(&once, 8);
        assert_eq!(once, twice);
        assert!(once.bytes().all(|b| (0x20..=0x7E).contains(&b)));
    }

    #[test]
    fn offsets_descriptor_agrees_with_scalar_layout() {
        let catalog = Catalog::new().unwrap();
        let record = Record::open_or_create(&temp_region_name("descriptor"), &catalog).unwrap();
        let descriptor = record.as_offsets_descriptor(&catalog);
        for entry in catalog.iter() {
            let var = descriptor
                .variables
                .iter()
                .find(|v| v.name == entry.name)
                .unwrap();
            if var.storage == "all_variables" {
                assert_eq!(
                    var.byte_offset,
                    descriptor.array_base_offset + entry.logical_index * descriptor.stride_bytes
                );
            }
        }
    }

    #[test]
    fn reopening_an_existing_region_does_not_fail() {
        let name = temp_region_name("reopen");
        let catalog = Catalog::new().unwrap();
        let first = Record::open_or_create(&name, &catalog).unwrap();
        first.store_scalar(0, 42.0).unwrap();
        let second = Record::open_or_create(&name, &catalog).unwrap();
        assert_eq!(second.read_scalar(0), 42.0);
    }
}
