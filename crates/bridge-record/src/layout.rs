//! Byte layout computation for the shared record.
//!
//! The header occupies a fixed, `#[repr(C)]` prefix; it is followed by a
//! dense `f64` array (one slot per logical index, scalar variables only) and
//! then a side-field region for vectors and strings. Layout is deterministic
//! for a given catalog ordering, which is what lets the offsets descriptor
//! (spec §4.1, §6) describe exactly what the mapped region contains.

use bridge_catalog::{Catalog, VariableKind};

/// NUL-terminated fixed width of a string side field, in bytes.
pub const STRING_FIELD_LEN: usize = 32;

/// Where (if anywhere) a non-scalar variable's value lives outside the
/// dense `values` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideSlot {
    /// Scalar and opaque kinds have no side storage; scalars live in
    /// `values[logical_index]`, opaque kinds carry no persisted state at all.
    None,
    Vec2 { offset: usize },
    Vec3 { offset: usize },
    Vec4 { offset: usize },
    String { offset: usize, len: usize },
}

/// The computed byte layout of a record for a given catalog.
#[derive(Debug, Clone)]
pub struct RecordLayout {
    pub layout_version: u32,
    pub array_base_offset: usize,
    pub stride_bytes: usize,
    pub count: usize,
    /// Indexed by `logical_index`.
    pub side_slots: Vec<SideSlot>,
    pub total_size: usize,
}

impl RecordLayout {
    #[must_use]
    pub fn compute(catalog: &Catalog, header_size: usize, layout_version: u32) -> Self {
        let count = catalog.len();
        let array_base_offset = header_size;
        let mut offset = array_base_offset + count * 8;
        let mut side_slots = vec![SideSlot::None; count];

        for entry in catalog.iter() {
            let slot = match entry.kind {
                VariableKind::Vec2 => {
                    let slot = SideSlot::Vec2 { offset };
                    offset += 2 * 8;
                    slot
                }
                VariableKind::Vec3 => {
                    let slot = SideSlot::Vec3 { offset };
                    offset += 3 * 8;
                    slot
                }
                VariableKind::Vec4 => {
                    let slot = SideSlot::Vec4 { offset };
                    offset += 4 * 8;
                    slot
                }
                VariableKind::String => {
                    let slot = SideSlot::String {
                        offset,
                        len: STRING_FIELD_LEN,
                    };
                    offset += STRING_FIELD_LEN;
                    slot
                }
                VariableKind::Scalar | VariableKind::Opaque => SideSlot::None,
            };
            side_slots[entry.logical_index] = slot;
        }

        RecordLayout {
            layout_version,
            array_base_offset,
            stride_bytes: 8,
            count,
            side_slots,
            total_size: offset,
        }
    }

    #[must_use]
    pub fn side_slot(&self, index: usize) -> Option<SideSlot> {
        self.side_slots.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_catalog::Catalog;

    #[test]
    fn layout_covers_every_catalog_entry_without_overlap() {
        let catalog = Catalog::new().unwrap();
        let layout = RecordLayout::compute(&catalog, 24, 1);

        let mut spans: Vec<(usize, usize)> = Vec::new();
        spans.push((0, layout.array_base_offset));
        spans.push((
            layout.array_base_offset,
            layout.array_base_offset + layout.count * layout.stride_bytes,
        ));
        for slot in &layout.side_slots {
            let span = match *slot {
                SideSlot::None => continue,
                SideSlot::Vec2 { offset } => (offset, offset + 16),
                SideSlot::Vec3 { offset } => (offset, offset + 24),
                SideSlot::Vec4 { offset } => (offset, offset + 32),
                SideSlot::String { offset, len } => (offset, offset + len),
            };
            spans.push(span);
        }
        spans.sort_unstable();
        for pair in spans.windows(2) {
            assert!(
                pair[0].1 <= pair[1].0,
                "overlapping spans {:?} and {:?}",
                pair[0],
                pair[1]
            );
        }
        assert_eq!(spans.last().unwrap().1, layout.total_size);
    }
}
