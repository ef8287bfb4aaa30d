//! 64-bit name hashing used to derive a message id from a variable's dotted
//! name. The real simulator SDK hashes names with its own (unspecified)
//! algorithm; FNV-1a is used here as a stable, dependency-free stand-in —
//! any catalog entry's `message_id` is computed once at construction and
//! never recomputed, so the specific hash function is an implementation
//! detail of this stand-in, not a wire contract.

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Hash a variable's canonical dotted name into a 64-bit message id.
#[must_use]
pub fn message_id_of(name: &str) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in name.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_hashes_identically() {
        assert_eq!(
            message_id_of("Aircraft.Altitude"),
            message_id_of("Aircraft.Altitude")
        );
    }

    #[test]
    fn distinct_names_are_overwhelmingly_unlikely_to_collide() {
        assert_ne!(
            message_id_of("Aircraft.Altitude"),
            message_id_of("Aircraft.Latitude")
        );
    }

    #[test]
    fn empty_name_hashes_to_the_offset_basis() {
        assert_eq!(message_id_of(""), FNV_OFFSET_BASIS);
    }
}
