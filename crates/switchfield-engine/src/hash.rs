//! Hashing utilities for state comparison.
//!
//! Uses FNV-1a over the raw bit patterns of every cell, so two states hash
//! equal only if they are bit-identical. These hashes are not
//! cryptographically secure; they exist for fast determinism checks.

use switchfield_core::Field;

use crate::state::{FieldState, Population};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = (hash ^ b as u64).wrapping_mul(FNV_PRIME);
    }
    hash
}

fn fold_field(mut hash: u64, field: &Field) -> u64 {
    let (rows, cols) = field.shape();
    hash = fnv1a_u64(hash, ((rows as u64) << 32) | cols as u64);
    for &v in field.as_slice() {
        hash = fnv1a_u64(hash, v.to_bits());
    }
    hash
}

/// Hash of one field's shape and cell bits.
pub fn field_hash(field: &Field) -> u64 {
    fold_field(FNV_OFFSET, field)
}

/// Hash of both populations of `state`.
///
/// A population tag is folded in before each field, so swapping `C_a`
/// and `C_b` changes the hash. Masks are not hashed; they never change
/// during a run.
pub fn state_hash(state: &FieldState) -> u64 {
    let mut hash = FNV_OFFSET;
    for (tag, population) in [(0u64, Population::A), (1u64, Population::B)] {
        hash = fnv1a_u64(hash, tag);
        hash = fold_field(hash, state.population(population));
    }
    hash
}
