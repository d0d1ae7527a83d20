use crate::{KEY_BYTES, VALUE_BYTES};
use blake2::Blake2b;
use blake2::digest::Digest;
use blake2::digest::consts::U32;

type Blake2b256 = Blake2b<U32>;

pub(crate) const ZERO: [u8; VALUE_BYTES] = [0; VALUE_BYTES];

#[inline]
pub(crate) fn is_zero(value: &[u8; VALUE_BYTES]) -> bool {
    value == &ZERO
}

fn blake2b_256(inputs: &[&[u8]]) -> [u8; VALUE_BYTES] {
    let mut hasher = Blake2b256::new();
    for input in inputs {
        hasher.update(input);
    }
    let digest = hasher.finalize();
    let mut output = [0u8; VALUE_BYTES];
    output.copy_from_slice(&digest);
    output
}

/// Digest of a leaf: zero for the absent-value sentinel, `BLAKE2b(key || value)`
/// otherwise.
pub(crate) fn leaf_digest(key: &[u8; KEY_BYTES], value: &[u8; VALUE_BYTES]) -> [u8; VALUE_BYTES] {
    if is_zero(value) {
        ZERO
    } else {
        blake2b_256(&[key, value])
    }
}

/// Merge two digests. Zero is the absorbing identity of this operation,
/// which is what lets a sparse tree of empty subtrees collapse to a single
/// zero value instead of a chain of `hash(0, 0)` hashes.
pub(crate) fn merge(lhs: &[u8; VALUE_BYTES], rhs: &[u8; VALUE_BYTES]) -> [u8; VALUE_BYTES] {
    if is_zero(lhs) {
        *rhs
    } else if is_zero(rhs) {
        *lhs
    } else {
        blake2b_256(&[lhs, rhs])
    }
}
