use crate::bits::{copy_bits, get_bit, parent_path, with_bit_set};
use crate::error::SmtError;
use crate::hash::{leaf_digest, merge};
use crate::state::SmtState;
use crate::{KEY_BYTES, MAX_STACK_SIZE, VALUE_BYTES};

/// Push the next leaf's digest onto the evaluation stack.
const OPCODE_LEAF: u8 = 0x4C;
/// Merge the top of the stack with an inline sibling digest at a given
/// height.
const OPCODE_PROOF: u8 = 0x50;
/// Merge the top two entries of the stack at a given height.
const OPCODE_MERGE: u8 = 0x48;

/// One entry of the interpreter's evaluation stack: the key of the subtree
/// whose root digest is currently held, paired with that digest.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    key: [u8; KEY_BYTES],
    digest: [u8; VALUE_BYTES],
}

impl Frame {
    const EMPTY: Self = Self {
        key: [0; KEY_BYTES],
        digest: [0; VALUE_BYTES],
    };

    /// The key of the subtree this frame represents.
    #[must_use]
    pub const fn key(&self) -> &[u8; KEY_BYTES] {
        &self.key
    }

    /// The digest currently held for this subtree.
    #[must_use]
    pub const fn digest(&self) -> &[u8; VALUE_BYTES] {
        &self.digest
    }
}

/// Recompute a Sparse Merkle Tree root from staged, normalized leaves and a
/// proof byte string, without comparing it against an expected value.
///
/// `state`'s pairs must already be sorted and deduplicated (see
/// [`SmtState::normalize`]); this function does not normalize on your
/// behalf, since a single staged state is often reused across several
/// proofs.
///
/// A stack of `MAX_STACK_SIZE` frames can process as many as
/// `2.pow(MAX_STACK_SIZE - 1)` leaves, which is far beyond any proof worth
/// transmitting.
pub fn calculate_root(state: &SmtState<'_>, proof: &[u8]) -> Result<[u8; VALUE_BYTES], SmtError> {
    let pairs = state.pairs();
    let mut stack = [Frame::EMPTY; MAX_STACK_SIZE];
    let mut stack_top = 0usize;
    let mut leaf_index = 0usize;
    let mut proof_index = 0usize;

    while proof_index < proof.len() {
        let opcode = proof[proof_index];
        proof_index += 1;

        match opcode {
            OPCODE_LEAF => {
                if stack_top >= MAX_STACK_SIZE {
                    return Err(SmtError::InvalidStack);
                }
                let Some(pair) = pairs.get(leaf_index) else {
                    return Err(SmtError::InvalidProof);
                };
                stack[stack_top] = Frame {
                    key: *pair.key(),
                    digest: leaf_digest(pair.key(), pair.value()),
                };
                stack_top += 1;
                leaf_index += 1;
            }
            OPCODE_PROOF => {
                if stack_top == 0 {
                    return Err(SmtError::InvalidStack);
                }
                let Some(&height) = proof.get(proof_index) else {
                    return Err(SmtError::InvalidProof);
                };
                let Some(sibling) = proof.get(proof_index + 1..proof_index + 1 + VALUE_BYTES)
                else {
                    return Err(SmtError::InvalidProof);
                };
                proof_index += 1 + VALUE_BYTES;

                let mut sibling_digest = [0u8; VALUE_BYTES];
                sibling_digest.copy_from_slice(sibling);

                let frame = &mut stack[stack_top - 1];
                frame.digest = if get_bit(&frame.key, height) {
                    merge(&sibling_digest, &frame.digest)
                } else {
                    merge(&frame.digest, &sibling_digest)
                };
                parent_path(&mut frame.key, height);
            }
            OPCODE_MERGE => {
                if stack_top < 2 {
                    return Err(SmtError::InvalidStack);
                }
                let Some(&height) = proof.get(proof_index) else {
                    return Err(SmtError::InvalidProof);
                };
                proof_index += 1;

                let b = stack[stack_top - 1];
                let mut a = stack[stack_top - 2];
                stack_top -= 2;

                let a_set = get_bit(&a.key, height);
                let b_set = get_bit(&b.key, height);

                copy_bits(&mut a.key, u16::from(height));
                let mut b_key = b.key;
                copy_bits(&mut b_key, u16::from(height));

                let expected_sibling = if a_set {
                    a.key
                } else {
                    with_bit_set(a.key, height)
                };

                if expected_sibling != b_key || a_set == b_set {
                    return Err(SmtError::InvalidSibling);
                }

                a.digest = if a_set {
                    merge(&b.digest, &a.digest)
                } else {
                    merge(&a.digest, &b.digest)
                };

                stack[stack_top] = a;
                stack_top += 1;
            }
            _ => return Err(SmtError::InvalidProof),
        }
    }

    if leaf_index != pairs.len() {
        return Err(SmtError::InvalidProof);
    }
    if stack_top != 1 {
        return Err(SmtError::InvalidStack);
    }

    Ok(stack[0].digest)
}

/// Recompute the root from `state` and `proof` and check it against
/// `expected_root`.
pub fn verify(
    expected_root: &[u8; VALUE_BYTES],
    state: &SmtState<'_>,
    proof: &[u8],
) -> Result<(), SmtError> {
    let root = calculate_root(state, proof)?;
    if &root != expected_root {
        return Err(SmtError::InvalidProof);
    }
    Ok(())
}
