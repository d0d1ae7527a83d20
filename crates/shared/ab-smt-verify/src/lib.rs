//! Sparse Merkle Tree proof verifier.
//!
//! Given a set of 32-byte key/value leaves, a compact proof encoded as a
//! stack-program byte string, and an expected 32-byte tree root, [`verify`]
//! recomputes the root by executing the proof's opcodes against a small
//! fixed-capacity evaluation stack and reports whether it matches.
//! [`calculate_root`] exposes the same engine without the final comparison.
//!
//! The tree has a fixed height of 256: one level per bit of a 32-byte key.
//! A value of all zero bytes is the absent-leaf sentinel and acts as the
//! identity element of the merge rule, which is what makes a sparse tree of
//! height 256 representable without ever materializing the empty subtrees.
//!
//! This crate performs no heap allocation and no I/O. The hash primitive
//! (BLAKE2b, 32-byte output, no personalization) is supplied by the
//! `blake2` crate.
#![no_std]

mod bits;
mod error;
mod hash;
mod proof;
mod state;

pub use error::SmtError;
pub use proof::{Frame, calculate_root, verify};
pub use state::{Pair, SmtState};

/// Size in bytes of a key.
pub const KEY_BYTES: usize = 32;

/// Size in bytes of a value (and of a digest, since both are BLAKE2b-256
/// outputs in this scheme).
pub const VALUE_BYTES: usize = 32;

/// Capacity of the interpreter's evaluation stack, in frames.
pub const MAX_STACK_SIZE: usize = 32;
