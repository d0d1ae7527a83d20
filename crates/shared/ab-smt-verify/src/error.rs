/// Sparse Merkle Tree verification error.
///
/// Variants carry the same stable numeric codes as the original C
/// implementation this crate's wire grammar is compatible with; [`SmtError::code`]
/// recovers that integer for callers that cross an FFI boundary where only
/// the code, not the Rust type, survives.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum SmtError {
    /// The leaf-staging buffer has no room for another pair.
    #[error("insufficient capacity in leaf-staging buffer")]
    InsufficientCapacity,
    /// [`SmtState::fetch`](crate::SmtState::fetch) found no pair for the requested key.
    #[error("key not found")]
    NotFound,
    /// The interpreter's evaluation stack underflowed, overflowed, or was
    /// left with more than one frame at the end of the proof.
    #[error("invalid stack")]
    InvalidStack,
    /// A proof-sibling operand's claimed height does not fit the expected
    /// parent path for the pair it is merged against.
    #[error("invalid sibling")]
    InvalidSibling,
    /// The proof byte string is malformed: an unrecognized opcode, a
    /// truncated operand, or leaves that were not exhausted by the program.
    #[error("invalid proof")]
    InvalidProof,
}

impl SmtError {
    /// The stable numeric code for this error, matching the original
    /// verifier's `SMT_ERR_*` constants (80 through 84).
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::InsufficientCapacity => 80,
            Self::NotFound => 81,
            Self::InvalidStack => 82,
            Self::InvalidSibling => 83,
            Self::InvalidProof => 84,
        }
    }
}
