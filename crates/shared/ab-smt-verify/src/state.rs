use crate::bits::key_cmp;
use crate::error::SmtError;
use crate::{KEY_BYTES, VALUE_BYTES};

/// A single key/value leaf staged for proof verification.
///
/// `order` is assigned only by [`SmtState::normalize`] and has no meaning
/// before it runs; it is not part of this type's public construction
/// surface, the only way to populate a `Pair` is through [`SmtState::insert`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Pair {
    key: [u8; KEY_BYTES],
    value: [u8; VALUE_BYTES],
    order: u32,
}

impl Default for Pair {
    fn default() -> Self {
        Self {
            key: [0; KEY_BYTES],
            value: [0; VALUE_BYTES],
            order: 0,
        }
    }
}

impl Pair {
    /// The pair's key.
    #[must_use]
    pub const fn key(&self) -> &[u8; KEY_BYTES] {
        &self.key
    }

    /// The pair's value. All-zero means the key was explicitly staged as
    /// absent.
    #[must_use]
    pub const fn value(&self) -> &[u8; VALUE_BYTES] {
        &self.value
    }
}

/// Leaf-staging buffer for [`calculate_root`](crate::calculate_root) and
/// [`verify`](crate::verify).
///
/// Backed by a caller-owned slice so the verifier never allocates: the
/// backing slice may be larger than `capacity`, e.g. a scratch buffer reused
/// across many calls with different capacities.
#[derive(Debug)]
pub struct SmtState<'a> {
    pairs: &'a mut [Pair],
    len: usize,
    capacity: usize,
}

impl<'a> SmtState<'a> {
    /// Create a state over `buffer`, accepting at most `capacity` pairs
    /// before [`insert`](Self::insert) starts overwriting instead of
    /// appending. `buffer` must be at least `capacity` pairs long; it may be
    /// longer, e.g. a scratch buffer shared across calls with smaller
    /// capacities.
    pub fn init(buffer: &'a mut [Pair], capacity: usize) -> Self {
        Self {
            pairs: buffer,
            len: 0,
            capacity,
        }
    }

    /// Number of pairs currently staged.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// `true` when no pairs are staged.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The staged pairs, in insertion order (pre-[`normalize`](Self::normalize))
    /// or in sorted, deduplicated order (post-`normalize`).
    #[must_use]
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs[..self.len]
    }

    /// Stage a key/value pair.
    ///
    /// Appends while under `capacity`. Once `capacity` is reached, looks for
    /// an existing pair with the same key (most recently inserted first) and
    /// overwrites its value; only once no matching key exists does this
    /// return [`SmtError::InsufficientCapacity`].
    pub fn insert(&mut self, key: [u8; KEY_BYTES], value: [u8; VALUE_BYTES]) -> Result<(), SmtError> {
        if self.len < self.capacity {
            self.pairs[self.len] = Pair {
                key,
                value,
                order: 0,
            };
            self.len += 1;
            return Ok(());
        }

        for pair in self.pairs[..self.len].iter_mut().rev() {
            if pair.key == key {
                pair.value = value;
                return Ok(());
            }
        }

        Err(SmtError::InsufficientCapacity)
    }

    /// Look up the value staged for `key`, most recently inserted first.
    pub fn fetch(&self, key: &[u8; KEY_BYTES]) -> Result<[u8; VALUE_BYTES], SmtError> {
        self.pairs[..self.len]
            .iter()
            .rev()
            .find(|pair| &pair.key == key)
            .map(|pair| pair.value)
            .ok_or(SmtError::NotFound)
    }

    /// Sort staged pairs by [`key_cmp`] and drop duplicate keys, keeping the
    /// most recently inserted value for each.
    ///
    /// [`calculate_root`](crate::calculate_root) requires pairs in this
    /// order; call this once after staging is complete and before verifying.
    pub fn normalize(&mut self) {
        let len = self.len;
        let pairs = &mut self.pairs[..len];

        // Insertion order survives only through `order`: the pair inserted
        // last gets the smallest order, so an ascending-order tiebreak keeps
        // the most recent write for duplicate keys.
        for (i, pair) in pairs.iter_mut().enumerate() {
            pair.order = (len - i) as u32;
        }

        pairs.sort_unstable_by(|a, b| key_cmp(&a.key, &b.key).then(a.order.cmp(&b.order)));

        let mut write = 0;
        let mut read = 0;
        while read < len {
            let mut next = read + 1;
            while next < len && pairs[next].key == pairs[read].key {
                next += 1;
            }
            if write != read {
                pairs[write] = pairs[read];
            }
            write += 1;
            read = next;
        }

        self.len = write;
    }
}
