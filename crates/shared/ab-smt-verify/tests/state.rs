use ab_smt_verify::{Pair, SmtError, SmtState};
use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};
use std::collections::HashMap;

fn key_of(byte: u8) -> [u8; 32] {
    let mut key = [0u8; 32];
    key[0] = byte;
    key
}

#[test]
fn insert_appends_until_capacity_then_overwrites_most_recent_match() {
    let mut buffer = [Pair::default(); 3];
    let mut state = SmtState::init(&mut buffer, 3);

    state.insert(key_of(1), [1; 32]).unwrap();
    state.insert(key_of(2), [2; 32]).unwrap();
    state.insert(key_of(1), [9; 32]).unwrap();
    assert_eq!(state.len(), 3);

    // Capacity reached: inserting an existing key overwrites in place
    // instead of growing.
    state.insert(key_of(2), [20; 32]).unwrap();
    assert_eq!(state.len(), 3);
    assert_eq!(state.fetch(&key_of(2)).unwrap(), [20; 32]);

    // A genuinely new key with no capacity left is an error.
    assert_eq!(
        state.insert(key_of(3), [3; 32]),
        Err(SmtError::InsufficientCapacity)
    );
}

#[test]
fn fetch_missing_key_is_not_found() {
    let mut buffer = [Pair::default(); 1];
    let state = SmtState::init(&mut buffer, 1);
    assert_eq!(state.fetch(&key_of(1)), Err(SmtError::NotFound));
}

#[test]
fn fetch_returns_most_recently_inserted_value_for_duplicate_keys() {
    let mut buffer = [Pair::default(); 4];
    let mut state = SmtState::init(&mut buffer, 4);
    state.insert(key_of(5), [1; 32]).unwrap();
    state.insert(key_of(5), [2; 32]).unwrap();
    state.insert(key_of(5), [3; 32]).unwrap();
    assert_eq!(state.fetch(&key_of(5)).unwrap(), [3; 32]);
}

#[test]
fn normalize_sorts_by_key_and_drops_duplicates_keeping_latest_write() {
    // Matches the worked example from the reference verifier: interleaved
    // writes to the same few keys, in an order chosen to be neither sorted
    // nor grouped.
    let mut buffer = [Pair::default(); 8];
    let mut state = SmtState::init(&mut buffer, 8);
    let writes = [(7, 1), (1, 1), (1, 2), (2, 1), (2, 2), (0, 1), (0, 2), (6, 1)];
    for (k, v) in writes {
        state.insert(key_of(k), [v; 32]).unwrap();
    }
    assert_eq!(state.len(), 8);

    state.normalize();

    assert_eq!(state.len(), 5);
    let expected = [(0, 2), (1, 2), (2, 2), (6, 1), (7, 1)];
    for (k, v) in expected {
        assert_eq!(state.fetch(&key_of(k)).unwrap(), [v; 32]);
    }
}

#[test]
fn normalize_is_idempotent() {
    let mut buffer = [Pair::default(); 4];
    let mut state = SmtState::init(&mut buffer, 4);
    state.insert(key_of(3), [1; 32]).unwrap();
    state.insert(key_of(1), [2; 32]).unwrap();
    state.insert(key_of(2), [3; 32]).unwrap();

    state.normalize();
    let first_pass: Vec<_> = state.pairs().to_vec();
    state.normalize();
    let second_pass: Vec<_> = state.pairs().to_vec();

    assert_eq!(first_pass.len(), second_pass.len());
    for (a, b) in first_pass.iter().zip(second_pass.iter()) {
        assert_eq!(a.key(), b.key());
        assert_eq!(a.value(), b.value());
    }
}

#[test]
fn normalize_matches_a_hash_map_oracle_across_random_inputs() {
    let mut rng = ChaCha8Rng::from_seed(Default::default());

    for capacity in [1usize, 2, 16, 64, 257] {
        let mut buffer = vec![Pair::default(); capacity];
        let mut state = SmtState::init(&mut buffer, capacity);
        let mut oracle = HashMap::new();

        for _ in 0..capacity {
            let mut key = [0u8; 32];
            // A small key range guarantees repeated keys, exercising the
            // overwrite and dedup paths alongside plain inserts.
            key[0] = (rng.next_u32() % 16) as u8;
            let mut value = [0u8; 32];
            rng.fill_bytes(&mut value);

            if state.insert(key, value).is_ok() {
                oracle.insert(key, value);
            }
        }

        state.normalize();
        assert_eq!(state.len(), oracle.len());
        for (key, value) in &oracle {
            assert_eq!(&state.fetch(key).unwrap(), value);
        }
    }
}
