//! Randomized pushes, pops and accesses, checked against `VecDeque`.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use segmented_deque::{Error, SegmentedDeque};

const SEED: u64 = 42;
const OPERATIONS: usize = 20_000;

fn stress(block_capacity: usize, seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut deque = SegmentedDeque::with_block_capacity(block_capacity);
    let mut model = VecDeque::new();

    for _ in 0..OPERATIONS {
        match rng.gen_range(0..4) {
            0 => {
                let value: u32 = rng.gen_range(0..1000);
                if rng.gen_bool(0.5) {
                    deque.push_front(value);
                    model.push_front(value);
                } else {
                    deque.push_back(value);
                    model.push_back(value);
                }
            }
            1 => {
                if rng.gen_bool(0.5) {
                    assert_eq!(deque.pop_front().ok(), model.pop_front());
                } else {
                    assert_eq!(deque.pop_back().ok(), model.pop_back());
                }
            }
            2 => {
                assert_eq!(deque.front().ok(), model.front());
                assert_eq!(deque.back().ok(), model.back());
            }
            _ => {
                if !model.is_empty() {
                    let index = rng.gen_range(0..model.len());
                    assert_eq!(deque[index], model[index], "index {index}");
                }
            }
        }

        assert_eq!(deque.len(), model.len());
        assert_eq!(deque.is_empty(), model.is_empty());
        assert!(deque.block_count() >= 1);
    }

    for (i, value) in model.iter().enumerate() {
        assert_eq!(deque.at(i), Ok(value), "index {i}");
    }
    assert_eq!(
        deque.at(model.len()),
        Err(Error::IndexOutOfRange {
            index: model.len(),
            len: model.len()
        })
    );
}

#[test]
fn stress_single_slot_blocks() {
    stress(1, SEED);
}

#[test]
fn stress_small_blocks() {
    for block_capacity in 2..=8 {
        stress(block_capacity, SEED + block_capacity as u64);
    }
}

#[test]
fn stress_default_blocks() {
    let deque: SegmentedDeque<u32> = SegmentedDeque::new();

    stress(deque.block_capacity(), SEED);
}

#[test]
fn growing_at_both_ends_keeps_elements_in_place() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let mut deque = SegmentedDeque::with_block_capacity(3);
    let mut model = VecDeque::new();

    for value in 0..5_000u32 {
        if rng.gen_bool(0.5) {
            deque.push_front(value);
            model.push_front(value);
        } else {
            deque.push_back(value);
            model.push_back(value);
        }
    }

    assert_eq!(deque.len(), 5_000);
    assert_eq!(deque, Vec::from(model.clone()));

    while let Some(value) = model.pop_back() {
        assert_eq!(deque.pop_back(), Ok(value));
    }
    assert!(deque.is_empty());
    assert_eq!(deque.block_count(), 1);
}
