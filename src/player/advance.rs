//! Track-advance resolution over catalog indices.
//!
//! These are pure functions of the current index and catalog length; the
//! engine feeds them its own RNG so shuffle stays reproducible under a seed.

use rand::Rng;

/// Uniformly random index in `0..len`. May return the current track.
pub fn pick_random_index<R: Rng>(rng: &mut R, len: usize) -> usize {
    debug_assert!(len > 0);
    rng.gen_range(0..len)
}

/// Uniformly random index in `0..len` other than `current`, when that is possible.
pub fn pick_random_index_excluding<R: Rng>(rng: &mut R, len: usize, current: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    // Draw from len-1 slots and skip over `current`.
    let i = rng.gen_range(0..len - 1);
    if i >= current { i + 1 } else { i }
}

/// Index that follows `current` for auto-advance and explicit next.
pub fn next_index<R: Rng>(
    current: usize,
    len: usize,
    shuffle: bool,
    avoid_repeat: bool,
    rng: &mut R,
) -> usize {
    if shuffle {
        if avoid_repeat {
            pick_random_index_excluding(rng, len, current)
        } else {
            pick_random_index(rng, len)
        }
    } else {
        (current + 1) % len
    }
}

/// Sequential predecessor in catalog order, wrapping first -> last. Shuffle never applies.
pub fn previous_index(current: usize, len: usize) -> usize {
    if current == 0 { len - 1 } else { current - 1 }
}
