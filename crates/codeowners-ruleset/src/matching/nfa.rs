//! Fixed-size bit set used as the state vector of pattern simulations.
//!
//! Both the single-pattern matcher and the trie frontier keep their active
//! states in a [`StateSet`]: bit `i` set means state `i` is live.

const WORD_BITS: usize = u64::BITS as usize;

/// A set of NFA states backed by a vector of 64-bit words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSet {
    words: Vec<u64>,
    capacity: usize,
}

impl StateSet {
    /// Creates an empty set able to hold states `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(WORD_BITS)],
            capacity,
        }
    }

    /// Returns the number of states this set can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Marks `state` as live. Returns true if it was not live before.
    ///
    /// # Panics
    ///
    /// Panics if `state` is outside the capacity of the set.
    pub fn insert(&mut self, state: usize) -> bool {
        assert!(state < self.capacity, "state {state} out of range");
        let (word, mask) = Self::locate(state);
        let fresh = self.words[word] & mask == 0;
        self.words[word] |= mask;
        fresh
    }

    /// Returns true if `state` is live.
    pub fn contains(&self, state: usize) -> bool {
        if state >= self.capacity {
            return false;
        }
        let (word, mask) = Self::locate(state);
        self.words[word] & mask != 0
    }

    /// Returns true if no state is live.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Clears every state, keeping the capacity.
    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }

    /// Returns the number of live states.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Iterates over the live states in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(index, &word)| SetBits { word }.map(move |bit| index * WORD_BITS + bit))
    }

    fn locate(state: usize) -> (usize, u64) {
        (state / WORD_BITS, 1u64 << (state % WORD_BITS))
    }
}

/// Yields the positions of the set bits of one word, lowest first.
struct SetBits {
    word: u64,
}

impl Iterator for SetBits {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.word == 0 {
            return None;
        }
        let bit = self.word.trailing_zeros() as usize;
        self.word &= self.word - 1;
        Some(bit)
    }
}
