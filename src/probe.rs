//! Collision resolution: the order in which slots are visited for a key

/// Modulus of the secondary hash used for double hashing
const SECONDARY_MODULUS: usize = 27;

/// Strategy for choosing the next slot after a collision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    /// Visit the following slot, wrapping at the end of the table
    #[default]
    Linear,
    /// Visit `start + step²`
    Quadratic,
    /// Visit `start + step * stride`, with the stride derived from the key's hash
    DoubleHash,
}

impl ProbeKind {
    /// Every probe kind, in declaration order
    pub const ALL: [Self; 3] = [Self::Linear, Self::Quadratic, Self::DoubleHash];

    /// Position visited at `step` (counted from 1) given the previous position
    #[must_use]
    pub fn next_location(
        self,
        start: usize,
        current: usize,
        step: usize,
        stride: usize,
        capacity: usize,
    ) -> usize {
        let capacity = capacity.max(1);
        match self {
            Self::Linear => mul_add_mod(1, 1, current, capacity),
            Self::Quadratic => mul_add_mod(step, step, start, capacity),
            Self::DoubleHash => mul_add_mod(step, stride, start, capacity),
        }
    }

    /// Short human-readable name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Quadratic => "quadratic",
            Self::DoubleHash => "double-hash",
        }
    }
}

/// Secondary hash used as the double-hashing stride: `27 - (hash mod 27)`, always in `1..=27`
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn secondary_hash(hash: usize) -> usize {
    SECONDARY_MODULUS - hash % SECONDARY_MODULUS
}

/// Computes `(a * b + c) mod modulus` without overflowing
#[allow(clippy::cast_possible_truncation, clippy::arithmetic_side_effects)]
fn mul_add_mod(a: usize, b: usize, c: usize, modulus: usize) -> usize {
    let modulus = modulus as u128;
    let result = ((a as u128) * (b as u128) + (c as u128)) % modulus;
    result as usize
}

/// Bounded walk over the slots a key may occupy.
///
/// Yields the home slot first, then one position per collision, and stops after `capacity`
/// positions so a cycle on a full table cannot loop forever. The index of a yielded position in
/// the walk equals the number of collisions seen before reaching it.
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    /// Probe strategy in use
    kind: ProbeKind,
    /// Home slot of the key
    start: usize,
    /// Position that will be yielded next
    current: usize,
    /// Number of positions yielded so far
    step: usize,
    /// Double-hashing stride, reduced modulo capacity and never zero
    stride: usize,
    /// Number of slots in the table
    capacity: usize,
}

impl ProbeSequence {
    /// Starts a walk at the home slot `start` of a table with `capacity` slots
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn new(kind: ProbeKind, start: usize, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let stride = match secondary_hash(start) % capacity {
            0 => 1,
            stride => stride,
        };
        Self { kind, start: start % capacity, current: start % capacity, step: 0, stride, capacity }
    }

    /// Stride that double hashing advances by for this walk
    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step >= self.capacity {
            return None;
        }
        let position = self.current;
        self.step = self.step.saturating_add(1);
        self.current =
            self.kind.next_location(self.start, self.current, self.step, self.stride, self.capacity);
        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.capacity.saturating_sub(self.step);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProbeSequence {}
