//! Prime selection for table capacities

use crate::TableError;

/// Precomputed primality flags for every integer in `0..=bound`, built with the Sieve of
/// Eratosthenes.
///
/// Queries past the bound fail with [`TableError::SieveOutOfBounds`] instead of reporting
/// "not prime".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeSieve {
    /// `flags[n]` is true when `n` is prime
    flags: Vec<bool>,
}

impl PrimeSieve {
    /// Builds a sieve covering `0..=bound`
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn new(bound: usize) -> Self {
        let mut flags = vec![true; bound.saturating_add(1)];
        for flag in flags.iter_mut().take(2) {
            *flag = false;
        }

        let mut n: usize = 2;
        while n <= bound / n {
            if flags.get(n).copied().unwrap_or(false) {
                for multiple in (n * n..=bound).step_by(n) {
                    if let Some(flag) = flags.get_mut(multiple) {
                        *flag = false;
                    }
                }
            }
            n += 1;
        }

        log::debug!("built prime sieve up to {bound}");
        Self { flags }
    }

    /// Largest integer the sieve answers for
    #[must_use]
    pub fn bound(&self) -> usize {
        self.flags.len().saturating_sub(1)
    }

    /// Returns whether `n` is prime
    ///
    /// # Errors
    ///
    /// [`TableError::SieveOutOfBounds`] when `n` lies past [`bound`](Self::bound).
    pub fn is_prime(&self, n: usize) -> Result<bool, TableError> {
        self.flags
            .get(n)
            .copied()
            .ok_or(TableError::SieveOutOfBounds { index: n, bound: self.bound() })
    }

    /// Scans downward from `n` and returns the first prime found
    ///
    /// # Errors
    ///
    /// [`TableError::SieveOutOfBounds`] when `n` lies past the bound, and
    /// [`TableError::NoPrimeAtOrBelow`] when `n < 2`.
    pub fn largest_prime_at_most(&self, n: usize) -> Result<usize, TableError> {
        self.check_bound(n)?;
        (0..=n)
            .rev()
            .find(|&candidate| self.flag(candidate))
            .ok_or(TableError::NoPrimeAtOrBelow(n))
    }

    /// Scans upward from `n` and returns the first prime within the bound
    ///
    /// # Errors
    ///
    /// [`TableError::SieveOutOfBounds`] when `n` lies past the bound, and
    /// [`TableError::NoPrimeAtOrAbove`] when no prime sits between `n` and the bound.
    pub fn smallest_prime_at_least(&self, n: usize) -> Result<usize, TableError> {
        self.check_bound(n)?;
        let bound = self.bound();
        (n..=bound)
            .find(|&candidate| self.flag(candidate))
            .ok_or(TableError::NoPrimeAtOrAbove { from: n, bound })
    }

    /// Iterates over every prime covered by the sieve in ascending order
    pub fn primes(&self) -> impl Iterator<Item = usize> {
        self.flags.iter().enumerate().filter_map(|(n, &prime)| prime.then_some(n))
    }

    /// Fails when `n` is past the bound
    fn check_bound(&self, n: usize) -> Result<(), TableError> {
        if n > self.bound() {
            return Err(TableError::SieveOutOfBounds { index: n, bound: self.bound() });
        }
        Ok(())
    }

    /// Raw flag lookup for indices already checked against the bound
    fn flag(&self, n: usize) -> bool {
        self.flags.get(n).copied().unwrap_or(false)
    }
}

/// Trial-division primality test, used when no sieve covers the number in question
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: usize) -> bool {
    if n < 4 {
        return n >= 2;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut divisor: usize = 3;
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Smallest prime that is at least `n`
#[must_use]
pub fn next_prime(n: usize) -> usize {
    (n.max(2)..).find(|&candidate| is_prime(candidate)).unwrap_or(n)
}
