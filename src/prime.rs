//! Prime table sizing shared by both map implementations.
//!
//! Keeping the table length prime spreads `hash % capacity` over every slot even when the
//! hash function has a common factor with the table size, and it is what lets quadratic
//! probing reach half of the table before repeating.

use crate::MapError;

/// Returns `true` if `n` is prime.
///
/// Trial division by odd factors up to `sqrt(n)`. `0`, `1` and even numbers other than `2`
/// are not prime.
#[must_use]
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n == 1 || n % 2 == 0 {
        return false;
    }

    let mut factor: usize = 3;
    // `factor <= n / factor` is `factor * factor <= n` without the overflow
    while n.checked_div(factor).is_some_and(|quotient| factor <= quotient) {
        if n.checked_rem(factor) == Some(0) {
            return false;
        }
        factor = factor.saturating_add(2);
    }
    true
}

/// Returns the smallest prime reachable from `n` by first bumping an even `n` to the next
/// odd number and then stepping by two.
///
/// Because of the odd-first rule the result is never `2`: `next_prime(0)`, `next_prime(1)`
/// and `next_prime(2)` are all `3`. Every other result is the smallest prime `>= n`.
///
/// # Errors
///
/// Returns [`MapError::CapacityOverflow`] if no such prime fits in `usize`.
pub fn next_prime(n: usize) -> Result<usize, MapError> {
    let overflow = MapError::CapacityOverflow { requested: n };

    let mut candidate = if n % 2 == 0 { n.checked_add(1).ok_or(overflow)? } else { n };
    while !is_prime(candidate) {
        candidate = candidate.checked_add(2).ok_or(overflow)?;
    }
    Ok(candidate)
}

/// Rounds `n` up to a prime, leaving it alone if it already is one.
///
/// This is how a resize request is interpreted, so unlike [`next_prime`] it can return `2`.
///
/// # Errors
///
/// Returns [`MapError::CapacityOverflow`] if no prime `>= n` fits in `usize`.
pub fn prime_at_least(n: usize) -> Result<usize, MapError> {
    if is_prime(n) { Ok(n) } else { next_prime(n) }
}
