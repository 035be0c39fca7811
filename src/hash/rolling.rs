//! Rolling Verification Hash
//!
//! Folds user identifiers into a per-cache accumulator. The step is a single
//! quadratic combination over the BN254 scalar field and carries no security
//! property; it is kept bit-exact so stored histories can be replayed.

use std::fmt;

use num_bigint::BigUint;

use crate::hash::field::field_modulus;

/// Accumulator value assigned to every newly created cache.
pub const INITIAL_ACCUMULATOR: u64 = 12345;

// == Combine ==
/// Combines a user identifier with the previous accumulator value.
///
/// Both inputs are reduced modulo `p` first, then
/// `(user_id * prev + user_id + prev) mod p` is returned.
pub fn combine(user_id: &BigUint, prev: &BigUint) -> BigUint {
    let p = field_modulus();
    let user = user_id % p;
    let prev = prev % p;

    (&user * &prev + &user + &prev) % p
}

// == Accumulator ==
/// A per-cache rolling accumulator, always held in `[0, p)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Accumulator(BigUint);

impl Accumulator {
    /// The accumulator of a cache with no successful verifications.
    pub fn initial() -> Self {
        Self(BigUint::from(INITIAL_ACCUMULATOR))
    }

    /// Wraps an arbitrary value, reducing it into the field.
    pub fn from_value(value: BigUint) -> Self {
        Self(value % field_modulus())
    }

    /// Returns the underlying field element.
    pub fn value(&self) -> &BigUint {
        &self.0
    }

    /// Applies one verification by `user_id` and returns the next accumulator.
    pub fn absorb(&self, user_id: u64) -> Self {
        Self(combine(&BigUint::from(user_id), &self.0))
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Accumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// == Replay ==
/// Rebuilds an accumulator from `initial` and an ordered history of user ids.
pub fn replay<I>(initial: &Accumulator, user_ids: I) -> Accumulator
where
    I: IntoIterator<Item = u64>,
{
    user_ids
        .into_iter()
        .fold(initial.clone(), |acc, user_id| acc.absorb(user_id))
}
