//! This module contains an Affine map which can be used for testing order sensitive folds.

/// The map `x -> a * x + b` over wrapping u64 arithmetic.
/// Composition of these maps is associative but not commutative,
/// so any fold that mixes up the order of its operands gives a different result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Affine {
    a: u64,
    b: u64,
}

impl Affine {
    /// create a new Affine map
    pub fn new(a: u64, b: u64) -> Self {
        Self { a, b }
    }

    /// the identity map, the neutral element of [Affine::then]
    pub fn identity() -> Self {
        Self { a: 1, b: 0 }
    }

    /// evaluates the map at `x`
    pub fn apply(&self, x: u64) -> u64 {
        self.a.wrapping_mul(x).wrapping_add(self.b)
    }

    /// The map which first applies `self` and afterwards `next`.
    pub fn then(&self, next: &Self) -> Self {
        Self {
            a: next.a.wrapping_mul(self.a),
            b: next.a.wrapping_mul(self.b).wrapping_add(next.b),
        }
    }
}
