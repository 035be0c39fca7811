//! Field Module
//!
//! Arithmetic domain for the rolling accumulator: integers modulo the BN254
//! scalar field order.

use std::sync::LazyLock;

use num_bigint::BigUint;

// == Modulus ==
/// Big-endian bytes of the BN254 scalar field order
/// `21888242871839275222246405745257275088548364400416034343698204186575808495617`.
const MODULUS_BE: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58,
    0x5d, 0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00,
    0x00, 0x01,
];

static MODULUS: LazyLock<BigUint> = LazyLock::new(|| BigUint::from_bytes_be(&MODULUS_BE));

/// Returns the field modulus `p`.
pub fn field_modulus() -> &'static BigUint {
    &MODULUS
}

// == Reduce ==
/// Reduces `value` into `[0, p)`.
pub fn reduce(value: &BigUint) -> BigUint {
    value % field_modulus()
}
