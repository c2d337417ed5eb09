//! Operand codec for the request and response streams.
//!
//! A request travels as one 64-bit message with the multiplicand in bits `[31:0]` and
//! the multiplier in bits `[63:32]`. A response is the 32-bit truncated product, which
//! is already the wire width, so encoding it is the identity.

use crate::common::constants::MULTIPLIER_SHIFT;

/// A decoded multiply request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Request {
    /// Operand carried in the low half of the message.
    pub multiplicand: u32,
    /// Operand carried in the high half of the message.
    pub multiplier: u32,
}

impl Request {
    /// Creates a request from its two operands.
    pub const fn new(multiplicand: u32, multiplier: u32) -> Self {
        Self {
            multiplicand,
            multiplier,
        }
    }

    /// Packs the request back into its 64-bit wire form.
    pub const fn to_bits(self) -> u64 {
        encode_request(self.multiplicand as u64, self.multiplier as u64)
    }
}

impl From<u64> for Request {
    fn from(payload: u64) -> Self {
        decode(payload)
    }
}

/// Splits a 64-bit request message into its operands.
///
/// Every 64-bit value is a valid message.
///
/// # Examples
///
/// ```
/// use imul_core::core::units::codec::{Request, decode};
///
/// assert_eq!(decode(0x0000_0003_0000_0002), Request::new(2, 3));
/// ```
#[inline]
pub const fn decode(payload: u64) -> Request {
    Request {
        multiplicand: payload as u32,
        multiplier: (payload >> MULTIPLIER_SHIFT) as u32,
    }
}

/// Packs two operands into a request message, truncating each to 32 bits.
///
/// Wider inputs are accepted on purpose so that callers can pass values such as
/// `0x1_0000_0002` and get the wrapped operand, mirroring how test vectors are written.
#[inline]
pub const fn encode_request(multiplicand: u64, multiplier: u64) -> u64 {
    (multiplicand as u32 as u64) | ((multiplier as u32 as u64) << MULTIPLIER_SHIFT)
}

/// Packs a product into a response message.
#[inline]
pub const fn encode(product: u32) -> u32 {
    product
}
