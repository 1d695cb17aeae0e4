//! Reed-Solomon error-and-erasure correction over GF(2^m), 2 <= m <= 16.
//!
//! A [`Code`] binds a field (generator polynomial `gfpoly`, symbol size `m`)
//! to the coding parameters `fcr`, `prim` and `nroots`, and offers systematic
//! [`encode`] and [`decode`]/[`is_codeword`] over buffers of 16-bit symbols.
//! Identical codes (and the field tables behind them) are deduplicated by a
//! process-global registry, so repeated [`Code::init`] calls with the same
//! parameters are cheap.

pub mod code;
pub mod decode;
pub mod encode;
pub mod error;
pub mod field;
mod registry;

pub use code::{free, Code};
pub use decode::{decode as decode_block, is_codeword};
pub use encode::encode as encode_block;
pub use error::{CodecError, DecodeError};
pub use field::FieldTable;
