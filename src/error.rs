//! Error taxonomies for codec construction and decoding.

use thiserror::Error;

/// Failure constructing a [`Code`](crate::Code) or the [`FieldTable`](crate::field::FieldTable)
/// it shares.
///
/// Every variant here corresponds to a case in which the C original's
/// `rs_init` returns `NULL`.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum CodecError {
    /// `symsize` outside `2..=16`.
    #[error("symbol size {0} out of range (must be 2..=16)")]
    SymSizeOutOfRange(u32),
    /// `fcr` outside `0..2^symsize`.
    #[error("fcr {fcr} out of range for symbol size {symsize}")]
    FcrOutOfRange { fcr: u32, symsize: u32 },
    /// `prim` outside `1..2^symsize`.
    #[error("prim {prim} out of range for symbol size {symsize}")]
    PrimOutOfRange { prim: u32, symsize: u32 },
    /// `nroots` outside `0..2^symsize`.
    #[error("nroots {nroots} out of range for symbol size {symsize}")]
    NrootsOutOfRange { nroots: u32, symsize: u32 },
    /// The shift register never returned to 1 after cycling through `nn`
    /// elements: `gfpoly` is not a primitive polynomial over GF(2) for the
    /// given symbol size.
    #[error("field generator polynomial {gfpoly:#x} is not primitive for symbol size {symsize}")]
    NotPrimitive { gfpoly: u32, symsize: u32 },
}

/// Decode failure kinds, corresponding to the negative return codes of the
/// C original's `rs_decode`.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum DecodeError {
    /// Syndromes were non-zero but Berlekamp-Massey produced a constant
    /// locator polynomial: corruption beyond what `nroots` can diagnose.
    #[error("Berlekamp-Massey produced a degree-zero error locator on a non-codeword")]
    DegLambdaZero,
    /// A Chien-search root pointed into the virtual zero-padded prefix of a
    /// shortened code: the received word cannot have come from this code.
    #[error("error locator root falls inside the shortened code's virtual padding")]
    ImpossibleErrPos,
    /// Fewer locator roots were found by Chien search than `deg(lambda)`
    /// calls for: a miscorrection was detected before it could be applied.
    #[error("found fewer error-locator roots than its degree requires")]
    DegLambdaNeqCount,
    /// The syndrome implied by the proposed correction set didn't match the
    /// syndrome of the received word.
    #[error("recomputed syndrome does not match the received word; correction rejected")]
    NotACodeword,
    /// More erasures were supplied than the code has parity symbols.
    #[error("{supplied} erasures supplied, but code only has {nroots} parity symbols")]
    TooManyErasures { supplied: usize, nroots: usize },
}
