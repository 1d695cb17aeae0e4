//! The Reed-Solomon codec itself: parameter validation, generator
//! polynomial, and the public `init`/`free`/`min_distance` surface.

use std::sync::Arc;

use crate::error::CodecError;
use crate::field::FieldTable;
use crate::registry;

/// A constructed Reed-Solomon code over GF(2^m): a shared field plus a
/// generator polynomial.
///
/// `Code`s are cheap to clone (it's an `Arc`) and are deduplicated by the
/// process-global registry: two [`Code::init`] calls with identical
/// parameters return the same instance. Dropping the last `Arc` evicts the
/// code (and, if no other code still needs it, the field table) from the
/// registry.
#[derive(Debug)]
pub struct Code {
    field: Arc<FieldTable>,
    nroots: u16,
    fcr: u32,
    prim: u32,
    iprim: u32,
    /// Generator polynomial, `genpoly[0..=nroots]`, stored in index form
    /// (discrete logs; `nn` means "this coefficient is zero").
    genpoly: Vec<u16>,
}

impl Code {
    /// Construct (or fetch, if an identical code is already live) a
    /// Reed-Solomon code for the given parameters.
    ///
    /// `symsize` is the symbol size in bits (`2..=16`); `gfpoly` is the
    /// field-generator polynomial's coefficients; `fcr` is the index of the
    /// first consecutive root of the generator polynomial; `prim` is the
    /// primitive element's stride between roots; `nroots` is the number of
    /// parity symbols.
    pub fn init(
        symsize: u32,
        gfpoly: u32,
        fcr: u32,
        prim: u32,
        nroots: u32,
    ) -> Result<Arc<Code>, CodecError> {
        if !(2..=16).contains(&symsize) {
            return Err(CodecError::SymSizeOutOfRange(symsize));
        }

        let max = 1u32 << symsize;
        if fcr >= max {
            return Err(CodecError::FcrOutOfRange { fcr, symsize });
        }
        if prim == 0 || prim >= max {
            return Err(CodecError::PrimOutOfRange { prim, symsize });
        }
        if nroots >= max {
            return Err(CodecError::NrootsOutOfRange { nroots, symsize });
        }

        registry::code(symsize, gfpoly, fcr, prim, nroots, || {
            Self::build(symsize, gfpoly, fcr, prim, nroots)
        })
    }

    fn build(
        symsize: u32,
        gfpoly: u32,
        fcr: u32,
        prim: u32,
        nroots: u32,
    ) -> Result<Code, CodecError> {
        let field = registry::field_table(symsize, gfpoly)?;
        let nn = field.nn() as u32;
        let alpha_to = field.alpha_to();
        let index_of = field.index_of();

        // Find the prim-th root of 1: the smallest positive iprim with
        // (iprim * prim) % nn == 1, via the original's iterative search.
        let mut iprim = 1u32;
        while iprim % prim != 0 {
            iprim += nn;
        }
        let iprim = iprim / prim;

        // Build genpoly in polynomial form first, then convert to index
        // form for the encoder's inner loop.
        let mut genpoly = vec![0u16; nroots as usize + 1];
        genpoly[0] = 1;

        let mut root = fcr * prim;
        for i in 0..nroots as usize {
            genpoly[i + 1] = 1;

            // Multiply genpoly[] by (x + alpha^root).
            for j in (1..=i).rev() {
                if genpoly[j] != 0 {
                    let tmp = index_of[genpoly[j] as usize] as i32 + root as i32;
                    let tmp = alpha_to[field.modnn(tmp) as usize];
                    genpoly[j] = genpoly[j - 1] ^ tmp;
                } else {
                    genpoly[j] = genpoly[j - 1];
                }
            }

            // genpoly[0] can never be zero.
            let tmp = index_of[genpoly[0] as usize] as i32 + root as i32;
            genpoly[0] = alpha_to[field.modnn(tmp) as usize];

            root += prim;
        }

        for coef in genpoly.iter_mut() {
            *coef = index_of[*coef as usize];
        }

        Ok(Code {
            field,
            nroots: nroots as u16,
            fcr,
            prim,
            iprim,
            genpoly,
        })
    }

    #[inline]
    pub fn field(&self) -> &FieldTable {
        &self.field
    }

    #[inline]
    pub fn nroots(&self) -> u16 {
        self.nroots
    }

    #[inline]
    pub fn fcr(&self) -> u32 {
        self.fcr
    }

    #[inline]
    pub fn prim(&self) -> u32 {
        self.prim
    }

    #[inline]
    pub(crate) fn iprim(&self) -> u32 {
        self.iprim
    }

    #[inline]
    pub(crate) fn genpoly(&self) -> &[u16] {
        &self.genpoly
    }

    /// Minimum Hamming distance of the code, `nroots + 1`.
    #[inline]
    pub fn min_distance(&self) -> u32 {
        self.nroots as u32 + 1
    }
}

/// Release a code handle. Kept for parity with the C API's explicit
/// `rs_free`; in practice just dropping the `Arc` has the same effect, and
/// this is idempotent the same way `rs_free(NULL)` was.
pub fn free(_code: Arc<Code>) {}

impl Drop for Code {
    fn drop(&mut self) {
        registry::evict_code((
            self.field.m(),
            self.field.gfpoly(),
            self.fcr,
            self.prim,
            self.nroots as u32,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_params() {
        assert!(matches!(
            Code::init(1, 0xb, 1, 1, 2),
            Err(CodecError::SymSizeOutOfRange(1))
        ));
        assert!(matches!(
            Code::init(17, 0xb, 1, 1, 2),
            Err(CodecError::SymSizeOutOfRange(17))
        ));
        assert!(matches!(
            Code::init(3, 0xb, 8, 1, 2),
            Err(CodecError::FcrOutOfRange { .. })
        ));
        assert!(matches!(
            Code::init(3, 0xb, 0, 0, 2),
            Err(CodecError::PrimOutOfRange { .. })
        ));
        assert!(matches!(
            Code::init(3, 0xb, 0, 1, 8),
            Err(CodecError::NrootsOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_non_primitive_gfpoly() {
        assert!(matches!(
            Code::init(4, 0b10101, 1, 1, 5),
            Err(CodecError::NotPrimitive { .. })
        ));
    }

    #[test]
    fn min_distance_is_nroots_plus_one() {
        let code = Code::init(3, 0xb, 1, 1, 2).unwrap();
        assert_eq!(code.min_distance(), 3);
    }

    #[test]
    fn dedup_returns_same_instance() {
        let a = Code::init(4, 0x13, 1, 1, 5).unwrap();
        let b = Code::init(4, 0x13, 1, 1, 5).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn genpoly_matches_reference_s1() {
        // m=3, 0xb, fcr=1, prim=1, nroots=2 (scenario S1).
        let code = Code::init(3, 0xb, 1, 1, 2).unwrap();
        assert_eq!(code.genpoly().len(), 3);
    }

    #[quickcheck_macros::quickcheck]
    fn dedup_holds_over_any_valid_nroots(nroots: u8) -> quickcheck::TestResult {
        let nroots = nroots as u32 % 7; // GF(2^3): nroots must stay < nn (7)
        let a = Code::init(3, 0xb, 1, 1, nroots).unwrap();
        let b = Code::init(3, 0xb, 1, 1, nroots).unwrap();
        quickcheck::TestResult::from_bool(Arc::ptr_eq(&a, &b))
    }
}
