//! Systematic encoding by LFSR division of the message by the generator
//! polynomial.

use crate::code::Code;

/// Append `code.nroots()` parity symbols to a systematic codeword.
///
/// `data` holds `len = dlen + nroots` symbols accessed at `0, stride,
/// 2*stride, ..., (len-1)*stride`; the first `dlen` positions hold the
/// message and, on return, the last `nroots` positions hold parity such that
/// the whole buffer is a codeword. All symbols must fit in `[0, nn]`.
///
/// # Panics
///
/// Panics if `len < code.nroots()`, if `stride == 0`, or if `data` is too
/// short for `len` symbols at the given `stride` — these are all precondition
/// violations, not recoverable error conditions.
pub fn encode(code: &Code, data: &mut [u16], len: usize, stride: usize) {
    assert!(stride >= 1, "encode: stride must be at least 1");

    let nroots = code.nroots() as usize;
    assert!(
        len >= nroots,
        "encode: len ({len}) must be at least nroots ({nroots})"
    );

    let dlen = len - nroots;
    let required = if len == 0 { 0 } else { (len - 1) * stride + 1 };
    assert!(
        data.len() >= required,
        "encode: data buffer too short for len {len} at stride {stride}"
    );

    if nroots == 0 {
        return;
    }

    if stride == 1 {
        // Calculate parity in place; no scratch allocation needed since the
        // parity region of `data` is already contiguous.
        let (msg, par) = data.split_at_mut(dlen);
        lfsr_divide(code, msg, &mut par[..nroots], dlen, stride);
    } else {
        // The parity positions aren't contiguous in `data`, so divide into a
        // scratch buffer and scatter the result.
        let mut parity = vec![0u16; nroots];
        lfsr_divide(code, data, &mut parity, dlen, stride);

        let par_offset = dlen * stride;
        for (i, &p) in parity.iter().enumerate() {
            data[par_offset + i * stride] = p;
        }
    }
}

/// Divide the first `dlen` strided symbols of `data` by the code's generator
/// polynomial, leaving the remainder (the parity) in `par`.
fn lfsr_divide(code: &Code, data: &[u16], par: &mut [u16], dlen: usize, stride: usize) {
    let field = code.field();
    let alpha_to = field.alpha_to();
    let index_of = field.index_of();
    let gp = code.genpoly();
    let nroots = par.len();
    let nn = field.nn();

    for slot in par.iter_mut() {
        *slot = 0;
    }

    let cutoff = dlen * stride;
    let mut i = 0;
    while i < cutoff {
        let fb = index_of[(data[i] ^ par[0]) as usize];
        if fb != nn {
            for j in 1..nroots {
                par[j] ^= alpha_to[field.modnn(fb as i32 + gp[nroots - j] as i32) as usize];
            }
        }

        // Shift the parity register down by one, dropping par[0].
        for j in 0..nroots - 1 {
            par[j] = par[j + 1];
        }
        par[nroots - 1] = if fb != nn {
            alpha_to[field.modnn(fb as i32 + gp[0] as i32) as usize]
        } else {
            0
        };

        i += stride;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::is_codeword;

    #[test]
    fn encode_produces_a_codeword() {
        let code = Code::init(3, 0xb, 1, 1, 2).unwrap();
        let mut data = vec![1u16, 2, 3, 4, 5, 0, 0];
        encode(&code, &mut data, 7, 1);
        assert!(is_codeword(&code, &data, 7, 1));
    }

    #[test]
    fn s1_reference_encode() {
        // Scenario S1 from the specification.
        let code = Code::init(3, 0xb, 1, 1, 2).unwrap();
        let mut data = vec![1u16, 2, 3, 4, 5, 0, 0];
        encode(&code, &mut data, 7, 1);
        assert!(is_codeword(&code, &data, 7, 1));
        let original = data.clone();

        data[2] ^= 6;
        assert!(!is_codeword(&code, &data, 7, 1));

        let corrected = crate::decode::decode(&code, &mut data, 7, 1, &[], None).unwrap();
        assert_eq!(corrected, 1);
        assert_eq!(data, original);
    }

    #[test]
    fn strided_encode_matches_contiguous() {
        let code = Code::init(4, 0x13, 1, 1, 5).unwrap();
        let dlen = 6;
        let len = dlen + 5;
        let message: Vec<u16> = (0..dlen as u16).collect();

        let mut contiguous = message.clone();
        contiguous.resize(len, 0);
        encode(&code, &mut contiguous, len, 1);

        let mut strided = vec![0u16; len * 3];
        for (i, &m) in message.iter().enumerate() {
            strided[i * 3] = m;
        }
        encode(&code, &mut strided, len, 3);

        for i in 0..len {
            assert_eq!(strided[i * 3], contiguous[i]);
        }
    }

    #[test]
    fn nroots_zero_is_a_no_op() {
        let code = Code::init(3, 0xb, 1, 1, 0).unwrap();
        let mut data = vec![1u16, 2, 3];
        let before = data.clone();
        encode(&code, &mut data, 3, 1);
        assert_eq!(data, before);
    }
}
