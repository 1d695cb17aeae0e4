//! Syndrome decoding: Berlekamp-Massey, Chien search and Forney's algorithm,
//! with a final syndrome re-check gating any mutation of the caller's buffer.

use crate::code::Code;
use crate::error::DecodeError;

/// Locate and correct up to `code.min_distance() - 1` symbol errors and
/// erasures in place.
///
/// `data`, `len` and `stride` are as in [`encode`](crate::encode::encode):
/// `len` strided symbols, the whole of which (message and parity) is treated
/// as a received word. `eras` lists the 0-based logical positions (`< len`)
/// of symbols already known to be unreliable; passing more erasures than the
/// code has parity symbols is an error rather than a panic, since a caller
/// can only know that count at runtime. `data` is left untouched unless
/// decoding succeeds: a recomputed syndrome must match the received word
/// before any symbol is corrected.
///
/// If `err_pos` is `Some`, it is cleared and filled with the logical
/// positions of the symbols that were corrected, in the same order as the
/// count returned.
///
/// Returns the number of symbols corrected (erasures and errors together) on
/// success, or the reason decoding failed.
///
/// # Panics
///
/// Panics on the same buffer-shape preconditions as `encode`: `stride == 0`,
/// `len` exceeding the field's natural length, or `data` too short for
/// `len` symbols at `stride`.
pub fn decode(
    code: &Code,
    data: &mut [u16],
    len: usize,
    stride: usize,
    eras: &[usize],
    err_pos: Option<&mut Vec<usize>>,
) -> Result<usize, DecodeError> {
    assert!(stride >= 1, "decode: stride must be at least 1");

    let field = code.field();
    let nn = field.nn();
    assert!(
        len <= nn as usize,
        "decode: len ({len}) exceeds the field's natural length ({nn})"
    );
    let required = if len == 0 { 0 } else { (len - 1) * stride + 1 };
    assert!(
        data.len() >= required,
        "decode: data buffer too short for len {len} at stride {stride}"
    );

    let nroots = code.nroots() as usize;
    let no_eras = eras.len();
    if no_eras > nroots {
        return Err(DecodeError::TooManyErasures {
            supplied: no_eras,
            nroots,
        });
    }

    let s = compute_syndrome(code, data, len, stride);
    if nroots == 0 {
        return Ok(0);
    }

    let alpha_to = field.alpha_to();
    let index_of = field.index_of();
    let fcr = code.fcr();
    let prim = code.prim();
    let iprim = code.iprim();
    let pad = nn as i32 - len as i32;

    let mut si = vec![0u16; nroots];
    let mut syn_error = false;
    for i in 0..nroots {
        if s[i] != 0 {
            syn_error = true;
        }
        si[i] = index_of[s[i] as usize];
    }
    if !syn_error {
        return Ok(0);
    }

    // Erasure locator initialization: lambda(x) = product over erased
    // positions of (1 - x * alpha^(-position)).
    let mut lambda = vec![0u16; nroots + 1];
    lambda[0] = 1;
    if no_eras > 0 {
        lambda[1] =
            alpha_to[field.modnn(prim as i32 * (nn as i32 - 1 - (eras[0] as i32 + pad))) as usize];
        for i in 1..no_eras {
            let u = field.modnn(prim as i32 * (nn as i32 - 1 - (eras[i] as i32 + pad)));
            for j in (1..=i + 1).rev() {
                let tmp = index_of[lambda[j - 1] as usize];
                if tmp != nn {
                    lambda[j] ^= alpha_to[field.modnn(u as i32 + tmp as i32) as usize];
                }
            }
        }
    }

    let mut b = vec![0u16; nroots + 1];
    for i in 0..=nroots {
        b[i] = index_of[lambda[i] as usize];
    }

    // Berlekamp-Massey, seeded with the erasure locator above.
    let mut r = no_eras as i32;
    let mut el = no_eras as i32;
    let mut t = vec![0u16; nroots + 1];
    loop {
        r += 1;
        if r > nroots as i32 {
            break;
        }
        let ru = r as usize;

        let mut discr_r: u16 = 0;
        for i in 0..ru {
            if lambda[i] != 0 && si[ru - i - 1] != nn {
                discr_r ^=
                    alpha_to[field.modnn(index_of[lambda[i] as usize] as i32 + si[ru - i - 1] as i32) as usize];
            }
        }
        let discr_r_idx = index_of[discr_r as usize];

        if discr_r_idx == nn {
            for j in (1..=nroots).rev() {
                b[j] = b[j - 1];
            }
            b[0] = nn;
        } else {
            t[0] = lambda[0];
            for i in 0..nroots {
                t[i + 1] = if b[i] != nn {
                    lambda[i + 1] ^ alpha_to[field.modnn(discr_r_idx as i32 + b[i] as i32) as usize]
                } else {
                    lambda[i + 1]
                };
            }

            if 2 * el <= r + no_eras as i32 - 1 {
                el = r + no_eras as i32 - el;
                for i in 0..=nroots {
                    b[i] = if lambda[i] == 0 {
                        nn
                    } else {
                        field.modnn(index_of[lambda[i] as usize] as i32 - discr_r_idx as i32 + nn as i32)
                    };
                }
            } else {
                for j in (1..=nroots).rev() {
                    b[j] = b[j - 1];
                }
                b[0] = nn;
            }
            lambda.copy_from_slice(&t);
        }
    }

    let mut deg_lambda = 0usize;
    for i in 0..=nroots {
        lambda[i] = index_of[lambda[i] as usize];
        if lambda[i] != nn {
            deg_lambda = i;
        }
    }
    if deg_lambda == 0 {
        return Err(DecodeError::DegLambdaZero);
    }

    // Chien search: find the roots of lambda(x) by brute-force evaluation at
    // every field element, walked via the primitive element's inverse.
    for i in 1..=nroots {
        b[i] = lambda[i];
    }
    let mut root = vec![0u16; nroots];
    let mut loc = vec![0u16; nroots];
    let mut count = 0usize;
    let mut k: i32 = iprim as i32 - 1;
    let mut i: u32 = 1;
    while i <= nn as u32 {
        let mut q: u16 = 1;
        for j in (1..=deg_lambda).rev() {
            if b[j] != nn {
                b[j] = field.modnn(b[j] as i32 + j as i32);
                q ^= alpha_to[b[j] as usize];
            }
        }
        if q == 0 {
            if k < pad {
                return Err(DecodeError::ImpossibleErrPos);
            }
            root[count] = i as u16;
            loc[count] = k as u16;
            count += 1;
            if count == deg_lambda {
                break;
            }
        }
        i += 1;
        k = field.modnn(k + iprim as i32);
    }
    if deg_lambda != count {
        return Err(DecodeError::DegLambdaNeqCount);
    }

    // Forney: compute the error evaluator omega(x) = s(x)*lambda(x) mod x^nroots,
    // then the correction magnitude at each located root.
    let deg_omega = deg_lambda - 1;
    let mut omega = vec![0u16; nroots + 1];
    for i in 0..=deg_omega {
        let mut tmp: u16 = 0;
        for j in (0..=i).rev() {
            if si[i - j] != nn && lambda[j] != nn {
                tmp ^= alpha_to[field.modnn(si[i - j] as i32 + lambda[j] as i32) as usize];
            }
        }
        omega[i] = index_of[tmp as usize];
    }

    let mut cor = vec![0u16; nroots];
    let mut num_corrected = 0usize;
    let deriv_start = (std::cmp::min(deg_lambda, nroots - 1) as i32) & !1i32;
    for j in 0..count {
        let mut num1: u16 = 0;
        for i in (0..=deg_omega).rev() {
            if omega[i] != nn {
                num1 ^= alpha_to[field.modnn(omega[i] as i32 + i as i32 * root[j] as i32) as usize];
            }
        }
        if num1 == 0 {
            continue;
        }
        let num1_idx = index_of[num1 as usize];
        let num2 = field.modnn(root[j] as i32 * (fcr as i32 - 1) + nn as i32);

        let mut den: u16 = 0;
        let mut i = deriv_start;
        while i >= 0 {
            if lambda[(i + 1) as usize] != nn {
                den ^= alpha_to[field.modnn(lambda[(i + 1) as usize] as i32 + i * root[j] as i32) as usize];
            }
            i -= 2;
        }
        let den_idx = index_of[den as usize];

        cor[num_corrected] = field.modnn(num1_idx as i32 + num2 as i32 + nn as i32 - den_idx as i32);
        loc[num_corrected] = loc[j];
        num_corrected += 1;
    }

    // Re-verify: the syndrome implied by the proposed correction set must
    // match the received word's actual syndrome before we touch `data`.
    for i in 0..nroots {
        let mut tmp: u16 = 0;
        for j in 0..num_corrected {
            let kk = (fcr as i32 + i as i32) * prim as i32 * (nn as i32 - loc[j] as i32 - 1);
            tmp ^= alpha_to[field.modnn(cor[j] as i32 + kk) as usize];
        }
        if tmp != s[i] {
            return Err(DecodeError::NotACodeword);
        }
    }

    for i in 0..num_corrected {
        let position = (loc[i] as i32 - pad) as usize;
        data[position * stride] ^= alpha_to[cor[i] as usize];
    }
    if let Some(out) = err_pos {
        out.clear();
        for i in 0..num_corrected {
            out.push((loc[i] as i32 - pad) as usize);
        }
    }

    Ok(num_corrected)
}

/// Report whether `data` is a codeword of `code`: all `nroots` syndromes are
/// zero.
pub fn is_codeword(code: &Code, data: &[u16], len: usize, stride: usize) -> bool {
    let s = compute_syndrome(code, data, len, stride);
    s.iter().all(|&x| x == 0)
}

fn compute_syndrome(code: &Code, data: &[u16], len: usize, stride: usize) -> Vec<u16> {
    let nroots = code.nroots() as usize;
    let mut s = vec![0u16; nroots];
    if nroots == 0 || len == 0 {
        return s;
    }

    let field = code.field();
    let alpha_to = field.alpha_to();
    let index_of = field.index_of();
    let fcr = code.fcr();
    let prim = code.prim();

    for si in s.iter_mut() {
        *si = data[0];
    }

    let cutoff = len * stride;
    let mut j = stride;
    while j < cutoff {
        let d = data[j];
        for i in 0..nroots {
            if s[i] == 0 {
                s[i] = d;
            } else {
                let tmp = index_of[s[i] as usize] as i32 + (fcr + i as u32) as i32 * prim as i32;
                s[i] = d ^ alpha_to[field.modnn(tmp) as usize];
            }
        }
        j += stride;
    }

    s
}
