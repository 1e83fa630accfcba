//! One-dimensional minimization: downhill bracketing plus Brent's method.
//!
//! These are the line searches underneath [`super::powell::Powell`]. All
//! evaluations are strictly sequential, so results are deterministic for a
//! deterministic cost function, and any error from the cost aborts the
//! search immediately.

use crate::error::Result;

const GOLD: f64 = 1.618_034;
const GROW_LIMIT: f64 = 110.0;
const VERY_SMALL: f64 = 1e-21;
const CGOLD: f64 = 0.381_966_0;
const BRENT_MIN_TOL: f64 = 1e-11;
const BRACKET_MAX_ITER: usize = 1000;

/// A downhill triple `xa < xb < xc` (or reversed) with `f(xb)` below both
/// ends.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Bracket {
    pub xa: f64,
    pub xb: f64,
    pub xc: f64,
    pub fa: f64,
    pub fb: f64,
    pub fc: f64,
}

/// Bracket a minimum of `f`, expanding downhill from `(xa0, xb0)`.
///
/// Uses golden-ratio steps with bounded parabolic extrapolation. The
/// expansion is capped; an unbounded descent direction ends the search at
/// the last triple rather than looping forever.
pub(crate) fn bracket(
    f: &mut impl FnMut(f64) -> Result<f64>,
    xa0: f64,
    xb0: f64,
) -> Result<Bracket> {
    let mut xa = xa0;
    let mut xb = xb0;
    let mut fa = f(xa)?;
    let mut fb = f(xb)?;
    if fa < fb {
        std::mem::swap(&mut xa, &mut xb);
        std::mem::swap(&mut fa, &mut fb);
    }
    let mut xc = xb + GOLD * (xb - xa);
    let mut fc = f(xc)?;

    let mut iter = 0;
    while fc < fb && iter < BRACKET_MAX_ITER {
        iter += 1;

        // Parabolic extrapolation from the current triple.
        let tmp1 = (xb - xa) * (fb - fc);
        let tmp2 = (xb - xc) * (fb - fa);
        let val = tmp2 - tmp1;
        let denom = if val.abs() < VERY_SMALL {
            2.0 * VERY_SMALL
        } else {
            2.0 * val
        };
        let mut w = xb - ((xb - xc) * tmp2 - (xb - xa) * tmp1) / denom;
        let wlim = xb + GROW_LIMIT * (xc - xb);
        let mut fw;

        if (w - xc) * (xb - w) > 0.0 {
            // Parabolic candidate between xb and xc.
            fw = f(w)?;
            if fw < fc {
                xa = xb;
                xb = w;
                fa = fb;
                fb = fw;
                break;
            } else if fw > fb {
                xc = w;
                fc = fw;
                break;
            }
            w = xc + GOLD * (xc - xb);
            fw = f(w)?;
        } else if (w - wlim) * (wlim - xc) >= 0.0 {
            // Candidate beyond the growth limit: clip to it.
            w = wlim;
            fw = f(w)?;
        } else if (w - wlim) * (xc - w) > 0.0 {
            // Candidate between xc and the limit.
            fw = f(w)?;
            if fw < fc {
                xb = xc;
                xc = w;
                w = xc + GOLD * (xc - xb);
                fb = fc;
                fc = fw;
                fw = f(w)?;
            }
        } else {
            w = xc + GOLD * (xc - xb);
            fw = f(w)?;
        }

        xa = xb;
        xb = xc;
        xc = w;
        fa = fb;
        fb = fc;
        fc = fw;
    }

    Ok(Bracket {
        xa,
        xb,
        xc,
        fa,
        fb,
        fc,
    })
}

/// Brent's method on a bracketed minimum.
///
/// Combines successive parabolic interpolation with golden-section
/// fallback steps; `tol` is the relative tolerance on the abscissa.
/// Returns `(xmin, f(xmin))`.
pub(crate) fn brent(
    f: &mut impl FnMut(f64) -> Result<f64>,
    bracket: Bracket,
    tol: f64,
    max_iter: usize,
) -> Result<(f64, f64)> {
    debug_assert!(
        bracket.fb <= bracket.fa && bracket.fb <= bracket.fc,
        "bracket midpoint must be the lowest of the triple"
    );

    let mut x = bracket.xb;
    let mut w = bracket.xb;
    let mut v = bracket.xb;
    let mut fx = bracket.fb;
    let mut fw = bracket.fb;
    let mut fv = bracket.fb;
    let mut a = bracket.xa.min(bracket.xc);
    let mut b = bracket.xa.max(bracket.xc);

    let mut deltax: f64 = 0.0;
    let mut rat: f64 = 0.0;

    for _ in 0..max_iter {
        let tol1 = tol * x.abs() + BRENT_MIN_TOL;
        let tol2 = 2.0 * tol1;
        let xmid = 0.5 * (a + b);

        if (x - xmid).abs() < tol2 - 0.5 * (b - a) {
            break;
        }

        if deltax.abs() <= tol1 {
            // Golden-section step.
            deltax = if x >= xmid { a - x } else { b - x };
            rat = CGOLD * deltax;
        } else {
            // Try a parabolic fit through (x, w, v).
            let tmp1 = (x - w) * (fx - fv);
            let mut tmp2 = (x - v) * (fx - fw);
            let mut p = (x - v) * tmp2 - (x - w) * tmp1;
            tmp2 = 2.0 * (tmp2 - tmp1);
            if tmp2 > 0.0 {
                p = -p;
            }
            tmp2 = tmp2.abs();
            let deltax_prev = deltax;
            deltax = rat;

            let fit_ok = p > tmp2 * (a - x)
                && p < tmp2 * (b - x)
                && p.abs() < (0.5 * tmp2 * deltax_prev).abs();
            if fit_ok {
                rat = p / tmp2;
                let u = x + rat;
                if (u - a) < tol2 || (b - u) < tol2 {
                    rat = if xmid - x >= 0.0 { tol1 } else { -tol1 };
                }
            } else {
                deltax = if x >= xmid { a - x } else { b - x };
                rat = CGOLD * deltax;
            }
        }

        // Never step by less than tol1.
        let u = if rat.abs() >= tol1 {
            x + rat
        } else if rat >= 0.0 {
            x + tol1
        } else {
            x - tol1
        };
        let fu = f(u)?;

        if fu > fx {
            if u < x {
                a = u;
            } else {
                b = u;
            }
            if fu <= fw || w == x {
                v = w;
                w = u;
                fv = fw;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        } else {
            if u >= x {
                a = x;
            } else {
                b = x;
            }
            v = w;
            w = x;
            x = u;
            fv = fw;
            fw = fx;
            fx = fu;
        }
    }

    Ok((x, fx))
}
