//! Quadratic and cubic real-root solvers used by the Bézier closest-point
//! queries in [`crate::edge_segment`].
//!
//! Degradation between solver tiers (cubic -> quadratic -> linear -> no
//! solution) is decided by the *ratio* between leading coefficients rather
//! than an absolute epsilon, grounded on
//! `original_source/core/equation-solver.cpp`'s `LARGE_RATIO` constant
//! (spec §9: "changing this threshold shifts which inputs are treated as
//! degenerate by about 1e10").

const LARGE_RATIO: f64 = 1e10;

pub fn fabs(v: f64) -> f64 {
    v.abs()
}

/// Returns `(-1, _)` for "every real number is a root", `(n, roots)` otherwise.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> (i32, [f64; 3]) {
    let mut result = [0.0; 3];

    if a == 0.0 || b.abs() > LARGE_RATIO * a.abs() {
        if b == 0.0 {
            if c == 0.0 {
                return (-1, result);
            }
            return (0, result);
        }
        result[0] = -c / b;
        return (1, result);
    }

    let mut dscr = b * b - 4.0 * a * c;
    if dscr > 0.0 {
        dscr = dscr.sqrt();
        result[0] = (-b + dscr) / (2.0 * a);
        result[1] = (-b - dscr) / (2.0 * a);
        (2, result)
    } else if dscr == 0.0 {
        result[0] = -b / (2.0 * a);
        (1, result)
    } else {
        (0, result)
    }
}

/// Cardano/trigonometric solve of `t^3 + a*t^2 + b*t + c = 0`.
pub fn solve_cubic_norm(mut a: f64, b: f64, c: f64) -> (i32, [f64; 3]) {
    let mut result = [0.0; 3];
    let a2 = a * a;
    let mut q = (a2 - 3.0 * b) / 9.0;
    let r = (a * (2.0 * a2 - 9.0 * b) + 27.0 * c) / 54.0;
    let r2 = r * r;
    let q3 = q * q * q;

    if r2 < q3 {
        let mut t = r / q3.sqrt();
        t = t.clamp(-1.0, 1.0);
        t = t.acos();
        a /= 3.0;
        q = -2.0 * q.sqrt();
        result[0] = q * (t / 3.0).cos() - a;
        result[1] = q * ((t + 2.0 * std::f64::consts::PI) / 3.0).cos() - a;
        result[2] = q * ((t - 2.0 * std::f64::consts::PI) / 3.0).cos() - a;
        (3, result)
    } else {
        let mut u = -(r.abs() + (r2 - q3).sqrt()).powf(1.0 / 3.0);
        if r < 0.0 {
            u = -u;
        }
        let v = if u == 0.0 { 0.0 } else { q / u };
        a /= 3.0;
        result[0] = (u + v) - a;
        result[1] = -0.5 * (u + v) - a;
        result[2] = 0.5 * 3.0f64.sqrt() * (u - v);
        if result[2].abs() < 1e-14 {
            (2, result)
        } else {
            (1, result)
        }
    }
}

/// Solves `a*t^3 + b*t^2 + c*t + d = 0`, degrading to a quadratic/linear
/// solve when `a` is negligible relative to `b` (see module docs).
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> (i32, [f64; 3]) {
    if a == 0.0 {
        return solve_quadratic(b, c, d);
    }
    let bn = b / a;
    if bn * bn > LARGE_RATIO {
        return solve_quadratic(b, c, d);
    }
    solve_cubic_norm(b / a, c / a, d / a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_two_roots() {
        // t^2 - 3t + 2 = 0 -> t = 1, 2
        let (n, roots) = solve_quadratic(1.0, -3.0, 2.0);
        assert_eq!(n, 2);
        let mut r = roots[..2].to_vec();
        r.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((r[0] - 1.0).abs() < 1e-9);
        assert!((r[1] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn cubic_degrades_to_quadratic_for_negligible_leading_term() {
        let (n, roots) = solve_cubic(1e-20, 1.0, -3.0, 2.0);
        assert_eq!(n, 2);
        let mut r = roots[..2].to_vec();
        r.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((r[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cubic_three_real_roots() {
        // (t-1)(t-2)(t-3) = t^3 -6t^2+11t-6
        let (n, roots) = solve_cubic(1.0, -6.0, 11.0, -6.0);
        assert_eq!(n, 3);
        let mut r = roots[..3].to_vec();
        r.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((r[0] - 1.0).abs() < 1e-9);
        assert!((r[1] - 2.0).abs() < 1e-9);
        assert!((r[2] - 3.0).abs() < 1e-9);
    }
}
