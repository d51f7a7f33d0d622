//! Kernel-native rational B-spline surface.

use crate::error::{BrepError, Result};
use surfio_math::Point3;
use surfio_nurbs::Direction;

// =============================================================================
// Knot span utilities
// =============================================================================

/// Find the knot span index for parameter `t`.
///
/// Returns `i` such that `knots[i] <= t < knots[i+1]`, clamped to the
/// valid range. For `t` at the end of the domain, returns the last span.
fn find_span(knots: &[f64], n: usize, degree: usize, t: f64) -> usize {
    // n = number of poles - 1 (last index)
    if t >= knots[n + 1] {
        return n;
    }
    if t <= knots[degree] {
        return degree;
    }
    let mut low = degree;
    let mut high = n + 1;
    let mut mid = (low + high) / 2;
    while t < knots[mid] || t >= knots[mid + 1] {
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }
    mid
}

/// Compute the `degree + 1` non-zero basis function values at `t`.
fn basis_functions(knots: &[f64], span: usize, degree: usize, t: f64) -> Vec<f64> {
    let mut n = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];
    n[0] = 1.0;

    for j in 1..=degree {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;
        for r in 0..j {
            let denom = right[r + 1] + left[j - r];
            if denom.abs() < 1e-30 {
                // Zero-length knot interval — avoid division by zero
                n[j] = saved;
                continue;
            }
            let temp = n[r] / denom;
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n[j] = saved;
    }

    n
}

/// Rebuild the expanded knot vector from unique values and multiplicities.
fn expand_knots(knots: &[f64], mults: &[usize]) -> Vec<f64> {
    let total: usize = mults.iter().sum();
    let mut flat = Vec::with_capacity(total);
    for (&k, &m) in knots.iter().zip(mults) {
        for _ in 0..m {
            flat.push(k);
        }
    }
    flat
}

// =============================================================================
// Surface
// =============================================================================

/// A rational tensor-product B-spline surface in kernel form.
///
/// Poles are stored row-major as `poles[u_idx * n_v + v_idx]` with a
/// parallel weight array; knots are held as unique values plus
/// multiplicities. Construction re-checks the kernel invariants, so an
/// instance is always evaluable.
#[derive(Debug, Clone)]
pub struct BsplineSurface {
    poles: Vec<Point3>,
    weights: Vec<f64>,
    n_u: usize,
    n_v: usize,
    knots_u: Vec<f64>,
    mults_u: Vec<usize>,
    knots_v: Vec<f64>,
    mults_v: Vec<usize>,
    degree_u: usize,
    degree_v: usize,
    // Expanded knot vectors, cached for span search.
    flat_u: Vec<f64>,
    flat_v: Vec<f64>,
}

impl BsplineSurface {
    /// Create a surface from dehomogenized poles and a parallel weight
    /// array, plus unique knots with multiplicities per direction.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        poles: Vec<Point3>,
        weights: Vec<f64>,
        n_u: usize,
        n_v: usize,
        knots_u: Vec<f64>,
        mults_u: Vec<usize>,
        knots_v: Vec<f64>,
        mults_v: Vec<usize>,
        degree_u: usize,
        degree_v: usize,
    ) -> Result<Self> {
        if degree_u == 0 {
            return Err(BrepError::ZeroDegree {
                direction: Direction::U,
            });
        }
        if degree_v == 0 {
            return Err(BrepError::ZeroDegree {
                direction: Direction::V,
            });
        }
        let expected = n_u * n_v;
        if expected == 0 || poles.len() != expected {
            return Err(BrepError::GridMismatch {
                expected,
                actual: poles.len(),
            });
        }
        if weights.len() != expected {
            return Err(BrepError::GridMismatch {
                expected,
                actual: weights.len(),
            });
        }
        if let Some(index) = weights.iter().position(|&w| w <= 0.0) {
            return Err(BrepError::NonPositiveWeight { index });
        }
        check_knots(Direction::U, &knots_u, &mults_u, n_u, degree_u)?;
        check_knots(Direction::V, &knots_v, &mults_v, n_v, degree_v)?;

        let flat_u = expand_knots(&knots_u, &mults_u);
        let flat_v = expand_knots(&knots_v, &mults_v);
        Ok(Self {
            poles,
            weights,
            n_u,
            n_v,
            knots_u,
            mults_u,
            knots_v,
            mults_v,
            degree_u,
            degree_v,
            flat_u,
            flat_v,
        })
    }

    /// Number of poles in u.
    pub fn n_u(&self) -> usize {
        self.n_u
    }

    /// Number of poles in v.
    pub fn n_v(&self) -> usize {
        self.n_v
    }

    /// Degree in u.
    pub fn degree_u(&self) -> usize {
        self.degree_u
    }

    /// Degree in v.
    pub fn degree_v(&self) -> usize {
        self.degree_v
    }

    /// Unique knot values in u.
    pub fn knots_u(&self) -> &[f64] {
        &self.knots_u
    }

    /// Multiplicities matching [`Self::knots_u`].
    pub fn mults_u(&self) -> &[usize] {
        &self.mults_u
    }

    /// Unique knot values in v.
    pub fn knots_v(&self) -> &[f64] {
        &self.knots_v
    }

    /// Multiplicities matching [`Self::knots_v`].
    pub fn mults_v(&self) -> &[usize] {
        &self.mults_v
    }

    /// Expanded (repeated-value) knot vector in u.
    pub fn knots_expanded_u(&self) -> &[f64] {
        &self.flat_u
    }

    /// Expanded (repeated-value) knot vector in v.
    pub fn knots_expanded_v(&self) -> &[f64] {
        &self.flat_v
    }

    /// Pole position at `(u_idx, v_idx)`.
    pub fn pole(&self, u_idx: usize, v_idx: usize) -> Point3 {
        self.poles[u_idx * self.n_v + v_idx]
    }

    /// Weight at `(u_idx, v_idx)`.
    pub fn weight(&self, u_idx: usize, v_idx: usize) -> f64 {
        self.weights[u_idx * self.n_v + v_idx]
    }

    /// True when every weight equals the first, i.e. the surface is an
    /// ordinary (non-rational) B-spline.
    pub fn is_polynomial(&self) -> bool {
        self.weights.windows(2).all(|w| w[0] == w[1])
    }

    /// Parameter rectangle `(u0, u1, v0, v1)` spanned by the knots.
    pub fn domain(&self) -> (f64, f64, f64, f64) {
        (
            self.flat_u[self.degree_u],
            self.flat_u[self.n_u],
            self.flat_v[self.degree_v],
            self.flat_v[self.n_v],
        )
    }

    /// Evaluate the surface point at `(u, v)`.
    ///
    /// Accumulates in homogeneous space (basis times weighted pole) and
    /// divides by the accumulated weight, clamping parameters to the
    /// domain.
    pub fn evaluate(&self, u: f64, v: f64) -> Point3 {
        let nu = self.n_u - 1;
        let nv = self.n_v - 1;
        let u = u.clamp(self.flat_u[self.degree_u], self.flat_u[nu + 1]);
        let v = v.clamp(self.flat_v[self.degree_v], self.flat_v[nv + 1]);

        let span_u = find_span(&self.flat_u, nu, self.degree_u, u);
        let span_v = find_span(&self.flat_v, nv, self.degree_v, v);
        let basis_u = basis_functions(&self.flat_u, span_u, self.degree_u, u);
        let basis_v = basis_functions(&self.flat_v, span_v, self.degree_v, v);

        let mut hx = 0.0;
        let mut hy = 0.0;
        let mut hz = 0.0;
        let mut hw = 0.0;

        for (i, &bu) in basis_u.iter().enumerate() {
            let u_idx = span_u - self.degree_u + i;
            for (j, &bv) in basis_v.iter().enumerate() {
                let v_idx = span_v - self.degree_v + j;
                let idx = u_idx * self.n_v + v_idx;
                let b = bu * bv * self.weights[idx];
                let p = &self.poles[idx];
                hx += b * p.x;
                hy += b * p.y;
                hz += b * p.z;
                hw += b;
            }
        }

        if hw.abs() < 1e-30 {
            Point3::origin()
        } else {
            Point3::new(hx / hw, hy / hw, hz / hw)
        }
    }
}

fn check_knots(
    direction: Direction,
    knots: &[f64],
    mults: &[usize],
    n: usize,
    degree: usize,
) -> Result<()> {
    if degree >= n {
        // Evaluation needs at least degree + 1 poles; the knot law can
        // still balance below that.
        return Err(BrepError::DegreeTooLarge {
            direction,
            degree,
            poles: n,
        });
    }
    if knots.len() != mults.len() || knots.is_empty() {
        return Err(BrepError::MultiplicityCount { direction });
    }
    for pair in knots.windows(2) {
        if pair[1] <= pair[0] {
            return Err(BrepError::UnsortedKnots { direction });
        }
    }
    let expected = n + degree + 1;
    let actual: usize = mults.iter().sum();
    if actual != expected {
        return Err(BrepError::KnotLaw {
            direction,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_weights(n: usize) -> Vec<f64> {
        vec![1.0; n]
    }

    fn bilinear() -> BsplineSurface {
        // 2x2 grid over [0,1]^2
        let poles = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 10.0, 0.0),
        ];
        BsplineSurface::new(
            poles,
            unit_weights(4),
            2,
            2,
            vec![0.0, 1.0],
            vec![2, 2],
            vec![0.0, 1.0],
            vec![2, 2],
            1,
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_find_span() {
        let knots = vec![0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0];
        // 4 poles, degree 2, n = 3
        assert_eq!(find_span(&knots, 3, 2, 0.0), 2);
        assert_eq!(find_span(&knots, 3, 2, 0.25), 2);
        assert_eq!(find_span(&knots, 3, 2, 0.5), 3);
        assert_eq!(find_span(&knots, 3, 2, 1.0), 3);
    }

    #[test]
    fn test_basis_partition_of_unity() {
        let knots = vec![0.0, 0.0, 0.0, 0.25, 0.5, 0.75, 1.0, 1.0, 1.0];
        let degree = 2;
        let n = 5;
        for i in 0..=20 {
            let t = (i as f64 / 20.0).clamp(knots[degree], knots[n + 1]);
            let span = find_span(&knots, n, degree, t);
            let basis = basis_functions(&knots, span, degree, t);
            let sum: f64 = basis.iter().sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_bilinear_corners_and_center() {
        let surf = bilinear();
        let p00 = surf.evaluate(0.0, 0.0);
        assert_relative_eq!((p00 - Point3::new(0.0, 0.0, 0.0)).norm(), 0.0, epsilon = 1e-10);
        let p11 = surf.evaluate(1.0, 1.0);
        assert_relative_eq!((p11 - Point3::new(10.0, 10.0, 0.0)).norm(), 0.0, epsilon = 1e-10);
        let mid = surf.evaluate(0.5, 0.5);
        assert_relative_eq!((mid - Point3::new(5.0, 5.0, 0.0)).norm(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_biquadratic_interpolates_corners() {
        // 3x3 grid, center pole lifted in z
        let mut poles = Vec::new();
        for u in 0..3 {
            for v in 0..3 {
                let z = if u == 1 && v == 1 { 5.0 } else { 0.0 };
                poles.push(Point3::new(u as f64 * 5.0, v as f64 * 5.0, z));
            }
        }
        let surf = BsplineSurface::new(
            poles,
            unit_weights(9),
            3,
            3,
            vec![0.0, 1.0],
            vec![3, 3],
            vec![0.0, 1.0],
            vec![3, 3],
            2,
            2,
        )
        .unwrap();

        let p00 = surf.evaluate(0.0, 0.0);
        assert_relative_eq!((p00 - Point3::new(0.0, 0.0, 0.0)).norm(), 0.0, epsilon = 1e-10);
        let p11 = surf.evaluate(1.0, 1.0);
        assert_relative_eq!((p11 - Point3::new(10.0, 10.0, 0.0)).norm(), 0.0, epsilon = 1e-10);
        let mid = surf.evaluate(0.5, 0.5);
        assert!(mid.z > 0.0, "center z should be lifted: {}", mid.z);
    }

    #[test]
    fn test_rational_quarter_circle() {
        // Quadratic arc in u (weights 1, cos45, 1) extruded along v:
        // every u sample lies on the radius-5 circle.
        let w = std::f64::consts::FRAC_1_SQRT_2;
        let poles = vec![
            Point3::new(5.0, 0.0, 0.0),
            Point3::new(5.0, 0.0, 1.0),
            Point3::new(5.0, 5.0, 0.0),
            Point3::new(5.0, 5.0, 1.0),
            Point3::new(0.0, 5.0, 0.0),
            Point3::new(0.0, 5.0, 1.0),
        ];
        let weights = vec![1.0, 1.0, w, w, 1.0, 1.0];
        let surf = BsplineSurface::new(
            poles,
            weights,
            3,
            2,
            vec![0.0, 1.0],
            vec![3, 3],
            vec![0.0, 1.0],
            vec![2, 2],
            2,
            1,
        )
        .unwrap();

        assert!(!surf.is_polynomial());
        for i in 0..=10 {
            let u = i as f64 / 10.0;
            let p = surf.evaluate(u, 0.0);
            let r = (p.x * p.x + p.y * p.y).sqrt();
            assert_relative_eq!(r, 5.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_unit_weights_are_polynomial() {
        assert!(bilinear().is_polynomial());
    }

    #[test]
    fn test_domain_spans_knot_extremes() {
        let surf = bilinear();
        assert_eq!(surf.domain(), (0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn test_grid_mismatch_rejected() {
        let result = BsplineSurface::new(
            vec![Point3::origin(); 3],
            unit_weights(3),
            2,
            2,
            vec![0.0, 1.0],
            vec![2, 2],
            vec![0.0, 1.0],
            vec![2, 2],
            1,
            1,
        );
        assert!(matches!(
            result,
            Err(BrepError::GridMismatch {
                expected: 4,
                actual: 3,
            })
        ));
    }

    #[test]
    fn test_knot_law_rejected() {
        let result = BsplineSurface::new(
            vec![Point3::origin(); 4],
            unit_weights(4),
            2,
            2,
            vec![0.0, 0.5, 1.0],
            vec![2, 1, 2],
            vec![0.0, 1.0],
            vec![2, 2],
            1,
            1,
        );
        assert!(matches!(
            result,
            Err(BrepError::KnotLaw {
                direction: Direction::U,
                expected: 4,
                actual: 5,
            })
        ));
    }

    #[test]
    fn test_non_positive_weight_rejected() {
        let result = BsplineSurface::new(
            vec![Point3::origin(); 4],
            vec![1.0, 1.0, 0.0, 1.0],
            2,
            2,
            vec![0.0, 1.0],
            vec![2, 2],
            vec![0.0, 1.0],
            vec![2, 2],
            1,
            1,
        );
        assert!(matches!(
            result,
            Err(BrepError::NonPositiveWeight { index: 2 })
        ));
    }

    #[test]
    fn test_unsorted_unique_knots_rejected() {
        let result = BsplineSurface::new(
            vec![Point3::origin(); 4],
            unit_weights(4),
            2,
            2,
            vec![1.0, 0.0],
            vec![2, 2],
            vec![0.0, 1.0],
            vec![2, 2],
            1,
            1,
        );
        assert!(matches!(
            result,
            Err(BrepError::UnsortedKnots {
                direction: Direction::U,
            })
        ));
    }

    #[test]
    fn test_degree_not_below_pole_count_rejected() {
        // Multiplicities sum to n + degree + 1 in both cases, but one
        // pole (or degree-many poles) cannot carry a quadratic span.
        let result = BsplineSurface::new(
            vec![Point3::origin(); 2],
            unit_weights(2),
            1,
            2,
            vec![0.0, 1.0],
            vec![2, 2],
            vec![0.0, 1.0],
            vec![2, 2],
            2,
            1,
        );
        assert!(matches!(
            result,
            Err(BrepError::DegreeTooLarge {
                direction: Direction::U,
                degree: 2,
                poles: 1,
            })
        ));

        let result = BsplineSurface::new(
            vec![Point3::origin(); 4],
            unit_weights(4),
            2,
            2,
            vec![0.0, 1.0],
            vec![3, 2],
            vec![0.0, 1.0],
            vec![2, 2],
            2,
            1,
        );
        assert!(matches!(
            result,
            Err(BrepError::DegreeTooLarge {
                direction: Direction::U,
                degree: 2,
                poles: 2,
            })
        ));
    }
}
