//! Matrix kernels for the direct stiffness method

use nalgebra::{DMatrix, DVector, SMatrix, SVector};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;

/// 6x6 matrix for element stiffness (DOFs [u1, v1, th1, u2, v2, th2])
pub type Mat6 = SMatrix<f64, 6, 6>;
/// 6-element vector for element forces/displacements
pub type Vec6 = SVector<f64, 6>;

/// Compute the local stiffness matrix for a planar frame element
///
/// # Arguments
/// * `e` - Modulus of elasticity
/// * `i` - Second moment of area
/// * `a` - Cross-sectional area
/// * `length` - Element length
///
/// # Returns
/// 6x6 local stiffness matrix for DOFs [u1, v1, th1, u2, v2, th2]
pub fn local_stiffness(e: f64, i: f64, a: f64, length: f64) -> Mat6 {
    let l = length;
    let l2 = l * l;
    let l3 = l2 * l;

    let ea_l = e * a / l;
    let ei_l3 = e * i / l3;
    let ei_l2 = e * i / l2;
    let ei_l = e * i / l;

    #[rustfmt::skip]
    let data = [
        // Row 0: axial at start
        ea_l,   0.0,          0.0,         -ea_l,  0.0,          0.0,
        // Row 1: shear at start
        0.0,    12.0*ei_l3,   6.0*ei_l2,   0.0,    -12.0*ei_l3,  6.0*ei_l2,
        // Row 2: moment at start
        0.0,    6.0*ei_l2,    4.0*ei_l,    0.0,    -6.0*ei_l2,   2.0*ei_l,
        // Row 3: axial at end
        -ea_l,  0.0,          0.0,         ea_l,   0.0,          0.0,
        // Row 4: shear at end
        0.0,    -12.0*ei_l3,  -6.0*ei_l2,  0.0,    12.0*ei_l3,   -6.0*ei_l2,
        // Row 5: moment at end
        0.0,    6.0*ei_l2,    2.0*ei_l,    0.0,    -6.0*ei_l2,   4.0*ei_l,
    ];

    Mat6::from_row_slice(&data)
}

/// Compute the global-to-local transformation matrix for an element with the
/// given direction cosines (`cos = dx/L`, `sin = dy/L`).
///
/// `d_local = T * d_global`, `k_global = T^T * k_local * T`.
pub fn transformation_matrix(cos: f64, sin: f64) -> Mat6 {
    let (c, s) = (cos, sin);

    #[rustfmt::skip]
    let data = [
        c,    s,    0.0,  0.0,  0.0,  0.0,
        -s,   c,    0.0,  0.0,  0.0,  0.0,
        0.0,  0.0,  1.0,  0.0,  0.0,  0.0,
        0.0,  0.0,  0.0,  c,    s,    0.0,
        0.0,  0.0,  0.0,  -s,   c,    0.0,
        0.0,  0.0,  0.0,  0.0,  0.0,  1.0,
    ];

    Mat6::from_row_slice(&data)
}

/// Equivalent nodal load vector, in local coordinates, for a uniform
/// transverse load of intensity `w` over the full element length.
///
/// End shears `wL/2` and end moments `±wL²/12`, counter-clockwise positive.
/// The vector is added to the global load vector after rotation; its negative
/// is the fixed-end force vector used during force recovery.
pub fn equivalent_uniform_load(w: f64, length: f64) -> Vec6 {
    let l = length;
    let l2 = l * l;

    let mut q = Vec6::zeros();
    q[1] = w * l / 2.0;
    q[2] = w * l2 / 12.0;
    q[4] = w * l / 2.0;
    q[5] = -w * l2 / 12.0;
    q
}

/// Solve a dense linear system by LU decomposition, returning the solution
/// together with a pivot-ratio conditioning estimate (smallest to largest
/// pivot magnitude). `None` means the matrix is exactly singular.
pub fn solve_with_condition(a: &Mat, b: &Vec) -> Option<(Vec, f64)> {
    let lu = a.clone().lu();
    let u = lu.u();

    let mut min_pivot = f64::INFINITY;
    let mut max_pivot = 0.0_f64;
    for k in 0..u.nrows().min(u.ncols()) {
        let p = u[(k, k)].abs();
        min_pivot = min_pivot.min(p);
        max_pivot = max_pivot.max(p);
    }
    if max_pivot == 0.0 {
        return None;
    }

    let x = lu.solve(b)?;
    Some((x, min_pivot / max_pivot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_local_stiffness_symmetry() {
        let k = local_stiffness(29000.0, 510.0, 14.6, 10.0);
        for i in 0..6 {
            for j in 0..6 {
                assert_relative_eq!(k[(i, j)], k[(j, i)], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_local_stiffness_axial_term() {
        let k = local_stiffness(200.0, 1.0, 0.5, 4.0);
        assert_relative_eq!(k[(0, 0)], 200.0 * 0.5 / 4.0, epsilon = 1e-12);
        assert_relative_eq!(k[(0, 3)], -25.0, epsilon = 1e-12);
    }

    #[test]
    fn test_transformation_is_orthogonal() {
        let theta: f64 = 0.7;
        let t = transformation_matrix(theta.cos(), theta.sin());
        let identity = t.transpose() * t;
        for i in 0..6 {
            for j in 0..6 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(identity[(i, j)], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_equivalent_uniform_load_totals() {
        let q = equivalent_uniform_load(-1.0, 20.0);
        // End shears sum to the total load
        assert_relative_eq!(q[1] + q[4], -20.0, epsilon = 1e-12);
        // End moments cancel
        assert_relative_eq!(q[2] + q[5], 0.0, epsilon = 1e-12);
        assert_relative_eq!(q[2], -400.0 / 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_with_condition_detects_singularity() {
        let a = Mat::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let b = Vec::from_vec(vec![1.0, 2.0]);
        match solve_with_condition(&a, &b) {
            None => {}
            Some((_, cond)) => assert!(cond < 1e-12),
        }
    }

    #[test]
    fn test_solve_well_conditioned() {
        let a = Mat::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 3.0]);
        let b = Vec::from_vec(vec![4.0, 9.0]);
        let (x, cond) = solve_with_condition(&a, &b).unwrap();
        assert_relative_eq!(x[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-12);
        assert!(cond > 0.5);
    }
}
