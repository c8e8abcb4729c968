//! End-to-end tests of the real-scalar decomposition path.

use eigenum::{eigvals, schur, Complex, Matrix, Schur, SchurOptions};

const TOL: f64 = 1e-10;

fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
    assert!(
        (a - b).abs() < tol,
        "{}: {} vs {} (diff {})",
        msg,
        a,
        b,
        (a - b).abs()
    );
}

/// Similarity, orthogonality, and quasi-triangular shape, scaled by the
/// input magnitude.
fn verify(a: &Matrix<f64>, dec: &Schur<f64>) {
    let n = a.nrows();
    let t = dec.schur_form();
    let q = dec.schur_vectors().expect("Z requested");
    let anorm = a.frobenius_norm().max(1.0);

    let recon = &(q * t) * &q.transpose();
    let diff = &recon - a;
    assert!(
        diff.frobenius_norm() <= 1e-13 * (n as f64) * anorm,
        "similarity residual {}",
        diff.frobenius_norm()
    );

    let qtq = &q.transpose() * q;
    let id = Matrix::eye(n, 0.0_f64);
    let qdiff = &qtq - &id;
    assert!(
        qdiff.frobenius_norm() <= 1e-13 * (n as f64),
        "orthogonality residual {}",
        qdiff.frobenius_norm()
    );

    for i in 0..n {
        for j in 0..i.saturating_sub(1) {
            assert!(
                t[(i, j)].abs() <= 1e-13 * anorm,
                "T[({},{})] = {} below the subdiagonal",
                i,
                j,
                t[(i, j)]
            );
        }
    }
}

#[test]
fn scalar_1x1() {
    let a = Matrix::from_rows(1, 1, &[7.0_f64]);
    let dec = a.schur().unwrap();
    assert_eq!(dec.schur_form()[(0, 0)], 7.0);
    assert_eq!(dec.schur_vectors().unwrap()[(0, 0)], 1.0);
    assert_near(dec.eigenvalues()[0].re, 7.0, TOL, "w");
}

#[test]
fn rotation_2x2_conjugate_pair() {
    let a = Matrix::from_rows(2, 2, &[0.0_f64, 1.0, -1.0, 0.0]);
    let dec = a.schur().unwrap();
    verify(&a, &dec);

    // irreducible over the reals: the 2x2 block survives
    assert!(dec.schur_form()[(1, 0)].abs() > 0.5);

    let w = dec.eigenvalues();
    let mut ims = [w[0].im, w[1].im];
    ims.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_near(w[0].re, 0.0, TOL, "re");
    assert_near(w[1].re, 0.0, TOL, "re");
    assert_near(ims[0], -1.0, TOL, "im");
    assert_near(ims[1], 1.0, TOL, "im");
}

#[test]
fn near_triangular_3x3() {
    let a = Matrix::from_rows(
        3,
        3,
        &[5.0_f64, 0.3, -0.2, 1e-12, 2.0, 0.4, -1e-13, 1e-12, 9.0],
    );
    let dec = a.schur().unwrap();
    verify(&a, &dec);

    let mut re: Vec<f64> = dec.eigenvalues().iter().map(|z| z.re).collect();
    re.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_near(re[0], 2.0, 1e-9, "λ0");
    assert_near(re[1], 5.0, 1e-9, "λ1");
    assert_near(re[2], 9.0, 1e-9, "λ2");
}

#[test]
fn companion_quartic_roots_of_unity() {
    // companion matrix of x^4 - 1: eigenvalues are the 4th roots of unity
    let a = Matrix::from_rows(
        4,
        4,
        &[
            0.0_f64, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0,
        ],
    );
    let dec = a.schur().unwrap();
    verify(&a, &dec);

    let mut w: Vec<Complex<f64>> = dec.eigenvalues().to_vec();
    w.sort_by(|x, y| {
        x.re.partial_cmp(&y.re)
            .unwrap()
            .then(x.im.partial_cmp(&y.im).unwrap())
    });
    let expected = [
        Complex::new(-1.0, 0.0),
        Complex::new(0.0, -1.0),
        Complex::new(0.0, 1.0),
        Complex::new(1.0, 0.0),
    ];
    for (got, want) in w.iter().zip(expected.iter()) {
        assert!(
            (got - want).norm() < TOL,
            "root {:?} vs {:?}",
            got,
            want
        );
    }
}

#[test]
fn hilbert_5x5_spectrum() {
    let a = Matrix::from_fn(5, 5, |i, j| 1.0 / ((i + j + 1) as f64));
    let dec = a.schur().unwrap();
    verify(&a, &dec);

    let w = dec.eigenvalues();

    // symmetric input: the spectrum is real
    for z in w {
        assert_near(z.im, 0.0, TOL, "imag part");
    }

    let mut re: Vec<f64> = w.iter().map(|z| z.re).collect();
    re.sort_by(|a, b| a.partial_cmp(b).unwrap());

    // exact trace: 1 + 1/3 + 1/5 + 1/7 + 1/9 = 563/315
    let sum: f64 = re.iter().sum();
    assert_near(sum, 563.0 / 315.0, TOL, "trace");

    // exact determinant of the 5x5 Hilbert matrix: 1/266716800000
    let prod: f64 = re.iter().product();
    let det = 1.0 / 266716800000.0;
    assert!(
        (prod / det - 1.0).abs() < 1e-6,
        "determinant: {} vs {}",
        prod,
        det
    );

    assert!(re[0] > 0.0, "positive definite spectrum");
    assert_near(re[4], 1.567050691098, 1e-9, "largest eigenvalue");
}

#[test]
fn backward_stability_8x8() {
    // deterministic full matrix with mixed real and complex eigenvalues
    let a = Matrix::from_fn(8, 8, |i, j| {
        let k = (7 * i + 3 * j + 2) % 13;
        k as f64 - 6.0 + if i == j { 4.0 } else { 0.0 }
    });
    let dec = a.schur().unwrap();
    verify(&a, &dec);

    let sum_re: f64 = dec.eigenvalues().iter().map(|z| z.re).sum();
    let sum_im: f64 = dec.eigenvalues().iter().map(|z| z.im).sum();
    assert_near(sum_re, a.trace(), 1e-9, "trace");
    assert_near(sum_im, 0.0, 1e-9, "conjugate pairing");

    // every surviving subdiagonal entry belongs to a 2x2 block whose
    // eigenvalue pair matches the block's trace and determinant
    let t = dec.schur_form();
    let w = dec.eigenvalues();
    let mut i = 0;
    while i < 8 {
        let coupled = i + 1 < 8
            && t[(i + 1, i)].abs() >= f64::EPSILON * (t[(i, i)].abs() + t[(i + 1, i + 1)].abs());
        if coupled {
            let btr = t[(i, i)] + t[(i + 1, i + 1)];
            let bdet = t[(i, i)] * t[(i + 1, i + 1)] - t[(i, i + 1)] * t[(i + 1, i)];
            assert_near(w[i].re + w[i + 1].re, btr, 1e-9, "block trace");
            assert_near(w[i].im + w[i + 1].im, 0.0, 1e-9, "pair conjugacy");
            assert_near((w[i] * w[i + 1]).re, bdet, 1e-8, "block determinant");
            i += 2;
        } else {
            i += 1;
        }
    }
}

#[test]
fn eigvals_skips_z_same_spectrum() {
    let a = Matrix::from_rows(
        4,
        4,
        &[
            2.0_f64, -1.0, 0.5, 0.0, 1.0, 3.0, 1.0, -1.0, 0.0, 2.0, -2.0, 1.0, 0.0, 0.0, 1.0,
            4.0,
        ],
    );
    let dec = a.schur().unwrap();
    let w = eigvals(&a, &SchurOptions::default()).unwrap();
    for (x, y) in dec.eigenvalues().iter().zip(w.iter()) {
        assert!((x - y).norm() < TOL);
    }
}

#[test]
fn scale_invariance_banding() {
    // magnitudes far below the iteration's underflow guards: the
    // banding rescales, iterates, and scales back
    let base = Matrix::from_rows(3, 3, &[1.0_f64, 2.0, 0.0, -1.0, 1.0, 1.0, 0.0, 3.0, 2.0]);
    let alpha = 1e-160;
    let tiny = &base * alpha;

    let w_base = eigvals(&base, &SchurOptions::default()).unwrap();
    let w_tiny = eigvals(&tiny, &SchurOptions::default()).unwrap();

    let mut base_sorted: Vec<Complex<f64>> = w_base.clone();
    let mut tiny_sorted: Vec<Complex<f64>> = w_tiny.clone();
    base_sorted.sort_by(|x, y| x.re.partial_cmp(&y.re).unwrap());
    tiny_sorted.sort_by(|x, y| x.re.partial_cmp(&y.re).unwrap());

    for (&b, &t) in base_sorted.iter().zip(tiny_sorted.iter()) {
        assert!(
            (t / alpha - b).norm() < 1e-6,
            "scaled eigenvalue {:?} vs {:?}",
            t,
            b
        );
    }
}

#[test]
fn schur_without_scaling_agrees() {
    let a = Matrix::from_rows(3, 3, &[4.0_f64, 1.0, 0.0, 2.0, 3.0, 1.0, 0.0, 1.0, 2.0]);
    let mut opts = SchurOptions::default();
    opts.scale = false;
    let w_off = eigvals(&a, &opts).unwrap();
    let w_on = a.eigenvalues().unwrap();
    for (x, y) in w_off.iter().zip(w_on.iter()) {
        assert!((x - y).norm() < TOL);
    }
}

#[test]
fn schur_free_function_matches_method() {
    let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    let d1 = schur(&a, &SchurOptions::default()).unwrap();
    let d2 = a.schur().unwrap();
    for i in 0..2 {
        for j in 0..2 {
            assert_near(
                d1.schur_form()[(i, j)],
                d2.schur_form()[(i, j)],
                TOL,
                "T entries",
            );
        }
    }
}
