use crate::algebra::*;

#[test]
fn test_copy_from() {
    let x = vec![3., 0., 2., 1.];
    let mut y = vec![0.; 4];
    y.copy_from(&x);
    assert_eq!(x, y);
}

#[test]
fn test_dot() {
    let x = [1., 2., 3., 4.];
    let y = [4., 3., 2., -1.];
    assert_eq!(x.dot(&y), 12.);
}

#[test]
fn test_pairwise_dot_long() {
    // long enough to exercise the recursive accumulator
    let x: Vec<f64> = (1..=100).map(|i| i as f64).collect();
    assert_eq!(x.dot(&vec![1.; 100]), 5050.);
}

#[test]
fn test_norms() {
    let x = [-3., 1., 2.];
    let y = [1., 1., -5.];
    assert_eq!(x.norm_inf(), 3.);
    assert_eq!(x.norm_inf_diff(&y), 7.);
    assert!(vec![1., f64::NAN].norm_inf().is_nan());
    assert!(x.is_finite());
    assert!(!vec![1., f64::INFINITY].is_finite());
}

#[test]
fn test_axpby() {
    let x = vec![1., 2., 3.];
    let mut y = vec![-1., 0., 1.];
    y.axpby(2., &x, 3.);
    assert_eq!(y, vec![-1., 4., 9.]);
}
