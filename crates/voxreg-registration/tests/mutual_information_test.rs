use burn::tensor::{Shape, Tensor, TensorData};
use burn_ndarray::NdArray;
use proptest::prelude::*;
use voxreg_registration::mutual_information;

type B = NdArray<f32>;

const SIDE: usize = 4;
const COUNT: usize = SIDE * SIDE * SIDE;

fn volume(data: Vec<f32>) -> Tensor<B, 3> {
    let device = Default::default();
    Tensor::from_data(TensorData::new(data, Shape::new([SIDE, SIDE, SIDE])), &device)
}

proptest! {
    #[test]
    fn mi_is_symmetric(
        a in prop::collection::vec(0.0f32..1.0, COUNT),
        b in prop::collection::vec(0.0f32..1.0, COUNT),
        nbins in 2usize..17,
    ) {
        let va = volume(a);
        let vb = volume(b);
        let ab = mutual_information(&va, &vb, nbins).unwrap();
        let ba = mutual_information(&vb, &va, nbins).unwrap();
        prop_assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn mi_is_maximized_by_self(
        a in prop::collection::vec(0.0f32..1.0, COUNT),
        b in prop::collection::vec(0.0f32..1.0, COUNT),
        nbins in 2usize..17,
    ) {
        let va = volume(a);
        let vb = volume(b);
        let self_mi = mutual_information(&va, &va, nbins).unwrap();
        let cross_mi = mutual_information(&va, &vb, nbins).unwrap();
        prop_assert!(self_mi + 1e-9 >= cross_mi);
    }

    #[test]
    fn mi_is_nonnegative(
        a in prop::collection::vec(0.0f32..1.0, COUNT),
        b in prop::collection::vec(0.0f32..1.0, COUNT),
        nbins in 2usize..17,
    ) {
        let va = volume(a);
        let vb = volume(b);
        let mi = mutual_information(&va, &vb, nbins).unwrap();
        prop_assert!(mi >= -1e-12);
    }
}

#[test]
fn test_constant_pair_has_zero_information() {
    // A single populated histogram cell: defined, and exactly zero.
    let a = volume(vec![4.0; COUNT]);
    let b = volume(vec![-1.5; COUNT]);
    assert_eq!(mutual_information(&a, &b, 64).unwrap(), 0.0);
}

#[test]
fn test_independent_halves_carry_less_information_than_self() {
    // First half of b mirrors a, second half is constant: dependence is
    // partial, so MI lands strictly between 0 and the self-information.
    let a: Vec<f32> = (0..COUNT).map(|x| x as f32).collect();
    let mut b = a.clone();
    for v in b.iter_mut().skip(COUNT / 2) {
        *v = 0.0;
    }
    let va = volume(a);
    let vb = volume(b);

    let self_mi = mutual_information(&va, &va, 8).unwrap();
    let cross_mi = mutual_information(&va, &vb, 8).unwrap();
    assert!(cross_mi > 0.0);
    assert!(cross_mi < self_mi);
}
