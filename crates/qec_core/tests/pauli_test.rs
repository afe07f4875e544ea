use proptest::prelude::*;
use qec_core::pauli::{Pauli, PauliString, commutes, multiply, weight};

fn pauli_of(index: u8) -> Pauli {
    match index % 4 {
        0 => Pauli::I,
        1 => Pauli::X,
        2 => Pauli::Y,
        _ => Pauli::Z,
    }
}

fn from_indices(indices: &[u8]) -> PauliString {
    let terms: Vec<(usize, Pauli)> = indices
        .iter()
        .enumerate()
        .map(|(q, &i)| (q, pauli_of(i)))
        .collect();
    PauliString::from_sparse(indices.len(), &terms).unwrap()
}

prop_compose! {
    fn arbitrary_pauli(max_dimension: usize)(indices in prop::collection::vec(0u8..4, 1..max_dimension)) -> PauliString {
        from_indices(&indices)
    }
}

prop_compose! {
    fn equal_length_paulis(max_dimension: usize)(dimension in 1..max_dimension)
        (a in prop::collection::vec(0u8..4, dimension), b in prop::collection::vec(0u8..4, dimension))
        -> (PauliString, PauliString) {
        (from_indices(&a), from_indices(&b))
    }
}

proptest! {
    #[test]
    fn parse_display_round_trip(p in arbitrary_pauli(200)) {
        let parsed: PauliString = p.to_string().parse().unwrap();
        prop_assert_eq!(parsed, p);
    }

    #[test]
    fn commutation_is_symmetric((a, b) in equal_length_paulis(150)) {
        prop_assert_eq!(commutes(&a, &b).unwrap(), commutes(&b, &a).unwrap());
    }

    #[test]
    fn commutation_counts_anticommuting_sites((a, b) in equal_length_paulis(150)) {
        let sites = (0..a.num_qubits())
            .filter(|&q| !a.get(q).commutes_with(b.get(q)))
            .count();
        prop_assert_eq!(commutes(&a, &b).unwrap(), sites % 2 == 0);
    }

    #[test]
    fn every_pauli_squares_to_identity(p in arbitrary_pauli(200)) {
        prop_assert!(multiply(&p, &p).unwrap().is_identity());
        prop_assert!(commutes(&p, &p).unwrap());
    }

    #[test]
    fn multiplication_is_commutative_up_to_phase((a, b) in equal_length_paulis(150)) {
        prop_assert_eq!(multiply(&a, &b).unwrap(), multiply(&b, &a).unwrap());
    }

    #[test]
    fn weight_is_subadditive((a, b) in equal_length_paulis(150)) {
        let ab = multiply(&a, &b).unwrap();
        prop_assert!(weight(&ab) <= weight(&a) + weight(&b));
    }

    #[test]
    fn product_commutation_is_linear((a, b) in equal_length_paulis(64), c_seed in prop::collection::vec(0u8..4, 64)) {
        let c = from_indices(&c_seed[..a.num_qubits()]);
        let ab = multiply(&a, &b).unwrap();
        let lhs = commutes(&ab, &c).unwrap();
        let rhs = commutes(&a, &c).unwrap() == commutes(&b, &c).unwrap();
        prop_assert_eq!(lhs, rhs);
    }
}

#[test]
fn y_anticommutes_with_x_and_z() {
    let y: PauliString = "Y".parse().unwrap();
    assert!(!commutes(&y, &"X".parse().unwrap()).unwrap());
    assert!(!commutes(&y, &"Z".parse().unwrap()).unwrap());
}
