use proptest::prelude::*;
use qec_core::decoder::DecodeStatus;
use qec_core::pauli::PauliString;
use qec_core::runner::TrialResult;
use qec_core::stats::{RunStatistics, aggregate};
use qec_core::syndrome::Syndrome;

/// A result whose decoded meaning depends only on its syndrome, as it does
/// for a fixed decoder.
fn result(bits: u8, ok: bool) -> TrialResult {
    let syndrome = Syndrome::from_bits((0..3).map(|k| (bits >> k) & 1 == 1));
    let status = match bits {
        0 => DecodeStatus::Trivial,
        7 => DecodeStatus::Uncorrectable,
        _ => DecodeStatus::Corrected,
    };
    TrialResult {
        description: format!("pattern {bits}"),
        syndrome,
        applied_correction: PauliString::identity(3),
        recovered_logical: vec![ok],
        matched_expected: ok,
        status,
        injected: PauliString::identity(3),
        applied_errors: Vec::new(),
    }
}

prop_compose! {
    fn results()(raw in prop::collection::vec((0u8..8, any::<bool>()), 0..64)) -> Vec<TrialResult> {
        raw.into_iter().map(|(bits, ok)| result(bits, ok)).collect()
    }
}

proptest! {
    #[test]
    fn merging_chunks_matches_aggregating_everything(
        all in results(),
        cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..5),
    ) {
        let mut bounds: Vec<usize> = cuts.iter().map(|c| c.index(all.len() + 1)).collect();
        bounds.push(0);
        bounds.push(all.len());
        bounds.sort_unstable();

        let mut merged = RunStatistics::new();
        for w in bounds.windows(2) {
            merged.merge(aggregate(&all[w[0]..w[1]]));
        }
        prop_assert_eq!(&merged, &aggregate(&all));

        // Reduction order does not matter either.
        let mut reversed = RunStatistics::new();
        for w in bounds.windows(2).rev() {
            reversed.merge(aggregate(&all[w[0]..w[1]]));
        }
        prop_assert_eq!(&reversed, &aggregate(&all));
    }

    #[test]
    fn merge_groups_associatively(
        a in results(),
        b in results(),
        c in results(),
        dropped in (0u64..10, 0u64..10, 0u64..10),
    ) {
        let stats = |r: &[TrialResult], d: u64| {
            let mut s = aggregate(r);
            s.record_dropped(d);
            s
        };
        let (sa, sb, sc) = (stats(&a, dropped.0), stats(&b, dropped.1), stats(&c, dropped.2));

        let mut left = sa.clone();
        left.merge(sb.clone());
        left.merge(sc.clone());

        let mut bc = sb;
        bc.merge(sc);
        let mut right = sa;
        right.merge(bc);

        prop_assert_eq!(&left, &right);
        prop_assert_eq!(left.attempted(), (a.len() + b.len() + c.len()) as u64 + dropped.0 + dropped.1 + dropped.2);
    }
}
