use qec_core::channel::{ErrorChannel, NoiseModel};
use qec_core::codes::CodeFamily;
use qec_core::decoder::DecodeStatus;
use qec_core::pauli::{Pauli, PauliString};
use qec_core::runner::{Injection, RunConfig, TrialRunner};
use qec_core::stats::{RunStatistics, aggregate};
use qec_core::{QecError, evaluate, run_trial, tally_histogram};
use qec_sim::{FlakyBackend, TableauBackend};

fn config(inputs: Vec<bool>, injection: Injection) -> RunConfig {
    RunConfig {
        inputs,
        injection,
        shots: 64,
        seed: 7,
        ..RunConfig::default()
    }
}

#[test]
fn repetition_code_corrects_every_single_flip() {
    let code = CodeFamily::BitFlip.build().unwrap();
    let backend = TableauBackend::new();
    for input in [false, true] {
        for q in 0..3 {
            let cfg = config(vec![input], Injection::single(3, q, Pauli::X).unwrap());
            let r = run_trial(&code, &backend, &cfg, 0).unwrap();
            assert_eq!(r.recovered_logical, vec![input]);
            assert!(r.matched_expected);
            assert_eq!(r.status, DecodeStatus::Corrected);
            assert_eq!(r.applied_correction, PauliString::single(3, q, Pauli::X).unwrap());
        }
    }

    let cfg = config(vec![true], Injection::single(3, 1, Pauli::X).unwrap());
    let r = run_trial(&code, &backend, &cfg, 3).unwrap();
    assert_eq!(r.syndrome.to_string(), "11");
    assert_eq!(r.description, "X on qubit 1");
}

#[test]
fn five_qubit_code_round_trip() {
    let code = CodeFamily::FiveQubit.build().unwrap();
    let backend = TableauBackend::new();

    let r = run_trial(&code, &backend, &config(vec![false], Injection::None), 0).unwrap();
    assert_eq!(r.syndrome.to_string(), "0000");
    assert_eq!(r.status, DecodeStatus::Trivial);
    assert_eq!(r.recovered_logical, vec![false]);

    let z2 = PauliString::single(5, 2, Pauli::Z).unwrap();
    let cfg = config(vec![true], Injection::Fixed(z2.clone()));
    let r = run_trial(&code, &backend, &cfg, 0).unwrap();
    assert_eq!(r.syndrome, code.syndrome_of(&z2).unwrap());
    assert_eq!(r.applied_correction, z2);
    assert_eq!(r.recovered_logical, vec![true]);
}

#[test]
fn steane_corrects_x_and_z_on_different_qubits() {
    let code = CodeFamily::Steane.build().unwrap();
    let error = PauliString::from_sparse(7, &[(3, Pauli::X), (5, Pauli::Z)]).unwrap();
    let cfg = config(vec![true], Injection::Fixed(error.clone()));
    let r = run_trial(&code, &TableauBackend::new(), &cfg, 0).unwrap();
    assert_eq!(r.applied_correction, error);
    assert_eq!(r.description, "X on qubit 3, Z on qubit 5");
    assert!(r.matched_expected);
}

#[test]
fn noiseless_runs_always_succeed() {
    let backend = TableauBackend::new();
    for family in CodeFamily::ALL {
        let code = family.build().unwrap();
        for bit in [false, true] {
            let cfg = RunConfig {
                inputs: vec![bit; code.num_logicals()],
                shots: 8,
                seed: 1,
                ..RunConfig::default()
            };
            let stats = evaluate(&code, &backend, &cfg).unwrap();
            assert_eq!(stats.total_trials, 8, "{family}");
            assert_eq!(stats.success_rate(), 1.0, "{family} input {bit}");
        }
    }
}

#[test]
fn gate_noise_runs_complete() {
    let code = CodeFamily::Steane.build().unwrap();
    let cfg = RunConfig {
        inputs: vec![false],
        gate_noise: Some(NoiseModel::new(ErrorChannel::depolarizing(0.01).unwrap())),
        shots: 32,
        seed: 5,
        ..RunConfig::default()
    };
    let stats = evaluate(&code, &TableauBackend::new(), &cfg).unwrap();
    assert_eq!(stats.total_trials, 32);
    assert!(stats.successes <= 32);

    let cfg = RunConfig {
        injection: Injection::Channel(ErrorChannel::amplitude_damping(0.2).unwrap()),
        gate_noise: None,
        ..cfg
    };
    let stats = evaluate(&code, &TableauBackend::new(), &cfg).unwrap();
    assert_eq!(stats.total_trials, 32);
}

#[test]
fn transient_failures_drop_trials() {
    let code = CodeFamily::BitFlip.build().unwrap();
    let backend = FlakyBackend::new(TableauBackend::new(), 0.3).unwrap();
    let cfg = RunConfig {
        shots: 200,
        ..config(vec![false], Injection::None)
    };
    let stats = evaluate(&code, &backend, &cfg).unwrap();
    assert_eq!(stats.total_trials + stats.dropped_trials, 200);
    assert!(stats.dropped_trials > 0);
    assert!(stats.total_trials > 0);
    assert_eq!(stats.success_rate(), 1.0);

    let always = FlakyBackend::new(TableauBackend::new(), 1.0).unwrap();
    let stats = evaluate(&code, &always, &cfg).unwrap();
    assert_eq!(stats.dropped_trials, 200);
    assert_eq!(stats.success_rate(), 0.0);
}

#[test]
fn single_trial_surfaces_transient_failure() {
    let code = CodeFamily::BitFlip.build().unwrap();
    let always = FlakyBackend::new(TableauBackend::new(), 1.0).unwrap();
    let err = run_trial(&code, &always, &config(vec![false], Injection::None), 0).unwrap_err();
    assert!(matches!(err, QecError::BackendTransientFailure(_)));
}

#[test]
fn histogram_tally_matches_fixed_injection() {
    let code = CodeFamily::Shor.build().unwrap();
    let error = PauliString::single(9, 4, Pauli::Y).unwrap();
    let cfg = RunConfig {
        shots: 50,
        ..config(vec![true], Injection::Fixed(error.clone()))
    };
    let stats = tally_histogram(&code, &TableauBackend::new(), &cfg).unwrap();
    assert_eq!(stats.total_trials, 50);
    assert_eq!(stats.successes, 50);
    let syndrome = code.syndrome_of(&error).unwrap();
    assert_eq!(stats.per_syndrome[&syndrome].count, 50);

    let random = RunConfig {
        injection: Injection::Channel(ErrorChannel::depolarizing(0.1).unwrap()),
        ..cfg
    };
    assert!(tally_histogram(&code, &TableauBackend::new(), &random).is_err());
}

#[test]
fn split_runs_merge_to_the_full_run() {
    let code = CodeFamily::Steane.build().unwrap();
    let backend = TableauBackend::new();
    let cfg = RunConfig {
        inputs: vec![true],
        injection: Injection::Channel(ErrorChannel::depolarizing(0.08).unwrap()),
        shots: 1024,
        seed: 42,
        ..RunConfig::default()
    };
    let runner = TrialRunner::new(&code, cfg).unwrap();
    let full = runner.evaluate(&backend).unwrap();

    let first: Vec<_> = (0..512).map(|t| runner.run_trial(&backend, t).unwrap()).collect();
    let second: Vec<_> = (512..1024).map(|t| runner.run_trial(&backend, t).unwrap()).collect();
    let mut merged = aggregate(&first);
    merged.merge(aggregate(&second));
    assert_eq!(merged, full);

    let mut reversed: RunStatistics = aggregate(&second);
    reversed.merge(aggregate(&first));
    assert_eq!(reversed, full);
    assert_eq!(full.total_trials, 1024);
}

#[test]
fn runs_are_reproducible_from_the_seed() {
    let code = CodeFamily::Surface.build().unwrap();
    let cfg = RunConfig {
        inputs: vec![false],
        injection: Injection::Random {
            rate: 0.1,
            types: vec![Pauli::X, Pauli::Z],
        },
        shots: 64,
        seed: 99,
        ..RunConfig::default()
    };
    let a = evaluate(&code, &TableauBackend::new(), &cfg).unwrap();
    let b = evaluate(&code, &TableauBackend::new(), &cfg).unwrap();
    assert_eq!(a, b);
}
