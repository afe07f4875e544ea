//! Instruction execution for one shot.

use crate::noise;
use crate::tableau::Tableau;
use qec_common::isa::{Instruction, Opcode};
use qec_core::backend::{BackendError, Outcome};
use qec_core::circuit::Circuit;
use qec_core::pauli::Pauli;
use rand::Rng;

/// Noise rates resolved once per circuit, per gate class.
struct NoiseRates {
    single_qubit: Vec<[f64; 3]>,
    two_qubit: Vec<[f64; 3]>,
    idle: Vec<[f64; 3]>,
}

impl NoiseRates {
    fn new(circuit: &Circuit) -> Self {
        let mut rates = Self {
            single_qubit: Vec::new(),
            two_qubit: Vec::new(),
            idle: Vec::new(),
        };
        for model in circuit.noise() {
            let r = noise::pauli_rates(&model.channel);
            if model.targets.single_qubit {
                rates.single_qubit.push(r);
            }
            if model.targets.two_qubit {
                rates.two_qubit.push(r);
            }
            if model.targets.idle {
                rates.idle.push(r);
            }
        }
        rates
    }
}

fn apply_pauli(tableau: &mut Tableau, q: usize, pauli: Pauli) {
    match pauli {
        Pauli::I => {}
        Pauli::X => tableau.x(q),
        Pauli::Y => tableau.y(q),
        Pauli::Z => tableau.z(q),
    }
}

fn apply_noise<R: Rng + ?Sized>(tableau: &mut Tableau, q: usize, rates: &[[f64; 3]], rng: &mut R) {
    for r in rates {
        let p = noise::sample(r, rng);
        apply_pauli(tableau, q, p);
    }
}

fn check_qubit(inst: &Instruction, q: u16, n: usize) -> Result<usize, BackendError> {
    let q = q as usize;
    if q >= n {
        return Err(BackendError::Fatal(format!(
            "{inst:?} addresses qubit {q} of {n}"
        )));
    }
    Ok(q)
}

/// Runs `circuit` once from `|0…0⟩` and returns its measurement record.
pub fn run_shot<R: Rng + ?Sized>(circuit: &Circuit, rng: &mut R) -> Result<Outcome, BackendError> {
    let n = circuit.num_qubits();
    let rates = NoiseRates::new(circuit);
    let mut tableau = Tableau::new(n);
    let mut record = Outcome::repeat(false, circuit.num_records());

    for inst in circuit.instructions() {
        let op = inst
            .opcode()
            .ok_or_else(|| BackendError::Fatal(format!("unknown opcode {:#04x}", inst.opcode)))?;
        let a = check_qubit(inst, inst.operand_1, n)?;

        match op {
            Opcode::GateH => tableau.h(a),
            Opcode::GateS => tableau.s(a),
            Opcode::GateSAdj => tableau.s_adj(a),
            Opcode::GateCNOT => tableau.cnot(a, check_qubit(inst, inst.operand_2, n)?),
            Opcode::GateCZ => tableau.cz(a, check_qubit(inst, inst.operand_2, n)?),
            Opcode::PauliX => tableau.x(a),
            Opcode::PauliY => tableau.y(a),
            Opcode::PauliZ => tableau.z(a),
            Opcode::Idle => apply_noise(&mut tableau, a, &rates.idle, rng),
            Opcode::Measure => {
                let slot = inst.operand_2 as usize;
                if slot >= record.len() {
                    return Err(BackendError::Fatal(format!(
                        "measurement into record {slot} of {}",
                        record.len()
                    )));
                }
                let bit = tableau.measure(a, rng);
                record.set(slot, bit);
            }
            Opcode::Reset => tableau.reset(a, rng),
            Opcode::CondX | Opcode::CondY | Opcode::CondZ => {
                let slot = inst.operand_2 as usize;
                let fired = record.get(slot).map(|b| *b).ok_or_else(|| {
                    BackendError::Fatal(format!("condition on missing record {slot}"))
                })?;
                if fired {
                    let pauli = match op {
                        Opcode::CondX => Pauli::X,
                        Opcode::CondY => Pauli::Y,
                        _ => Pauli::Z,
                    };
                    apply_pauli(&mut tableau, a, pauli);
                }
            }
        }

        if op.is_single_qubit_gate() {
            apply_noise(&mut tableau, a, &rates.single_qubit, rng);
        } else if op.is_two_qubit_gate() {
            let b = inst.operand_2 as usize;
            apply_noise(&mut tableau, a, &rates.two_qubit, rng);
            apply_noise(&mut tableau, b, &rates.two_qubit, rng);
        }
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qec_core::channel::{ErrorChannel, NoiseModel};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn conditional_pauli_uses_recorded_bit() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..10 {
            let mut c = Circuit::new(2).unwrap();
            c.h(0).unwrap();
            let r = c.measure(0).unwrap();
            c.conditional_pauli(1, Pauli::X, r).unwrap();
            c.measure(1).unwrap();
            let out = run_shot(&c, &mut rng).unwrap();
            assert_eq!(out[0], out[1]);
        }
    }

    #[test]
    fn idle_noise_applies_only_at_idle_markers() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut c = Circuit::new(1).unwrap();
        c.add_noise(NoiseModel::idle(ErrorChannel::bit_flip(1.0).unwrap()));
        c.h(0).unwrap();
        c.h(0).unwrap();
        c.idle(0).unwrap();
        c.measure(0).unwrap();
        assert!(run_shot(&c, &mut rng).unwrap()[0]);
    }

    #[test]
    fn gate_noise_follows_two_qubit_gates() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut c = Circuit::new(2).unwrap();
        c.add_noise(NoiseModel {
            channel: ErrorChannel::bit_flip(1.0).unwrap(),
            targets: qec_core::channel::NoiseTargets {
                single_qubit: false,
                two_qubit: true,
                idle: false,
            },
        });
        c.cnot(0, 1).unwrap();
        c.measure(0).unwrap();
        c.measure(1).unwrap();
        let out = run_shot(&c, &mut rng).unwrap();
        assert!(out[0] && out[1]);
    }
}
