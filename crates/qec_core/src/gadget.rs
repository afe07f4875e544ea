//! Syndrome-extraction gadget synthesis.
//!
//! A generator `g` is measured non-destructively through one ancilla. The
//! coupling sequence depends only on the generator's `(x, z)` bit pair:
//!
//! * `Z`-only generators use a computational-basis ancilla and one CNOT
//!   from each data qubit in the support onto the ancilla. The ancilla ends
//!   up holding the parity of the Z eigenvalues.
//! * Any generator containing `X` or `Y` uses a Hadamard-basis ancilla that
//!   controls `X` (CNOT) on every `X` entry, `Z` (CZ) on every `Z` entry
//!   and both on every `Y` entry. Since `ZX = iY`, each `Y` leaves a factor
//!   `i` on the ancilla's `|1⟩` branch, removed by one `S†` per `Y` before
//!   the closing Hadamard.
//!
//! In both shapes the ancilla reads `0` on the `+1` eigenspace of `g` and `1`
//! on the `-1` eigenspace.

use crate::QecError;
use crate::circuit::Circuit;
use crate::pauli::{Pauli, PauliString};
use core::fmt;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AncillaBasis {
    /// Prepared and measured in Z, no basis change.
    Computational,
    /// Sandwiched between two Hadamards.
    Hadamard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Coupling {
    Cnot,
    Cz,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GadgetOp {
    pub control: usize,
    pub target: usize,
    pub coupling: Coupling,
}

/// Coupling sequence measuring one generator into one ancilla.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyndromeGadgetSpec {
    pub ancilla: usize,
    pub basis: AncillaBasis,
    pub ops: Vec<GadgetOp>,
    /// Number of `S†` gates applied to the ancilla before the closing
    /// Hadamard, one per `Y` entry.
    pub phase_corrections: usize,
}

/// Derives the gadget measuring `generator` with `ancilla`.
///
/// The ancilla index must lie outside the generator's qubit range.
pub fn synthesize(generator: &PauliString, ancilla: usize) -> Result<SyndromeGadgetSpec, QecError> {
    if generator.is_identity() {
        return Err(QecError::InvalidArgument(
            "cannot synthesize a gadget for the identity".into(),
        ));
    }
    if ancilla < generator.num_qubits() {
        return Err(QecError::InvalidArgument(format!(
            "ancilla {ancilla} overlaps the {} data qubits",
            generator.num_qubits()
        )));
    }

    if generator.is_z_type() {
        let ops = generator
            .support()
            .into_iter()
            .map(|q| GadgetOp {
                control: q,
                target: ancilla,
                coupling: Coupling::Cnot,
            })
            .collect();
        return Ok(SyndromeGadgetSpec {
            ancilla,
            basis: AncillaBasis::Computational,
            ops,
            phase_corrections: 0,
        });
    }

    let mut ops = Vec::with_capacity(generator.weight() + 1);
    let mut phase_corrections = 0;
    for (q, pauli) in generator.iter() {
        let cnot = GadgetOp {
            control: ancilla,
            target: q,
            coupling: Coupling::Cnot,
        };
        let cz = GadgetOp {
            control: ancilla,
            target: q,
            coupling: Coupling::Cz,
        };
        match pauli {
            Pauli::X => ops.push(cnot),
            Pauli::Z => ops.push(cz),
            Pauli::Y => {
                ops.push(cnot);
                ops.push(cz);
                phase_corrections += 1;
            }
            Pauli::I => {}
        }
    }
    Ok(SyndromeGadgetSpec {
        ancilla,
        basis: AncillaBasis::Hadamard,
        ops,
        phase_corrections,
    })
}

impl SyndromeGadgetSpec {
    /// Appends reset, coupling sequence and ancilla measurement to `circuit`
    /// and returns the record slot holding the syndrome bit.
    pub fn emit(&self, circuit: &mut Circuit) -> Result<usize, QecError> {
        let a = self.ancilla;
        circuit.reset(a)?;
        if self.basis == AncillaBasis::Hadamard {
            circuit.h(a)?;
        }
        for op in &self.ops {
            match op.coupling {
                Coupling::Cnot => circuit.cnot(op.control, op.target)?,
                Coupling::Cz => circuit.cz(op.control, op.target)?,
            }
        }
        if self.basis == AncillaBasis::Hadamard {
            for _ in 0..self.phase_corrections {
                circuit.s_adj(a)?;
            }
            circuit.h(a)?;
        }
        circuit.measure(a)
    }
}

impl fmt::Display for SyndromeGadgetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let basis = match self.basis {
            AncillaBasis::Computational => "Z",
            AncillaBasis::Hadamard => "X",
        };
        write!(f, "ancilla {} ({basis} basis):", self.ancilla)?;
        for op in &self.ops {
            let name = match op.coupling {
                Coupling::Cnot => "cx",
                Coupling::Cz => "cz",
            };
            write!(f, " {name}({},{})", op.control, op.target)?;
        }
        if self.phase_corrections > 0 {
            write!(f, " sdg^{}", self.phase_corrections)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_type_generator_uses_computational_ancilla() {
        let g: PauliString = "ZZI".parse().unwrap();
        let spec = synthesize(&g, 3).unwrap();
        assert_eq!(spec.basis, AncillaBasis::Computational);
        assert_eq!(
            spec.ops,
            vec![
                GadgetOp { control: 0, target: 3, coupling: Coupling::Cnot },
                GadgetOp { control: 1, target: 3, coupling: Coupling::Cnot },
            ]
        );
        assert_eq!(spec.to_string(), "ancilla 3 (Z basis): cx(0,3) cx(1,3)");
    }

    #[test]
    fn mixed_generator_uses_hadamard_sandwich() {
        let g: PauliString = "XZZXI".parse().unwrap();
        let spec = synthesize(&g, 5).unwrap();
        assert_eq!(spec.basis, AncillaBasis::Hadamard);
        let couplings: Vec<Coupling> = spec.ops.iter().map(|o| o.coupling).collect();
        assert_eq!(couplings, [Coupling::Cnot, Coupling::Cz, Coupling::Cz, Coupling::Cnot]);
        assert!(spec.ops.iter().all(|o| o.control == 5));
        assert_eq!(spec.phase_corrections, 0);
    }

    #[test]
    fn y_entries_need_both_couplings_and_a_phase_fix() {
        let g: PauliString = "YIY".parse().unwrap();
        let spec = synthesize(&g, 3).unwrap();
        assert_eq!(spec.ops.len(), 4);
        assert_eq!(spec.phase_corrections, 2);

        let mut c = Circuit::new(4).unwrap();
        let record = spec.emit(&mut c).unwrap();
        assert_eq!(record, 0);
        assert_eq!(
            c.to_string(),
            "reset 3\nh 3\ncx 3 0\ncz 3 0\ncx 3 2\ncz 3 2\nsdg 3\nsdg 3\nh 3\nmeasure 3 -> r0\n"
        );
    }

    #[test]
    fn rejects_identity_and_overlapping_ancilla() {
        assert!(synthesize(&"III".parse().unwrap(), 3).is_err());
        assert!(synthesize(&"XXI".parse().unwrap(), 2).is_err());
    }
}
