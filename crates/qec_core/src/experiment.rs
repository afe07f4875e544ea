//! Memory-experiment circuits: prepare, inject, extract, read out.

use crate::QecError;
use crate::channel::NoiseModel;
use crate::circuit::Circuit;
use crate::code::{Readout, StabilizerCode};
use crate::gadget::{SyndromeGadgetSpec, synthesize};
use crate::pauli::{Pauli, PauliString};
use crate::syndrome::Syndrome;
use bitvec::prelude::*;

/// Record slots of one memory-experiment circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentLayout {
    /// Slot of syndrome bit `k`, in generator order.
    pub syndrome_records: Vec<usize>,
    /// Slot of the final measurement of data qubit `q`.
    pub data_records: Vec<usize>,
    pub num_records: usize,
}

impl ExperimentLayout {
    /// Splits one shot's record into the syndrome and the data bits.
    pub fn split(&self, outcome: &BitSlice<u8, Lsb0>) -> Result<(Syndrome, Vec<bool>), QecError> {
        if outcome.len() != self.num_records {
            return Err(QecError::InvalidArgument(format!(
                "outcome has {} bits, circuit writes {}",
                outcome.len(),
                self.num_records
            )));
        }
        let syndrome = Syndrome::from_bits(self.syndrome_records.iter().map(|&r| outcome[r]));
        let data = self.data_records.iter().map(|&r| outcome[r]).collect();
        Ok((syndrome, data))
    }
}

/// Builds memory-experiment circuits for one code.
///
/// Data qubits are `0..n`; qubit `n` is the single ancilla, reset before
/// every gadget.
#[derive(Debug, Clone)]
pub struct MemoryExperiment<'a> {
    code: &'a StabilizerCode,
    ancilla: usize,
    gadgets: Vec<SyndromeGadgetSpec>,
    logical_gadgets: Vec<SyndromeGadgetSpec>,
    readout_basis: Vec<Pauli>,
}

impl<'a> MemoryExperiment<'a> {
    pub fn new(code: &'a StabilizerCode) -> Result<Self, QecError> {
        let ancilla = code.num_qubits();
        let gadgets = code
            .generators()
            .iter()
            .map(|g| synthesize(g, ancilla))
            .collect::<Result<Vec<_>, _>>()?;
        let logical_gadgets = code
            .logicals()
            .iter()
            .map(|l| synthesize(&l.z, ancilla))
            .collect::<Result<Vec<_>, _>>()?;

        let mut readout_basis = vec![Pauli::I; code.num_qubits()];
        for l in code.logicals() {
            for (q, p) in l.z.iter() {
                readout_basis[q] = p;
            }
        }

        Ok(Self {
            code,
            ancilla,
            gadgets,
            logical_gadgets,
            readout_basis,
        })
    }

    pub fn code(&self) -> &StabilizerCode {
        self.code
    }

    pub fn gadgets(&self) -> &[SyndromeGadgetSpec] {
        &self.gadgets
    }

    /// Per-qubit basis measured at readout (`I` qubits are measured in Z).
    pub fn readout_basis(&self) -> &[Pauli] {
        &self.readout_basis
    }

    /// Circuit encoding `inputs`, applying `error` in the error window and
    /// measuring one syndrome round followed by every data qubit.
    pub fn build(
        &self,
        inputs: &[bool],
        error: &PauliString,
        noise: &[NoiseModel],
    ) -> Result<(Circuit, ExperimentLayout), QecError> {
        let code = self.code;
        let n = code.num_qubits();
        if inputs.len() != code.num_logicals() {
            return Err(QecError::InvalidArgument(format!(
                "{} encodes {} logical qubit(s), got {} input bit(s)",
                code.name(),
                code.num_logicals(),
                inputs.len()
            )));
        }
        if error.num_qubits() != n {
            return Err(QecError::InvalidArgument(format!(
                "error pattern has {} qubits, code has {n}",
                error.num_qubits()
            )));
        }

        let mut circuit = Circuit::new(self.ancilla + 1)?;
        for model in noise {
            circuit.add_noise(*model);
        }

        // Project |0…0⟩ onto the code space, then onto Z̄ = +1.
        for (k, gadget) in self.gadgets.iter().enumerate() {
            let record = gadget.emit(&mut circuit)?;
            circuit.conditional_pauli_string(code.pure_error(k), record)?;
        }
        for (gadget, l) in self.logical_gadgets.iter().zip(code.logicals()) {
            let record = gadget.emit(&mut circuit)?;
            circuit.conditional_pauli_string(&l.x, record)?;
        }
        for (&bit, l) in inputs.iter().zip(code.logicals()) {
            if bit {
                circuit.pauli_string(&l.x)?;
            }
        }

        for q in 0..n {
            circuit.idle(q)?;
        }
        circuit.pauli_string(error)?;

        let syndrome_records = self
            .gadgets
            .iter()
            .map(|gadget| gadget.emit(&mut circuit))
            .collect::<Result<Vec<_>, _>>()?;

        let mut data_records = Vec::with_capacity(n);
        for q in 0..n {
            circuit.rotate_to_z(q, self.readout_basis[q])?;
            data_records.push(circuit.measure(q)?);
        }

        let layout = ExperimentLayout {
            syndrome_records,
            data_records,
            num_records: circuit.num_records(),
        };
        Ok((circuit, layout))
    }

    /// Logical values read from `data` after applying `correction`.
    ///
    /// A measured bit in the support of `Z̄ᵢ` is flipped when the correction
    /// anticommutes with the Pauli measured on that qubit. The corrected bits
    /// are combined by parity or majority according to the code's readout.
    pub fn recover(&self, data: &[bool], correction: &PauliString) -> Vec<bool> {
        self.code
            .logicals()
            .iter()
            .map(|l| {
                let bits: Vec<bool> = l
                    .z
                    .iter()
                    .map(|(q, p)| data[q] ^ !correction.get(q).commutes_with(p))
                    .collect();
                match self.code.readout() {
                    Readout::Parity => bits.iter().filter(|&&b| b).count() % 2 == 1,
                    Readout::Majority => 2 * bits.iter().filter(|&&b| b).count() > bits.len(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::CodeFamily;

    #[test]
    fn layout_covers_every_generator_and_qubit() {
        let code = CodeFamily::Steane.build().unwrap();
        let exp = MemoryExperiment::new(&code).unwrap();
        let (circuit, layout) = exp
            .build(&[true], &PauliString::identity(7), &[])
            .unwrap();
        assert_eq!(circuit.num_qubits(), 8);
        assert_eq!(layout.syndrome_records.len(), 6);
        assert_eq!(layout.data_records.len(), 7);
        // 6 + 1 preparation measurements precede the syndrome round.
        assert_eq!(layout.syndrome_records[0], 7);
        assert_eq!(layout.num_records, 7 + 6 + 7);
    }

    #[test]
    fn rejects_wrong_input_count() {
        let code = CodeFamily::Toric.build().unwrap();
        let exp = MemoryExperiment::new(&code).unwrap();
        assert!(exp.build(&[true], &PauliString::identity(18), &[]).is_err());
        assert!(exp.build(&[true, false], &PauliString::identity(18), &[]).is_ok());
    }

    #[test]
    fn recover_applies_correction_before_voting() {
        let code = CodeFamily::BitFlip.build().unwrap();
        let exp = MemoryExperiment::new(&code).unwrap();
        let x1: PauliString = "IXI".parse().unwrap();
        // Logical 1 with X on qubit 1 reads 101.
        assert_eq!(exp.recover(&[true, false, true], &x1), vec![true]);
        assert_eq!(exp.recover(&[false, true, false], &x1), vec![false]);

        let five = CodeFamily::FiveQubit.build().unwrap();
        let exp = MemoryExperiment::new(&five).unwrap();
        let z2: PauliString = "IIZII".parse().unwrap();
        // Z errors do not disturb Z-basis readout.
        assert_eq!(exp.recover(&[true, false, false, false, false], &z2), vec![true]);
        let x2: PauliString = "IIXII".parse().unwrap();
        assert_eq!(exp.recover(&[true, false, true, false, false], &x2), vec![true]);
    }
}
