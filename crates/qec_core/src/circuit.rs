//! Circuit descriptions submitted to a simulation backend.

use crate::QecError;
use crate::channel::NoiseModel;
use crate::pauli::{Pauli, PauliString};
use core::fmt;
use qec_common::isa::{Instruction, Opcode};

/// An ordered instruction list over `num_qubits` qubits plus the noise
/// models the backend should attach to it.
///
/// Every measurement writes a fresh record slot; one shot's outcome is the
/// bit-string of all record slots in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    num_qubits: usize,
    num_records: usize,
    instructions: Vec<Instruction>,
    noise: Vec<NoiseModel>,
}

impl Circuit {
    pub fn new(num_qubits: usize) -> Result<Self, QecError> {
        if num_qubits > u16::MAX as usize {
            return Err(QecError::InvalidArgument(format!(
                "{num_qubits} qubits exceed the instruction operand range"
            )));
        }
        Ok(Self {
            num_qubits,
            num_records: 0,
            instructions: Vec::new(),
            noise: Vec::new(),
        })
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn num_records(&self) -> usize {
        self.num_records
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn noise(&self) -> &[NoiseModel] {
        &self.noise
    }

    pub fn add_noise(&mut self, model: NoiseModel) {
        self.noise.push(model);
    }

    fn operand(value: usize, what: &str) -> Result<u16, QecError> {
        u16::try_from(value).map_err(|_| {
            QecError::InvalidArgument(format!("{what} {value} exceeds the instruction operand range"))
        })
    }

    fn check_qubit(&self, q: usize) -> Result<u16, QecError> {
        if q >= self.num_qubits {
            return Err(QecError::InvalidArgument(format!(
                "qubit {q} out of range for {} qubits",
                self.num_qubits
            )));
        }
        Self::operand(q, "qubit")
    }

    fn push(&mut self, opcode: Opcode, q: usize, operand_2: u16) -> Result<(), QecError> {
        let q = self.check_qubit(q)?;
        self.instructions.push(Instruction::new(opcode, q, operand_2));
        Ok(())
    }

    fn push_pair(&mut self, opcode: Opcode, a: usize, b: usize) -> Result<(), QecError> {
        if a == b {
            return Err(QecError::InvalidArgument(format!(
                "two-qubit gate on qubit {a} twice"
            )));
        }
        let b = self.check_qubit(b)?;
        self.push(opcode, a, b)
    }

    fn check_record(&self, record: usize) -> Result<u16, QecError> {
        if record >= self.num_records {
            return Err(QecError::InvalidArgument(format!(
                "record {record} not yet written"
            )));
        }
        Self::operand(record, "record")
    }

    pub fn h(&mut self, q: usize) -> Result<(), QecError> {
        self.push(Opcode::GateH, q, 0)
    }

    pub fn s(&mut self, q: usize) -> Result<(), QecError> {
        self.push(Opcode::GateS, q, 0)
    }

    pub fn s_adj(&mut self, q: usize) -> Result<(), QecError> {
        self.push(Opcode::GateSAdj, q, 0)
    }

    pub fn cnot(&mut self, control: usize, target: usize) -> Result<(), QecError> {
        self.push_pair(Opcode::GateCNOT, control, target)
    }

    pub fn cz(&mut self, a: usize, b: usize) -> Result<(), QecError> {
        self.push_pair(Opcode::GateCZ, a, b)
    }

    /// Noise-free Pauli on `q`. Identity emits nothing.
    pub fn pauli(&mut self, q: usize, pauli: Pauli) -> Result<(), QecError> {
        match pauli {
            Pauli::I => Ok(()),
            Pauli::X => self.push(Opcode::PauliX, q, 0),
            Pauli::Y => self.push(Opcode::PauliY, q, 0),
            Pauli::Z => self.push(Opcode::PauliZ, q, 0),
        }
    }

    /// Applies `p` to qubits `0..p.num_qubits()`.
    pub fn pauli_string(&mut self, p: &PauliString) -> Result<(), QecError> {
        for (q, pauli) in p.iter() {
            self.pauli(q, pauli)?;
        }
        Ok(())
    }

    pub fn idle(&mut self, q: usize) -> Result<(), QecError> {
        self.push(Opcode::Idle, q, 0)
    }

    /// Z-basis measurement into a new record slot, whose index is returned.
    pub fn measure(&mut self, q: usize) -> Result<usize, QecError> {
        let record = self.num_records;
        let slot = Self::operand(record, "record")?;
        self.push(Opcode::Measure, q, slot)?;
        self.num_records += 1;
        Ok(record)
    }

    pub fn reset(&mut self, q: usize) -> Result<(), QecError> {
        self.push(Opcode::Reset, q, 0)
    }

    /// Applies `pauli` to `q` if `record` measured 1.
    pub fn conditional_pauli(&mut self, q: usize, pauli: Pauli, record: usize) -> Result<(), QecError> {
        let slot = self.check_record(record)?;
        match pauli {
            Pauli::I => Ok(()),
            Pauli::X => self.push(Opcode::CondX, q, slot),
            Pauli::Y => self.push(Opcode::CondY, q, slot),
            Pauli::Z => self.push(Opcode::CondZ, q, slot),
        }
    }

    pub fn conditional_pauli_string(&mut self, p: &PauliString, record: usize) -> Result<(), QecError> {
        for (q, pauli) in p.iter() {
            self.conditional_pauli(q, pauli, record)?;
        }
        Ok(())
    }

    /// Rotates `q` so that a Z measurement reads out `basis`.
    pub fn rotate_to_z(&mut self, q: usize, basis: Pauli) -> Result<(), QecError> {
        match basis {
            Pauli::I | Pauli::Z => Ok(()),
            Pauli::X => self.h(q),
            Pauli::Y => {
                self.s_adj(q)?;
                self.h(q)
            }
        }
    }
}

/// One line per instruction in gadget-listing form, e.g. `cx 9 3`.
impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for inst in &self.instructions {
            let Some(op) = inst.opcode() else {
                writeln!(f, "?? {:#04x}", inst.opcode)?;
                continue;
            };
            match op {
                Opcode::GateCNOT | Opcode::GateCZ => {
                    writeln!(f, "{} {} {}", op.mnemonic(), inst.operand_1, inst.operand_2)?
                }
                Opcode::Measure => {
                    writeln!(f, "{} {} -> r{}", op.mnemonic(), inst.operand_1, inst.operand_2)?
                }
                Opcode::CondX | Opcode::CondY | Opcode::CondZ => {
                    writeln!(f, "{} {} r{}", op.mnemonic(), inst.operand_1, inst.operand_2)?
                }
                _ => writeln!(f, "{} {}", op.mnemonic(), inst.operand_1)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurements_allocate_sequential_records() {
        let mut c = Circuit::new(2).unwrap();
        c.h(0).unwrap();
        c.cnot(0, 1).unwrap();
        assert_eq!(c.measure(0).unwrap(), 0);
        assert_eq!(c.measure(1).unwrap(), 1);
        c.conditional_pauli(1, Pauli::X, 0).unwrap();
        assert_eq!(c.num_records(), 2);
        assert_eq!(c.to_string(), "h 0\ncx 0 1\nmeasure 0 -> r0\nmeasure 1 -> r1\nx.if 1 r0\n");
    }

    #[test]
    fn identity_paulis_emit_nothing() {
        let mut c = Circuit::new(3).unwrap();
        c.pauli_string(&"IXI".parse().unwrap()).unwrap();
        c.pauli(2, Pauli::I).unwrap();
        assert_eq!(c.instructions().len(), 1);
        assert_eq!(c.instructions()[0].opcode(), Some(Opcode::PauliX));
    }

    #[test]
    fn rejects_oversized_registers() {
        assert!(Circuit::new(70_000).is_err());
    }

    #[test]
    fn record_slots_stop_at_the_operand_range() {
        let mut c = Circuit::new(1).unwrap();
        for _ in 0..=u16::MAX {
            c.measure(0).unwrap();
        }
        assert_eq!(c.num_records(), 65_536);
        assert!(c.measure(0).is_err());
        assert_eq!(c.num_records(), 65_536);
    }

    #[test]
    fn rejects_bad_operands() {
        let mut c = Circuit::new(2).unwrap();
        assert!(c.h(2).is_err());
        assert!(c.cnot(1, 1).is_err());
        assert!(c.cz(0, 5).is_err());
        assert!(c.conditional_pauli(0, Pauli::X, 0).is_err());
        assert!(c.instructions().is_empty());
    }
}
