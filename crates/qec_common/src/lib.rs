//! Common definitions shared across the stabilizer-code engine.
//!
//! This crate provides the instruction set used to describe syndrome
//! extraction circuits. The circuit builder in `qec_core` emits these
//! instructions and every simulation backend consumes them, so the encoding
//! lives here with no dependencies of its own.

#![no_std]

/// Instruction Set Architecture for circuit descriptions.
///
/// Defines the binary encoding of gates, measurements, resets and
/// classically-conditioned Pauli corrections that a backend executes. The
/// instruction format is small and fixed-size so circuits are cheap to clone
/// and share across worker threads.
pub mod isa {
    /// Opcode enumeration for circuit instructions.
    ///
    /// Gates are grouped by the noise class a backend attaches to them:
    /// single-qubit Cliffords (`0x0_`), two-qubit Cliffords (`0x1_`), noiseless
    /// Pauli injections (`0x2_`), measurement and reset (`0x3_`) and
    /// feed-forward Paulis (`0x4_`).
    #[repr(u8)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Opcode {
        /// Apply a Hadamard gate to `operand_1`.
        ///
        /// Swaps the X and Z eigenbases. Used to sandwich Hadamard-basis
        /// ancillas and to rotate data qubits before readout.
        GateH = 0x01,

        /// Apply the phase gate S to `operand_1`.
        GateS = 0x02,

        /// Apply the inverse phase gate S† to `operand_1`.
        ///
        /// Emitted once per `Y` entry of a generator to cancel the phase of
        /// the `XZ` decomposition, and during `Y`-basis readout.
        GateSAdj = 0x03,

        /// Apply CNOT with control `operand_1` and target `operand_2`.
        GateCNOT = 0x10,

        /// Apply CZ between `operand_1` and `operand_2`.
        ///
        /// Symmetric in its operands; the builder still records the ancilla
        /// as `operand_1` for readability of gadget listings.
        GateCZ = 0x11,

        /// Apply a Pauli X to `operand_1`.
        ///
        /// Pauli instructions model injected errors and logical operators.
        /// Backends never attach gate noise to them.
        PauliX = 0x20,

        /// Apply a Pauli Y to `operand_1`.
        PauliY = 0x21,

        /// Apply a Pauli Z to `operand_1`.
        PauliZ = 0x22,

        /// Mark the error window on `operand_1`.
        ///
        /// Has no unitary effect. Backends attach idle noise here, which is
        /// where channel-sampled errors that cannot be expressed as Paulis
        /// are delegated.
        Idle = 0x23,

        /// Measure `operand_1` in the Z basis into record `operand_2`.
        ///
        /// The record index addresses the measurement record of one shot.
        /// Each record slot is written at most once per circuit.
        Measure = 0x30,

        /// Reset `operand_1` to `|0⟩`.
        Reset = 0x31,

        /// Apply X to `operand_1` if record `operand_2` is 1.
        CondX = 0x40,

        /// Apply Y to `operand_1` if record `operand_2` is 1.
        CondY = 0x41,

        /// Apply Z to `operand_1` if record `operand_2` is 1.
        CondZ = 0x42,
    }

    impl Opcode {
        /// Decodes a raw opcode byte.
        ///
        /// Returns `None` for bytes that do not name an instruction.
        pub const fn from_u8(byte: u8) -> Option<Self> {
            match byte {
                0x01 => Some(Self::GateH),
                0x02 => Some(Self::GateS),
                0x03 => Some(Self::GateSAdj),
                0x10 => Some(Self::GateCNOT),
                0x11 => Some(Self::GateCZ),
                0x20 => Some(Self::PauliX),
                0x21 => Some(Self::PauliY),
                0x22 => Some(Self::PauliZ),
                0x23 => Some(Self::Idle),
                0x30 => Some(Self::Measure),
                0x31 => Some(Self::Reset),
                0x40 => Some(Self::CondX),
                0x41 => Some(Self::CondY),
                0x42 => Some(Self::CondZ),
                _ => None,
            }
        }

        /// True for H, S and S†.
        pub const fn is_single_qubit_gate(self) -> bool {
            matches!(self, Self::GateH | Self::GateS | Self::GateSAdj)
        }

        /// True for CNOT and CZ.
        pub const fn is_two_qubit_gate(self) -> bool {
            matches!(self, Self::GateCNOT | Self::GateCZ)
        }

        /// Short mnemonic used in gadget listings.
        pub const fn mnemonic(self) -> &'static str {
            match self {
                Self::GateH => "h",
                Self::GateS => "s",
                Self::GateSAdj => "sdg",
                Self::GateCNOT => "cx",
                Self::GateCZ => "cz",
                Self::PauliX => "x",
                Self::PauliY => "y",
                Self::PauliZ => "z",
                Self::Idle => "id",
                Self::Measure => "measure",
                Self::Reset => "reset",
                Self::CondX => "x.if",
                Self::CondY => "y.if",
                Self::CondZ => "z.if",
            }
        }
    }

    /// Binary instruction format for circuit operations.
    ///
    /// Encodes a single operation with its opcode and up to two operands.
    /// Operand meaning depends on the opcode: qubit indices for gates, a
    /// qubit and a record slot for measurements and conditional Paulis.
    #[repr(C)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Instruction {
        /// Operation code identifying the instruction type.
        ///
        /// Must match one of the values defined in [`Opcode`]. Backends
        /// reject unknown opcodes as a fatal circuit error.
        pub opcode: u8,

        /// First operand: target qubit, or control qubit for two-qubit gates.
        pub operand_1: u16,

        /// Second operand: target qubit of a two-qubit gate, or the record
        /// slot of a measurement or conditional Pauli. Zero otherwise.
        pub operand_2: u16,
    }

    impl Instruction {
        /// Constructs a new instruction with the specified opcode and operands.
        ///
        /// # Arguments
        ///
        /// * `opcode` - The operation to perform
        /// * `op1` - First operand (qubit index or control)
        /// * `op2` - Second operand (target qubit or record slot)
        pub const fn new(opcode: Opcode, op1: u16, op2: u16) -> Self {
            Self {
                opcode: opcode as u8,
                operand_1: op1,
                operand_2: op2,
            }
        }

        /// Decoded opcode, or `None` for a corrupted instruction.
        pub const fn opcode(&self) -> Option<Opcode> {
            Opcode::from_u8(self.opcode)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn opcode_bytes_round_trip_through_instructions() {
            let ops = [
                Opcode::GateH,
                Opcode::GateSAdj,
                Opcode::GateCZ,
                Opcode::Idle,
                Opcode::Measure,
                Opcode::CondY,
            ];
            for op in ops {
                let instr = Instruction::new(op, 3, 7);
                assert_eq!(instr.opcode(), Some(op));
            }
            assert_eq!(Opcode::from_u8(0xFF), None);
        }

        #[test]
        fn noise_classes_are_disjoint() {
            assert!(Opcode::GateH.is_single_qubit_gate());
            assert!(!Opcode::GateH.is_two_qubit_gate());
            assert!(Opcode::GateCZ.is_two_qubit_gate());
            assert!(!Opcode::PauliX.is_single_qubit_gate());
            assert!(!Opcode::Measure.is_two_qubit_gate());
        }
    }
}
