//! Pauli algebra over bit-vector pairs.
//!
//! A Pauli string on `n` qubits is stored as two packed bit vectors, the
//! X-part and the Z-part. Qubit `i` carries `I` (0,0), `X` (1,0), `Z` (0,1) or
//! `Y` (1,1). Multiplication is the XOR of both parts and two strings commute
//! iff their symplectic inner product is even. Global phase is not tracked:
//! decoding only needs eigenvalue parity.

use crate::QecError;
use crate::bit_utils::BitPack;
use core::fmt;
use core::str::FromStr;
use serde::{Serialize, Serializer};

/// Single-qubit Pauli operator.
///
/// The derived ordering `I < X < Y < Z` is the tie-break order used when
/// enumerating candidate errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Pauli {
    I,
    X,
    Y,
    Z,
}

impl Pauli {
    /// The three non-identity Paulis in enumeration order.
    pub const ERRORS: [Pauli; 3] = [Pauli::X, Pauli::Y, Pauli::Z];

    pub const fn from_bits(x: bool, z: bool) -> Self {
        match (x, z) {
            (false, false) => Pauli::I,
            (true, false) => Pauli::X,
            (true, true) => Pauli::Y,
            (false, true) => Pauli::Z,
        }
    }

    /// `(x, z)` bit pair of this operator.
    pub const fn bits(self) -> (bool, bool) {
        match self {
            Pauli::I => (false, false),
            Pauli::X => (true, false),
            Pauli::Y => (true, true),
            Pauli::Z => (false, true),
        }
    }

    /// Single-qubit commutation: equal operators and the identity commute.
    pub fn commutes_with(self, other: Pauli) -> bool {
        self == Pauli::I || other == Pauli::I || self == other
    }

    pub const fn as_char(self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }
}

impl TryFrom<char> for Pauli {
    type Error = QecError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'I' | '_' => Ok(Pauli::I),
            'X' => Ok(Pauli::X),
            'Y' => Ok(Pauli::Y),
            'Z' => Ok(Pauli::Z),
            other => Err(QecError::InvalidArgument(format!(
                "'{other}' is not a Pauli operator"
            ))),
        }
    }
}

impl FromStr for Pauli {
    type Err = QecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Pauli::try_from(c),
            _ => Err(QecError::InvalidArgument(format!(
                "expected a single Pauli letter, got '{s}'"
            ))),
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Multi-qubit Pauli operator without phase.
///
/// Immutable from the outside once constructed; the engine combines strings
/// through [`PauliString::multiply`] rather than editing them in place.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PauliString {
    num_qubits: usize,
    x: Vec<u64>,
    z: Vec<u64>,
}

impl PauliString {
    /// The identity on `num_qubits` qubits.
    pub fn identity(num_qubits: usize) -> Self {
        let words = BitPack::words_for(num_qubits);
        Self {
            num_qubits,
            x: vec![0; words],
            z: vec![0; words],
        }
    }

    /// A single non-trivial Pauli at `qubit`.
    pub fn single(num_qubits: usize, qubit: usize, pauli: Pauli) -> Result<Self, QecError> {
        Self::from_sparse(num_qubits, &[(qubit, pauli)])
    }

    /// Builds a string from `(qubit, pauli)` pairs. Repeated qubits multiply.
    pub fn from_sparse(num_qubits: usize, terms: &[(usize, Pauli)]) -> Result<Self, QecError> {
        let mut out = Self::identity(num_qubits);
        for &(qubit, pauli) in terms {
            if qubit >= num_qubits {
                return Err(QecError::InvalidArgument(format!(
                    "qubit {qubit} out of range for {num_qubits}-qubit Pauli string"
                )));
            }
            let (x, z) = pauli.bits();
            if x {
                BitPack::toggle(&mut out.x, qubit);
            }
            if z {
                BitPack::toggle(&mut out.z, qubit);
            }
        }
        Ok(out)
    }

    /// Same Pauli on every listed qubit, e.g. `XXX` on a block.
    pub fn uniform(num_qubits: usize, qubits: &[usize], pauli: Pauli) -> Result<Self, QecError> {
        let terms: Vec<(usize, Pauli)> = qubits.iter().map(|&q| (q, pauli)).collect();
        Self::from_sparse(num_qubits, &terms)
    }

    /// Builds a string from packed X and Z words.
    ///
    /// Bits beyond `num_qubits` are cleared so equality stays structural.
    pub fn from_words(num_qubits: usize, mut x: Vec<u64>, mut z: Vec<u64>) -> Result<Self, QecError> {
        let words = BitPack::words_for(num_qubits);
        if x.len() != words || z.len() != words {
            return Err(QecError::InvalidArgument(format!(
                "expected {words} words per part for {num_qubits} qubits"
            )));
        }
        let tail = num_qubits % 64;
        if tail != 0 {
            let mask = (1u64 << tail) - 1;
            x[words - 1] &= mask;
            z[words - 1] &= mask;
        }
        Ok(Self { num_qubits, x, z })
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn x_bits(&self) -> &[u64] {
        &self.x
    }

    pub fn z_bits(&self) -> &[u64] {
        &self.z
    }

    /// Pauli acting on `qubit`. Panics if `qubit` is out of range.
    pub fn get(&self, qubit: usize) -> Pauli {
        assert!(qubit < self.num_qubits, "qubit {qubit} out of range");
        Pauli::from_bits(BitPack::get(&self.x, qubit), BitPack::get(&self.z, qubit))
    }

    pub(crate) fn set(&mut self, qubit: usize, pauli: Pauli) {
        let (x, z) = pauli.bits();
        BitPack::set(&mut self.x, qubit, x);
        BitPack::set(&mut self.z, qubit, z);
    }

    /// Number of qubits on which the string is not the identity.
    pub fn weight(&self) -> usize {
        self.x
            .iter()
            .zip(&self.z)
            .map(|(x, z)| (x | z).count_ones() as usize)
            .sum()
    }

    pub fn is_identity(&self) -> bool {
        self.x.iter().chain(&self.z).all(|&w| w == 0)
    }

    /// True if every non-identity entry is `X`.
    pub fn is_x_type(&self) -> bool {
        self.z.iter().all(|&w| w == 0)
    }

    /// True if every non-identity entry is `Z`.
    pub fn is_z_type(&self) -> bool {
        self.x.iter().all(|&w| w == 0)
    }

    /// Non-identity entries in ascending qubit order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Pauli)> + '_ {
        (0..self.num_qubits).filter_map(move |q| match self.get(q) {
            Pauli::I => None,
            p => Some((q, p)),
        })
    }

    /// Qubits on which the string acts non-trivially.
    pub fn support(&self) -> Vec<usize> {
        self.iter().map(|(q, _)| q).collect()
    }

    fn check_len(&self, other: &PauliString) -> Result<(), QecError> {
        if self.num_qubits != other.num_qubits {
            return Err(QecError::InvalidArgument(format!(
                "Pauli length mismatch: {} vs {}",
                self.num_qubits, other.num_qubits
            )));
        }
        Ok(())
    }

    /// True iff the symplectic inner product with `other` is even.
    pub fn commutes(&self, other: &PauliString) -> Result<bool, QecError> {
        self.check_len(other)?;
        Ok(!self.anticommutes_unchecked(other))
    }

    /// Symplectic product without the length check. Callers guarantee equal
    /// lengths, which every code-owned string satisfies by construction.
    pub(crate) fn anticommutes_unchecked(&self, other: &PauliString) -> bool {
        BitPack::and_parity(&self.x, &other.z) ^ BitPack::and_parity(&self.z, &other.x)
    }

    /// Product of two strings, ignoring phase.
    pub fn multiply(&self, other: &PauliString) -> Result<PauliString, QecError> {
        self.check_len(other)?;
        let mut out = self.clone();
        out.multiply_assign_unchecked(other);
        Ok(out)
    }

    pub(crate) fn multiply_assign_unchecked(&mut self, other: &PauliString) {
        BitPack::xor_into(&mut self.x, &other.x);
        BitPack::xor_into(&mut self.z, &other.z);
    }

    /// Restriction to the X-part (every `Y` becomes `X`, every `Z` becomes `I`).
    pub fn x_part(&self) -> PauliString {
        Self {
            num_qubits: self.num_qubits,
            x: self.x.clone(),
            z: vec![0; self.z.len()],
        }
    }

    /// Restriction to the Z-part (every `Y` becomes `Z`, every `X` becomes `I`).
    pub fn z_part(&self) -> PauliString {
        Self {
            num_qubits: self.num_qubits,
            x: vec![0; self.x.len()],
            z: self.z.clone(),
        }
    }

    /// Sparse rendering such as `X1 Z5`, or `I` for the identity.
    pub fn to_sparse_string(&self) -> String {
        if self.is_identity() {
            return "I".to_string();
        }
        self.iter()
            .map(|(q, p)| format!("{p}{q}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Free-function form of [`PauliString::commutes`].
pub fn commutes(a: &PauliString, b: &PauliString) -> Result<bool, QecError> {
    a.commutes(b)
}

/// Free-function form of [`PauliString::multiply`].
pub fn multiply(a: &PauliString, b: &PauliString) -> Result<PauliString, QecError> {
    a.multiply(b)
}

/// Free-function form of [`PauliString::weight`].
pub fn weight(p: &PauliString) -> usize {
    p.weight()
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for q in 0..self.num_qubits {
            write!(f, "{}", self.get(q))?;
        }
        Ok(())
    }
}

impl fmt::Debug for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PauliString({self})")
    }
}

impl FromStr for PauliString {
    type Err = QecError;

    /// Parses a dense string such as `XZZXI`. `_` is accepted for `I`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(QecError::InvalidArgument("empty Pauli string".into()));
        }
        let paulis = s
            .chars()
            .map(Pauli::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let mut out = Self::identity(paulis.len());
        for (q, p) in paulis.into_iter().enumerate() {
            out.set(q, p);
        }
        Ok(out)
    }
}

impl Serialize for PauliString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
