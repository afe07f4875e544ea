//! Lookup-table syndrome decoding.
//!
//! A [`SyndromeTable`] maps syndromes over a subset of generators to a
//! minimum-weight correction. Candidates are enumerated by weight, then by
//! qubit combination, then by type (`X < Y < Z`), and an entry is replaced
//! only by a candidate of strictly lower weight, so the stored correction is
//! also the first one found. A [`Decoder`] combines one or two tables
//! according to the code's [`DecodingStrategy`].

use crate::QecError;
use crate::code::{DecodingStrategy, ErrorPatterns, StabilizerCode};
use crate::pauli::{Pauli, PauliString};
use crate::syndrome::Syndrome;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::debug;

/// Table entry for one syndrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableEntry {
    pub correction: PauliString,
    pub weight: usize,
    /// Another candidate of equal weight produced the same syndrome and
    /// differs from `correction` by a logical operator.
    pub degenerate: bool,
}

/// Syndrome-to-correction table over a subset of a code's generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyndromeTable {
    generators: Vec<usize>,
    types: Vec<Pauli>,
    max_weight: usize,
    entries: BTreeMap<Syndrome, TableEntry>,
}

impl SyndromeTable {
    /// Enumerates every error over `types` of weight `0..=max_weight` and
    /// records its syndrome restricted to `generators`.
    pub fn build(
        code: &StabilizerCode,
        generators: &[usize],
        types: &[Pauli],
        max_weight: usize,
    ) -> Result<Self, QecError> {
        if let Some(&k) = generators.iter().find(|&&k| k >= code.generators().len()) {
            return Err(QecError::InvalidArgument(format!(
                "generator index {k} out of range for {}",
                code.name()
            )));
        }

        let mut entries: BTreeMap<Syndrome, TableEntry> = BTreeMap::new();
        let mut candidates = 0usize;
        for candidate in ErrorPatterns::bounded(code.num_qubits(), max_weight, types.to_vec())? {
            candidates += 1;
            let syndrome = Syndrome::from_bits(
                generators
                    .iter()
                    .map(|&k| code.generators()[k].anticommutes_unchecked(&candidate)),
            );
            let weight = candidate.weight();
            match entries.entry(syndrome) {
                Entry::Vacant(slot) => {
                    slot.insert(TableEntry {
                        correction: candidate,
                        weight,
                        degenerate: false,
                    });
                }
                Entry::Occupied(mut slot) => {
                    let entry = slot.get_mut();
                    if weight < entry.weight {
                        *entry = TableEntry {
                            correction: candidate,
                            weight,
                            degenerate: false,
                        };
                    } else if weight == entry.weight && !entry.degenerate {
                        let mut diff = entry.correction.clone();
                        diff.multiply_assign_unchecked(&candidate);
                        entry.degenerate = code.is_logical_error(&diff);
                    }
                }
            }
        }

        debug!(
            code = code.name(),
            generators = generators.len(),
            max_weight,
            candidates,
            syndromes = entries.len(),
            degenerate = entries.values().filter(|e| e.degenerate).count(),
            "built syndrome table"
        );

        Ok(Self {
            generators: generators.to_vec(),
            types: types.to_vec(),
            max_weight,
            entries,
        })
    }

    /// Generator indices this table's syndromes are taken over.
    pub fn generators(&self) -> &[usize] {
        &self.generators
    }

    pub fn types(&self) -> &[Pauli] {
        &self.types
    }

    pub fn max_weight(&self) -> usize {
        self.max_weight
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of stored syndromes other than all-zero.
    pub fn nontrivial_len(&self) -> usize {
        self.entries.keys().filter(|s| !s.is_trivial()).count()
    }

    /// Looks up a full-length syndrome by restricting it to this table's
    /// generators.
    pub fn lookup(&self, syndrome: &Syndrome) -> Option<&TableEntry> {
        self.entries.get(&syndrome.restrict(&self.generators))
    }

    /// Entries in syndrome order.
    pub fn iter(&self) -> impl Iterator<Item = (&Syndrome, &TableEntry)> {
        self.entries.iter()
    }
}

/// Why a decoding is flagged as ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AmbiguityKind {
    /// Equal-weight candidates disagreeing on a logical operator.
    Degenerate,
    /// Both X- and Z-type defects; a matching decoder would be needed.
    YErrorOrMultipleErrors,
}

/// Outcome class of a single decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DecodeStatus {
    /// All-zero syndrome.
    Trivial,
    Corrected,
    Ambiguous(AmbiguityKind),
    /// The syndrome is not in any table; no correction is applied.
    Uncorrectable,
}

impl DecodeStatus {
    pub fn is_ambiguous(self) -> bool {
        matches!(self, DecodeStatus::Ambiguous(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoding {
    pub correction: PauliString,
    pub status: DecodeStatus,
}

impl Decoding {
    /// Human-readable decoded-error description, e.g. `X on qubit 1`.
    pub fn description(&self) -> String {
        match self.status {
            DecodeStatus::Trivial => "no error".to_string(),
            DecodeStatus::Uncorrectable => "uncorrectable".to_string(),
            DecodeStatus::Ambiguous(AmbiguityKind::YErrorOrMultipleErrors) => {
                "Y-error-or-multiple-errors".to_string()
            }
            DecodeStatus::Ambiguous(AmbiguityKind::Degenerate) => {
                format!("{} (degenerate)", describe(&self.correction))
            }
            DecodeStatus::Corrected => describe(&self.correction),
        }
    }
}

/// `X on qubit 1, Z on qubit 4`.
pub fn describe(correction: &PauliString) -> String {
    if correction.is_identity() {
        return "no error".to_string();
    }
    correction
        .iter()
        .map(|(q, p)| format!("{p} on qubit {q}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Decoder for one code: its strategy plus the tables it consults.
#[derive(Debug, Clone)]
pub struct Decoder {
    strategy: DecodingStrategy,
    num_qubits: usize,
    num_generators: usize,
    /// `Joint`: one table. `Css`/`CssHeuristic`: the X-error table (over
    /// Z-type generators) followed by the Z-error table (over X-type
    /// generators).
    tables: Vec<SyndromeTable>,
}

impl Decoder {
    /// Builds tables with the code's correctable weight `(d - 1) / 2`.
    pub fn new(code: &StabilizerCode) -> Result<Self, QecError> {
        Self::with_max_weight(code, code.correctable_weight())
    }

    /// Builds tables enumerating errors up to `max_weight`. `0` gives a
    /// detect-only decoder.
    pub fn with_max_weight(code: &StabilizerCode, max_weight: usize) -> Result<Self, QecError> {
        let support = code.errors();
        let tables = match code.strategy() {
            DecodingStrategy::Joint => {
                let all: Vec<usize> = (0..code.generators().len()).collect();
                vec![SyndromeTable::build(code, &all, &support.types(), max_weight)?]
            }
            DecodingStrategy::Css | DecodingStrategy::CssHeuristic => {
                let x_types: Vec<Pauli> = [Pauli::X].into_iter().filter(|&p| support.contains(p)).collect();
                let z_types: Vec<Pauli> = [Pauli::Z].into_iter().filter(|&p| support.contains(p)).collect();
                vec![
                    SyndromeTable::build(code, &code.z_type_generators(), &x_types, max_weight)?,
                    SyndromeTable::build(code, &code.x_type_generators(), &z_types, max_weight)?,
                ]
            }
        };

        if code.distance() >= 3 && max_weight >= 1 {
            for table in &tables {
                if !table.types().is_empty() && table.nontrivial_len() == 0 {
                    return Err(QecError::MalformedCode(format!(
                        "{}: weight-{max_weight} errors produce no non-trivial syndrome \
                         although distance {} is claimed",
                        code.name(),
                        code.distance()
                    )));
                }
            }
        }

        Ok(Self {
            strategy: code.strategy(),
            num_qubits: code.num_qubits(),
            num_generators: code.generators().len(),
            tables,
        })
    }

    pub fn strategy(&self) -> DecodingStrategy {
        self.strategy
    }

    pub fn tables(&self) -> &[SyndromeTable] {
        &self.tables
    }

    /// Maps a full syndrome to a correction and its status.
    pub fn decode(&self, syndrome: &Syndrome) -> Result<Decoding, QecError> {
        if syndrome.len() != self.num_generators {
            return Err(QecError::InvalidArgument(format!(
                "syndrome has {} bits, decoder expects {}",
                syndrome.len(),
                self.num_generators
            )));
        }
        let identity = PauliString::identity(self.num_qubits);
        if syndrome.is_trivial() {
            return Ok(Decoding {
                correction: identity,
                status: DecodeStatus::Trivial,
            });
        }

        let mut correction = identity.clone();
        let mut degenerate = false;
        let mut defects = 0;
        for table in &self.tables {
            let part = syndrome.restrict(table.generators());
            if part.is_trivial() {
                continue;
            }
            defects += 1;
            let Some(entry) = table.lookup(syndrome) else {
                return Ok(Decoding {
                    correction: identity,
                    status: DecodeStatus::Uncorrectable,
                });
            };
            correction.multiply_assign_unchecked(&entry.correction);
            degenerate |= entry.degenerate;
        }

        let status = if self.strategy == DecodingStrategy::CssHeuristic && defects > 1 {
            DecodeStatus::Ambiguous(AmbiguityKind::YErrorOrMultipleErrors)
        } else if degenerate {
            DecodeStatus::Ambiguous(AmbiguityKind::Degenerate)
        } else {
            DecodeStatus::Corrected
        };
        Ok(Decoding { correction, status })
    }
}
