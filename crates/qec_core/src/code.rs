//! Stabilizer code descriptor and its construction-time validation.

use crate::QecError;
use crate::bit_utils::BitPack;
use crate::gf2::BinaryMatrix;
use crate::pauli::{Pauli, PauliString};
use crate::syndrome::Syndrome;
use core::fmt;
use core::str::FromStr;
use serde::Serialize;

/// The Pauli error types a code is designed to correct.
///
/// Repetition codes protect against a single error type; their distance is
/// measured over that restricted set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorSupport {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl ErrorSupport {
    pub const ALL: Self = Self {
        x: true,
        y: true,
        z: true,
    };
    pub const X_ONLY: Self = Self {
        x: true,
        y: false,
        z: false,
    };
    pub const Z_ONLY: Self = Self {
        x: false,
        y: false,
        z: true,
    };

    pub fn contains(self, pauli: Pauli) -> bool {
        match pauli {
            Pauli::I => true,
            Pauli::X => self.x,
            Pauli::Y => self.y,
            Pauli::Z => self.z,
        }
    }

    /// Supported non-identity types in `X < Y < Z` order.
    pub fn types(self) -> Vec<Pauli> {
        Pauli::ERRORS
            .into_iter()
            .filter(|&p| self.contains(p))
            .collect()
    }

    pub fn is_empty(self) -> bool {
        !(self.x || self.y || self.z)
    }
}

impl FromStr for ErrorSupport {
    type Err = QecError;

    /// Parses a letter set such as `XYZ` or `x`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = Self {
            x: false,
            y: false,
            z: false,
        };
        for c in s.trim().chars() {
            match Pauli::try_from(c)? {
                Pauli::X => out.x = true,
                Pauli::Y => out.y = true,
                Pauli::Z => out.z = true,
                Pauli::I => {}
            }
        }
        if out.is_empty() {
            return Err(QecError::InvalidArgument(format!(
                "error set '{s}' names no Pauli type"
            )));
        }
        Ok(out)
    }
}

impl fmt::Display for ErrorSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in self.types() {
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

/// How syndromes are turned into corrections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DecodingStrategy {
    /// One table over every generator.
    Joint,
    /// Independent tables: X errors against Z-type generators, Z errors
    /// against X-type generators.
    Css,
    /// `Css` tables; a syndrome with both X- and Z-type defects is reported
    /// as ambiguous instead of being resolved by matching.
    CssHeuristic,
}

impl FromStr for DecodingStrategy {
    type Err = QecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "joint" => Ok(Self::Joint),
            "css" => Ok(Self::Css),
            "css-heuristic" | "heuristic" => Ok(Self::CssHeuristic),
            other => Err(QecError::InvalidArgument(format!(
                "unknown decoding strategy '{other}'"
            ))),
        }
    }
}

impl fmt::Display for DecodingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Joint => "joint",
            Self::Css => "css",
            Self::CssHeuristic => "css-heuristic",
        })
    }
}

/// How corrected readout bits are combined into a logical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Readout {
    Parity,
    Majority,
}

impl FromStr for Readout {
    type Err = QecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parity" => Ok(Self::Parity),
            "majority" => Ok(Self::Majority),
            other => Err(QecError::InvalidArgument(format!(
                "unknown readout '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Parity => "parity",
            Self::Majority => "majority",
        })
    }
}

/// One encoded qubit's logical operator pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogicalQubit {
    pub x: PauliString,
    pub z: PauliString,
}

/// Everything needed to describe a code, before validation.
#[derive(Debug, Clone)]
pub struct CodeDefinition {
    pub name: String,
    pub num_qubits: usize,
    pub generators: Vec<PauliString>,
    pub logicals: Vec<LogicalQubit>,
    pub distance: usize,
    pub errors: ErrorSupport,
    pub strategy: DecodingStrategy,
    pub readout: Readout,
}

impl CodeDefinition {
    /// Definition with full `XYZ` support, joint decoding and parity readout.
    pub fn new(
        name: impl Into<String>,
        num_qubits: usize,
        generators: Vec<PauliString>,
        logicals: Vec<LogicalQubit>,
        distance: usize,
    ) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            generators,
            logicals,
            distance,
            errors: ErrorSupport::ALL,
            strategy: DecodingStrategy::Joint,
            readout: Readout::Parity,
        }
    }
}

/// A validated stabilizer code. Read-only after construction.
#[derive(Debug, Clone, Serialize)]
pub struct StabilizerCode {
    name: String,
    num_qubits: usize,
    generators: Vec<PauliString>,
    logicals: Vec<LogicalQubit>,
    distance: usize,
    errors: ErrorSupport,
    strategy: DecodingStrategy,
    readout: Readout,
    #[serde(skip)]
    pure_errors: Vec<PauliString>,
}

fn malformed(name: &str, msg: impl fmt::Display) -> QecError {
    QecError::MalformedCode(format!("{name}: {msg}"))
}

/// Packs `(x | z)` of a Pauli string into one row of length `2n`.
fn xz_row(p: &PauliString) -> Vec<u64> {
    let n = p.num_qubits();
    let mut row = vec![0u64; BitPack::words_for(2 * n)];
    for (q, pauli) in p.iter() {
        let (x, z) = pauli.bits();
        BitPack::set(&mut row, q, x);
        BitPack::set(&mut row, n + q, z);
    }
    row
}

/// Packs `(z | x)`, so that the dot product with an `(x | z)` vector is the
/// symplectic product with `p`.
fn zx_row(p: &PauliString) -> Vec<u64> {
    let n = p.num_qubits();
    let mut row = vec![0u64; BitPack::words_for(2 * n)];
    for (q, pauli) in p.iter() {
        let (x, z) = pauli.bits();
        BitPack::set(&mut row, q, z);
        BitPack::set(&mut row, n + q, x);
    }
    row
}

/// Checks the structural invariants of a code definition.
///
/// Generators must be non-identity, mutually commuting and independent over
/// GF(2). Each logical operator must commute with every generator, `X̄ᵢ`
/// must anticommute with `Z̄ᵢ` and commute with every other pair, and the
/// logical operators must be independent of the stabilizer group.
pub fn validate(def: &CodeDefinition) -> Result<(), QecError> {
    let name = def.name.as_str();
    let n = def.num_qubits;

    if n == 0 {
        return Err(malformed(name, "code has no qubits"));
    }
    if def.generators.is_empty() {
        return Err(malformed(name, "code has no generators"));
    }
    if def.logicals.is_empty() {
        return Err(malformed(name, "code has no logical qubits"));
    }
    if def.distance == 0 || def.distance % 2 == 0 {
        return Err(malformed(
            name,
            format!("distance {} is not a positive odd integer", def.distance),
        ));
    }
    if def.errors.is_empty() {
        return Err(malformed(name, "code corrects no error type"));
    }

    let all_ops = def
        .generators
        .iter()
        .chain(def.logicals.iter().flat_map(|l| [&l.x, &l.z]));
    for op in all_ops {
        if op.num_qubits() != n {
            return Err(malformed(
                name,
                format!("operator {op} has {} qubits, expected {n}", op.num_qubits()),
            ));
        }
    }

    for (k, g) in def.generators.iter().enumerate() {
        if g.is_identity() {
            return Err(malformed(name, format!("generator {k} is the identity")));
        }
        for (j, h) in def.generators.iter().enumerate().skip(k + 1) {
            if g.anticommutes_unchecked(h) {
                return Err(malformed(
                    name,
                    format!("generators {k} ({g}) and {j} ({h}) anticommute"),
                ));
            }
        }
        for (i, l) in def.logicals.iter().enumerate() {
            for (label, op) in [("X", &l.x), ("Z", &l.z)] {
                if g.anticommutes_unchecked(op) {
                    return Err(malformed(
                        name,
                        format!("generator {k} ({g}) anticommutes with logical {label}{i}"),
                    ));
                }
            }
        }
        if def.strategy != DecodingStrategy::Joint && !(g.is_x_type() || g.is_z_type()) {
            return Err(malformed(
                name,
                format!("generator {k} ({g}) mixes X and Z but the code decodes as CSS"),
            ));
        }
    }

    for (i, a) in def.logicals.iter().enumerate() {
        if !a.x.anticommutes_unchecked(&a.z) {
            return Err(malformed(
                name,
                format!("logical X{i} and Z{i} commute"),
            ));
        }
        for (j, b) in def.logicals.iter().enumerate().skip(i + 1) {
            let crossed = a.x.anticommutes_unchecked(&b.z)
                || a.z.anticommutes_unchecked(&b.x)
                || a.x.anticommutes_unchecked(&b.x)
                || a.z.anticommutes_unchecked(&b.z);
            if crossed {
                return Err(malformed(
                    name,
                    format!("logical pairs {i} and {j} do not commute"),
                ));
            }
            for q in 0..n {
                let (pa, pb) = (a.z.get(q), b.z.get(q));
                if pa != Pauli::I && pb != Pauli::I && pa != pb {
                    return Err(malformed(
                        name,
                        format!("logical Z{i} and Z{j} need different readout bases on qubit {q}"),
                    ));
                }
            }
        }
    }

    let mut stabilizers = BinaryMatrix::new(2 * n);
    for g in &def.generators {
        stabilizers.push_row(xz_row(g));
    }
    if stabilizers.rank() != def.generators.len() {
        return Err(malformed(name, "generators are not independent"));
    }
    let mut with_logicals = stabilizers;
    for l in &def.logicals {
        with_logicals.push_row(xz_row(&l.x));
        with_logicals.push_row(xz_row(&l.z));
    }
    if with_logicals.rank() != def.generators.len() + 2 * def.logicals.len() {
        return Err(malformed(
            name,
            "logical operators are not independent of the stabilizer group",
        ));
    }

    Ok(())
}

impl StabilizerCode {
    /// Validates `def` and derives the per-generator pure errors.
    ///
    /// Also rejects a claimed distance `d` when some logical error of weight
    /// below `d` over the supported error types goes undetected.
    pub fn new(def: CodeDefinition) -> Result<Self, QecError> {
        validate(&def)?;
        let pure_errors = solve_pure_errors(&def)?;
        let code = Self {
            name: def.name,
            num_qubits: def.num_qubits,
            generators: def.generators,
            logicals: def.logicals,
            distance: def.distance,
            errors: def.errors,
            strategy: def.strategy,
            readout: def.readout,
            pure_errors,
        };
        ErrorPatterns::bounded(code.num_qubits, code.distance - 1, code.errors.types())?;
        if let Some(w) = code.min_undetectable_logical_weight(code.distance - 1) {
            return Err(malformed(
                &code.name,
                format!(
                    "claimed distance {} but a weight-{w} logical error is undetectable",
                    code.distance
                ),
            ));
        }
        Ok(code)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn num_logicals(&self) -> usize {
        self.logicals.len()
    }

    pub fn generators(&self) -> &[PauliString] {
        &self.generators
    }

    pub fn logicals(&self) -> &[LogicalQubit] {
        &self.logicals
    }

    /// `X̄` of the first logical qubit.
    pub fn logical_x(&self) -> &PauliString {
        &self.logicals[0].x
    }

    /// `Z̄` of the first logical qubit.
    pub fn logical_z(&self) -> &PauliString {
        &self.logicals[0].z
    }

    pub fn distance(&self) -> usize {
        self.distance
    }

    pub fn errors(&self) -> ErrorSupport {
        self.errors
    }

    pub fn strategy(&self) -> DecodingStrategy {
        self.strategy
    }

    pub fn readout(&self) -> Readout {
        self.readout
    }

    /// Number of simultaneous errors the code corrects, `(d - 1) / 2`.
    pub fn correctable_weight(&self) -> usize {
        (self.distance - 1) / 2
    }

    /// Pure error of generator `k`: anticommutes with generator `k` only and
    /// commutes with every logical operator.
    pub fn pure_error(&self, k: usize) -> &PauliString {
        &self.pure_errors[k]
    }

    /// Indices of generators containing no `X` or `Y`.
    pub fn z_type_generators(&self) -> Vec<usize> {
        (0..self.generators.len())
            .filter(|&k| self.generators[k].is_z_type())
            .collect()
    }

    /// Indices of generators containing no `Z` or `Y`.
    pub fn x_type_generators(&self) -> Vec<usize> {
        (0..self.generators.len())
            .filter(|&k| self.generators[k].is_x_type())
            .collect()
    }

    /// Syndrome of `error`: bit `k` is set iff it anticommutes with generator `k`.
    pub fn syndrome_of(&self, error: &PauliString) -> Result<Syndrome, QecError> {
        if error.num_qubits() != self.num_qubits {
            return Err(QecError::InvalidArgument(format!(
                "error has {} qubits, code {} has {}",
                error.num_qubits(),
                self.name,
                self.num_qubits
            )));
        }
        Ok(Syndrome::from_bits(
            self.generators
                .iter()
                .map(|g| g.anticommutes_unchecked(error)),
        ))
    }

    /// True if `op` flips some logical operator.
    pub fn is_logical_error(&self, op: &PauliString) -> bool {
        self.logicals
            .iter()
            .any(|l| l.x.anticommutes_unchecked(op) || l.z.anticommutes_unchecked(op))
    }

    /// Smallest weight of an undetectable logical error using the supported
    /// error types, searching up to `limit`. `None` if no such error exists
    /// within the limit.
    pub fn min_undetectable_logical_weight(&self, limit: usize) -> Option<usize> {
        ErrorPatterns::new(self.num_qubits, limit, self.errors.types())
            .filter(|p| !p.is_identity())
            .find(|p| {
                self.generators.iter().all(|g| !g.anticommutes_unchecked(p))
                    && self.is_logical_error(p)
            })
            .map(|p| p.weight())
    }

    /// `[[n, k, d]]` label.
    pub fn parameters(&self) -> String {
        format!(
            "[[{}, {}, {}]]",
            self.num_qubits,
            self.logicals.len(),
            self.distance
        )
    }
}

impl fmt::Display for StabilizerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.name, self.parameters())?;
        for (k, g) in self.generators.iter().enumerate() {
            writeln!(f, "  g{k}: {g}")?;
        }
        for (i, l) in self.logicals.iter().enumerate() {
            writeln!(f, "  X{i}: {}", l.x)?;
            writeln!(f, "  Z{i}: {}", l.z)?;
        }
        Ok(())
    }
}

fn solve_pure_errors(def: &CodeDefinition) -> Result<Vec<PauliString>, QecError> {
    let n = def.num_qubits;
    let mut constraints = BinaryMatrix::new(2 * n);
    for g in &def.generators {
        constraints.push_row(zx_row(g));
    }
    for l in &def.logicals {
        constraints.push_row(zx_row(&l.x));
        constraints.push_row(zx_row(&l.z));
    }

    let words = BitPack::words_for(n);
    (0..def.generators.len())
        .map(|k| {
            let mut rhs = vec![false; constraints.rows()];
            rhs[k] = true;
            let v = constraints
                .solve(&rhs)
                .ok_or_else(|| malformed(&def.name, format!("no pure error for generator {k}")))?;
            let mut x = vec![0u64; words];
            let mut z = vec![0u64; words];
            for q in 0..n {
                BitPack::set(&mut x, q, BitPack::get(&v, q));
                BitPack::set(&mut z, q, BitPack::get(&v, n + q));
            }
            PauliString::from_words(n, x, z)
        })
        .collect()
}

/// Enumerates every Pauli string of weight `0..=max_weight` over `types`.
///
/// Order: by weight, then qubit combinations lexicographically, then type
/// assignments lexicographically with `X < Y < Z`. The first pattern with a
/// given syndrome is therefore also the smallest in this order.
pub struct ErrorPatterns {
    num_qubits: usize,
    max_weight: usize,
    types: Vec<Pauli>,
    weight: usize,
    combo: Vec<usize>,
    assign: Vec<usize>,
    done: bool,
}

/// Upper bound on the patterns a distance check or table build may enumerate.
pub const MAX_ERROR_PATTERNS: u64 = 1 << 22;

impl ErrorPatterns {
    /// Number of patterns `new(num_qubits, max_weight, types)` yields, `None`
    /// on `u64` overflow.
    pub fn total(num_qubits: usize, max_weight: usize, num_types: usize) -> Option<u64> {
        if num_types == 0 {
            return Some(1);
        }
        let t = num_types as u64;
        let mut total = 0u64;
        let mut choose = 1u64;
        let mut power = 1u64;
        for w in 0..=max_weight.min(num_qubits) {
            if w > 0 {
                // C(n, w) = C(n, w - 1) * (n - w + 1) / w stays exact.
                choose = choose.checked_mul((num_qubits - w + 1) as u64)? / w as u64;
                power = power.checked_mul(t)?;
            }
            total = total.checked_add(choose.checked_mul(power)?)?;
        }
        Some(total)
    }

    /// Like [`ErrorPatterns::new`], but fails with
    /// [`QecError::InvalidArgument`] when more than [`MAX_ERROR_PATTERNS`]
    /// patterns would be enumerated.
    pub fn bounded(num_qubits: usize, max_weight: usize, types: Vec<Pauli>) -> Result<Self, QecError> {
        match Self::total(num_qubits, max_weight, types.len()) {
            Some(total) if total <= MAX_ERROR_PATTERNS => Ok(Self::new(num_qubits, max_weight, types)),
            _ => Err(QecError::InvalidArgument(format!(
                "enumerating errors up to weight {max_weight} on {num_qubits} qubits \
                 exceeds {MAX_ERROR_PATTERNS} patterns"
            ))),
        }
    }

    pub fn new(num_qubits: usize, max_weight: usize, types: Vec<Pauli>) -> Self {
        let max_weight = if types.is_empty() {
            0
        } else {
            max_weight.min(num_qubits)
        };
        Self {
            num_qubits,
            max_weight,
            types,
            weight: 0,
            combo: Vec::new(),
            assign: Vec::new(),
            done: false,
        }
    }

    fn current(&self) -> PauliString {
        let mut p = PauliString::identity(self.num_qubits);
        for (&q, &t) in self.combo.iter().zip(&self.assign) {
            p.set(q, self.types[t]);
        }
        p
    }

    fn advance_assign(&mut self) -> bool {
        for slot in self.assign.iter_mut().rev() {
            *slot += 1;
            if *slot < self.types.len() {
                return true;
            }
            *slot = 0;
        }
        false
    }

    fn advance_combo(&mut self) -> bool {
        let w = self.combo.len();
        for i in (0..w).rev() {
            if self.combo[i] < self.num_qubits - w + i {
                self.combo[i] += 1;
                for j in i + 1..w {
                    self.combo[j] = self.combo[j - 1] + 1;
                }
                return true;
            }
        }
        false
    }

    fn start_weight(&mut self, weight: usize) {
        self.weight = weight;
        self.combo = (0..weight).collect();
        self.assign = vec![0; weight];
    }
}

impl Iterator for ErrorPatterns {
    type Item = PauliString;

    fn next(&mut self) -> Option<PauliString> {
        if self.done {
            return None;
        }
        let out = self.current();

        if !self.advance_assign() && !self.advance_combo() {
            if self.weight < self.max_weight {
                self.start_weight(self.weight + 1);
            } else {
                self.done = true;
            }
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> PauliString {
        s.parse().unwrap()
    }

    fn bit_flip_def() -> CodeDefinition {
        let mut def = CodeDefinition::new(
            "bit-flip",
            3,
            vec![p("ZZI"), p("IZZ")],
            vec![LogicalQubit {
                x: p("XXX"),
                z: p("ZZZ"),
            }],
            3,
        );
        def.errors = ErrorSupport::X_ONLY;
        def
    }

    #[test]
    fn accepts_a_valid_code() {
        let code = StabilizerCode::new(bit_flip_def()).unwrap();
        assert_eq!(code.parameters(), "[[3, 1, 3]]");
        assert_eq!(code.correctable_weight(), 1);
        assert_eq!(code.syndrome_of(&p("IXI")).unwrap().to_string(), "11");
        assert_eq!(code.syndrome_of(&p("XII")).unwrap().to_string(), "10");
    }

    #[test]
    fn rejects_anticommuting_generators() {
        let mut def = bit_flip_def();
        def.generators = vec![p("ZZI"), p("XII")];
        assert!(matches!(StabilizerCode::new(def), Err(QecError::MalformedCode(_))));
    }

    #[test]
    fn rejects_dependent_generators() {
        let mut def = bit_flip_def();
        def.generators = vec![p("ZZI"), p("IZZ"), p("ZIZ")];
        let err = StabilizerCode::new(def).unwrap_err();
        assert!(err.to_string().contains("independent"));
    }

    #[test]
    fn rejects_logicals_that_commute_with_each_other() {
        let mut def = bit_flip_def();
        def.logicals[0].z = p("ZZI");
        assert!(StabilizerCode::new(def).is_err());
    }

    #[test]
    fn rejects_even_distance_and_length_mismatch() {
        let mut def = bit_flip_def();
        def.distance = 2;
        assert!(StabilizerCode::new(def).is_err());
        let mut def = bit_flip_def();
        def.generators[0] = p("ZZII");
        assert!(StabilizerCode::new(def).is_err());
    }

    #[test]
    fn css_strategy_rejects_mixed_generators() {
        let mut def = bit_flip_def();
        def.strategy = DecodingStrategy::Css;
        assert!(StabilizerCode::new(def.clone()).is_ok());
        def.generators = vec![p("XZZXI"), p("IXZZX"), p("XIXZZ"), p("ZXIXZ")];
        def.num_qubits = 5;
        def.logicals = vec![LogicalQubit {
            x: p("XXXXX"),
            z: p("ZZZZZ"),
        }];
        assert!(StabilizerCode::new(def).is_err());
    }

    #[test]
    fn pure_errors_flip_exactly_one_generator() {
        let code = StabilizerCode::new(bit_flip_def()).unwrap();
        for k in 0..code.generators().len() {
            let t = code.pure_error(k);
            let s = code.syndrome_of(t).unwrap();
            for j in 0..code.generators().len() {
                assert_eq!(s.get(j), j == k);
            }
            assert!(!code.is_logical_error(t));
        }
    }

    #[test]
    fn restricted_error_support_sets_distance() {
        let code = StabilizerCode::new(bit_flip_def()).unwrap();
        assert_eq!(code.min_undetectable_logical_weight(3), Some(3));

        // Z errors are undetectable at weight 1.
        let mut def = bit_flip_def();
        def.errors = ErrorSupport::ALL;
        let err = StabilizerCode::new(def).unwrap_err();
        assert!(err.to_string().contains("weight-1"));

        let mut def = bit_flip_def();
        def.distance = 5;
        assert!(StabilizerCode::new(def).is_err());
    }

    #[test]
    fn patterns_enumerate_in_qubit_then_type_order() {
        let all: Vec<String> = ErrorPatterns::new(2, 1, Pauli::ERRORS.to_vec())
            .map(|p| p.to_string())
            .collect();
        assert_eq!(all, ["II", "XI", "YI", "ZI", "IX", "IY", "IZ"]);
        let count = ErrorPatterns::new(4, 2, vec![Pauli::X, Pauli::Z]).count();
        // 1 + 4*2 + C(4,2)*4
        assert_eq!(count, 1 + 8 + 24);
        assert_eq!(ErrorPatterns::total(4, 2, 2), Some(count as u64));
        assert_eq!(ErrorPatterns::total(4, 9, 0), Some(1));
    }

    #[test]
    fn enumeration_budget_rejects_large_searches() {
        assert!(ErrorPatterns::bounded(18, 2, Pauli::ERRORS.to_vec()).is_ok());
        let err = ErrorPatterns::bounded(18, 10, Pauli::ERRORS.to_vec()).err().unwrap();
        assert!(matches!(err, QecError::InvalidArgument(_)));
        assert_eq!(ErrorPatterns::total(200, 200, 3), None);
        assert!(ErrorPatterns::bounded(200, 200, Pauli::ERRORS.to_vec()).is_err());
    }

    #[test]
    fn error_support_parses_letter_sets() {
        assert_eq!("xz".parse::<ErrorSupport>().unwrap().to_string(), "XZ");
        assert_eq!("XYZ".parse::<ErrorSupport>().unwrap(), ErrorSupport::ALL);
        assert!("".parse::<ErrorSupport>().is_err());
    }
}
