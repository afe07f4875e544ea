//! Catalog of the supported code families.

use crate::QecError;
use crate::code::{
    CodeDefinition, DecodingStrategy, ErrorSupport, LogicalQubit, Readout, StabilizerCode,
};
use crate::pauli::{Pauli, PauliString};
use core::fmt;
use core::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeFamily {
    BitFlip,
    PhaseFlip,
    FiveQubit,
    Steane,
    Shor,
    BaconShor,
    Surface,
    Toric,
}

impl CodeFamily {
    pub const ALL: [CodeFamily; 8] = [
        CodeFamily::BitFlip,
        CodeFamily::PhaseFlip,
        CodeFamily::FiveQubit,
        CodeFamily::Steane,
        CodeFamily::Shor,
        CodeFamily::BaconShor,
        CodeFamily::Surface,
        CodeFamily::Toric,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            CodeFamily::BitFlip => "bit-flip",
            CodeFamily::PhaseFlip => "phase-flip",
            CodeFamily::FiveQubit => "five-qubit",
            CodeFamily::Steane => "steane",
            CodeFamily::Shor => "shor",
            CodeFamily::BaconShor => "bacon-shor",
            CodeFamily::Surface => "surface",
            CodeFamily::Toric => "toric",
        }
    }

    pub fn build(self) -> Result<StabilizerCode, QecError> {
        let def = match self {
            CodeFamily::BitFlip => repetition(self.name(), Pauli::Z, Pauli::X)?,
            CodeFamily::PhaseFlip => repetition(self.name(), Pauli::X, Pauli::Z)?,
            CodeFamily::FiveQubit => five_qubit()?,
            CodeFamily::Steane => steane()?,
            CodeFamily::Shor => shor()?,
            CodeFamily::BaconShor => bacon_shor()?,
            CodeFamily::Surface => surface()?,
            CodeFamily::Toric => toric()?,
        };
        StabilizerCode::new(def)
    }
}

impl FromStr for CodeFamily {
    type Err = QecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        let key = match key.as_str() {
            "repetition" | "bitflip" => "bit-flip",
            "phaseflip" => "phase-flip",
            "five" | "5-qubit" | "perfect" => "five-qubit",
            "shor-9" | "shor9" => "shor",
            "baconshor" => "bacon-shor",
            other => other,
        };
        CodeFamily::ALL
            .into_iter()
            .find(|f| f.name() == key)
            .ok_or_else(|| QecError::InvalidArgument(format!("unknown code family '{s}'")))
    }
}

impl fmt::Display for CodeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Factory for the fixed set of supported code families.
pub fn build_code(name: &str) -> Result<StabilizerCode, QecError> {
    name.parse::<CodeFamily>()?.build()
}

fn ops(n: usize, pauli: Pauli, supports: &[&[usize]]) -> Result<Vec<PauliString>, QecError> {
    supports
        .iter()
        .map(|s| PauliString::uniform(n, s, pauli))
        .collect()
}

fn logical(
    n: usize,
    x: (Pauli, &[usize]),
    z: (Pauli, &[usize]),
) -> Result<LogicalQubit, QecError> {
    Ok(LogicalQubit {
        x: PauliString::uniform(n, x.1, x.0)?,
        z: PauliString::uniform(n, z.1, z.0)?,
    })
}

/// Three-qubit repetition code with `check`-type parity checks, protecting
/// against `error`-type flips.
fn repetition(name: &str, check: Pauli, error: Pauli) -> Result<CodeDefinition, QecError> {
    let n = 3;
    let generators = ops(n, check, &[&[0, 1], &[1, 2]])?;
    let logicals = vec![logical(n, (error, &[0, 1, 2]), (check, &[0, 1, 2]))?];
    let mut def = CodeDefinition::new(name, n, generators, logicals, 3);
    def.errors = if error == Pauli::X {
        ErrorSupport::X_ONLY
    } else {
        ErrorSupport::Z_ONLY
    };
    def.readout = Readout::Majority;
    Ok(def)
}

fn five_qubit() -> Result<CodeDefinition, QecError> {
    let generators = ["XZZXI", "IXZZX", "XIXZZ", "ZXIXZ"]
        .into_iter()
        .map(str::parse)
        .collect::<Result<Vec<PauliString>, _>>()?;
    let logicals = vec![LogicalQubit {
        x: "XXXXX".parse()?,
        z: "ZZZZZ".parse()?,
    }];
    Ok(CodeDefinition::new("five-qubit", 5, generators, logicals, 3))
}

fn steane() -> Result<CodeDefinition, QecError> {
    let n = 7;
    let checks: [&[usize]; 3] = [&[0, 2, 4, 6], &[1, 2, 5, 6], &[3, 4, 5, 6]];
    let mut generators = ops(n, Pauli::X, &checks)?;
    generators.extend(ops(n, Pauli::Z, &checks)?);
    let all: Vec<usize> = (0..n).collect();
    let logicals = vec![logical(n, (Pauli::X, &all), (Pauli::Z, &all))?];
    let mut def = CodeDefinition::new("steane", n, generators, logicals, 3);
    def.strategy = DecodingStrategy::Css;
    Ok(def)
}

fn shor() -> Result<CodeDefinition, QecError> {
    let n = 9;
    let mut generators = ops(
        n,
        Pauli::Z,
        &[&[0, 1], &[1, 2], &[3, 4], &[4, 5], &[6, 7], &[7, 8]],
    )?;
    generators.extend(ops(n, Pauli::X, &[&[0, 1, 2, 3, 4, 5], &[3, 4, 5, 6, 7, 8]])?);
    let logicals = vec![logical(n, (Pauli::Z, &[0, 3, 6]), (Pauli::X, &[0, 1, 2]))?];
    let mut def = CodeDefinition::new("shor", n, generators, logicals, 3);
    def.strategy = DecodingStrategy::Css;
    Ok(def)
}

/// 3×3 grid, qubit `r * 3 + c`.
fn bacon_shor() -> Result<CodeDefinition, QecError> {
    let n = 9;
    let mut generators = ops(n, Pauli::X, &[&[0, 1, 2, 3, 4, 5], &[3, 4, 5, 6, 7, 8]])?;
    generators.extend(ops(n, Pauli::Z, &[&[0, 1, 3, 4, 6, 7], &[1, 2, 4, 5, 7, 8]])?);
    let logicals = vec![logical(n, (Pauli::X, &[0, 1, 2]), (Pauli::Z, &[0, 3, 6]))?];
    let mut def = CodeDefinition::new("bacon-shor", n, generators, logicals, 3);
    def.strategy = DecodingStrategy::Css;
    Ok(def)
}

/// Rotated distance-3 surface code on a 3×3 grid, qubit `r * 3 + c`.
fn surface() -> Result<CodeDefinition, QecError> {
    let n = 9;
    let mut generators = ops(n, Pauli::X, &[&[0, 1, 3, 4], &[4, 5, 7, 8], &[1, 2], &[6, 7]])?;
    generators.extend(ops(n, Pauli::Z, &[&[1, 2, 4, 5], &[3, 4, 6, 7], &[0, 3], &[5, 8]])?);
    let logicals = vec![logical(n, (Pauli::X, &[0, 3, 6]), (Pauli::Z, &[0, 1, 2]))?];
    let mut def = CodeDefinition::new("surface", n, generators, logicals, 3);
    def.strategy = DecodingStrategy::CssHeuristic;
    Ok(def)
}

/// Toric code on an `L × L` torus with `L = 3`. Horizontal edge `(r, c)` is
/// qubit `r * L + c`, vertical edge `(r, c)` is qubit `L² + r * L + c`. One
/// star and one plaquette are dropped since each family multiplies to the
/// identity.
fn toric() -> Result<CodeDefinition, QecError> {
    const L: usize = 3;
    let n = 2 * L * L;
    let h = |r: usize, c: usize| (r % L) * L + (c % L);
    let v = |r: usize, c: usize| L * L + (r % L) * L + (c % L);

    let mut stars = Vec::new();
    let mut plaquettes = Vec::new();
    for r in 0..L {
        for c in 0..L {
            stars.push(vec![h(r, c), h(r, c + L - 1), v(r, c), v(r + L - 1, c)]);
            plaquettes.push(vec![h(r, c), h(r + 1, c), v(r, c), v(r, c + 1)]);
        }
    }
    stars.pop();
    plaquettes.pop();

    let stars: Vec<&[usize]> = stars.iter().map(Vec::as_slice).collect();
    let plaquettes: Vec<&[usize]> = plaquettes.iter().map(Vec::as_slice).collect();
    let mut generators = ops(n, Pauli::X, &stars)?;
    generators.extend(ops(n, Pauli::Z, &plaquettes)?);

    let h_col: Vec<usize> = (0..L).map(|r| h(r, 0)).collect();
    let h_row: Vec<usize> = (0..L).map(|c| h(0, c)).collect();
    let v_row: Vec<usize> = (0..L).map(|c| v(0, c)).collect();
    let v_col: Vec<usize> = (0..L).map(|r| v(r, 0)).collect();
    let logicals = vec![
        logical(n, (Pauli::X, &h_col), (Pauli::Z, &h_row))?,
        logical(n, (Pauli::X, &v_row), (Pauli::Z, &v_col))?,
    ];

    let mut def = CodeDefinition::new("toric", n, generators, logicals, 3);
    def.strategy = DecodingStrategy::CssHeuristic;
    Ok(def)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_family_builds() {
        for family in CodeFamily::ALL {
            let code = family.build().unwrap();
            assert_eq!(code.name(), family.name());
        }
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("Steane".parse::<CodeFamily>().unwrap(), CodeFamily::Steane);
        assert_eq!("BACON_SHOR".parse::<CodeFamily>().unwrap(), CodeFamily::BaconShor);
        assert_eq!("shor-9".parse::<CodeFamily>().unwrap(), CodeFamily::Shor);
        assert!(build_code("golay").is_err());
    }

    #[test]
    fn catalog_parameters() {
        let params: Vec<String> = CodeFamily::ALL
            .into_iter()
            .map(|f| f.build().unwrap().parameters())
            .collect();
        assert_eq!(
            params,
            [
                "[[3, 1, 3]]",
                "[[3, 1, 3]]",
                "[[5, 1, 3]]",
                "[[7, 1, 3]]",
                "[[9, 1, 3]]",
                "[[9, 1, 3]]",
                "[[9, 1, 3]]",
                "[[18, 2, 3]]",
            ]
        );
    }
}
