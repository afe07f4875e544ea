//! Error channels and error-pattern sampling.
//!
//! Pauli channels are pure functions from a uniform draw to a Pauli and are
//! sampled by the trial runner, so the injected pattern is known and can be
//! compared with the decoder's correction. Damping and thermal channels are
//! not Pauli channels; they are handed to the simulation backend as
//! [`NoiseModel`] parameters and are never decoded.

use crate::QecError;
use crate::pauli::{Pauli, PauliString};
use core::fmt;
use core::str::FromStr;
use rand::Rng;
use serde::Serialize;

/// A parametrized single-qubit error channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ErrorChannel {
    /// With probability `p`, one of `X`, `Y`, `Z` uniformly.
    Depolarizing { p: f64 },
    BitFlip { p: f64 },
    PhaseFlip { p: f64 },
    BitPhaseFlip { p: f64 },
    CustomPauli { px: f64, py: f64, pz: f64 },
    AmplitudeDamping { gamma: f64 },
    PhaseDamping { gamma: f64 },
    ThermalRelaxation { t1: f64, t2: f64, gate_time: f64 },
}

fn check_probability(name: &str, p: f64) -> Result<(), QecError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(QecError::InvalidArgument(format!(
            "{name} = {p} is outside [0, 1]"
        )));
    }
    Ok(())
}

impl ErrorChannel {
    pub fn depolarizing(p: f64) -> Result<Self, QecError> {
        Self::Depolarizing { p }.validated()
    }

    pub fn bit_flip(p: f64) -> Result<Self, QecError> {
        Self::BitFlip { p }.validated()
    }

    pub fn phase_flip(p: f64) -> Result<Self, QecError> {
        Self::PhaseFlip { p }.validated()
    }

    pub fn bit_phase_flip(p: f64) -> Result<Self, QecError> {
        Self::BitPhaseFlip { p }.validated()
    }

    /// Fails with `InvalidArgument` if `px + py + pz > 1`.
    pub fn custom_pauli(px: f64, py: f64, pz: f64) -> Result<Self, QecError> {
        Self::CustomPauli { px, py, pz }.validated()
    }

    pub fn amplitude_damping(gamma: f64) -> Result<Self, QecError> {
        Self::AmplitudeDamping { gamma }.validated()
    }

    pub fn phase_damping(gamma: f64) -> Result<Self, QecError> {
        Self::PhaseDamping { gamma }.validated()
    }

    /// Requires `t1 > 0`, `0 < t2 <= 2·t1` and `gate_time >= 0`.
    pub fn thermal_relaxation(t1: f64, t2: f64, gate_time: f64) -> Result<Self, QecError> {
        Self::ThermalRelaxation { t1, t2, gate_time }.validated()
    }

    fn validated(self) -> Result<Self, QecError> {
        self.validate()?;
        Ok(self)
    }

    /// Rejects out-of-range parameters. Values are never clamped.
    pub fn validate(&self) -> Result<(), QecError> {
        match *self {
            Self::Depolarizing { p }
            | Self::BitFlip { p }
            | Self::PhaseFlip { p }
            | Self::BitPhaseFlip { p } => check_probability("p", p),
            Self::CustomPauli { px, py, pz } => {
                check_probability("px", px)?;
                check_probability("py", py)?;
                check_probability("pz", pz)?;
                if px + py + pz > 1.0 {
                    return Err(QecError::InvalidArgument(format!(
                        "px + py + pz = {} exceeds 1",
                        px + py + pz
                    )));
                }
                Ok(())
            }
            Self::AmplitudeDamping { gamma } | Self::PhaseDamping { gamma } => {
                check_probability("gamma", gamma)
            }
            Self::ThermalRelaxation { t1, t2, gate_time } => {
                if !(t1 > 0.0 && t1.is_finite()) {
                    return Err(QecError::InvalidArgument(format!("t1 = {t1} must be positive")));
                }
                if !(t2 > 0.0 && t2 <= 2.0 * t1) {
                    return Err(QecError::InvalidArgument(format!(
                        "t2 = {t2} must satisfy 0 < t2 <= 2·t1 = {}",
                        2.0 * t1
                    )));
                }
                if !(gate_time >= 0.0 && gate_time.is_finite()) {
                    return Err(QecError::InvalidArgument(format!(
                        "gate_time = {gate_time} must be non-negative"
                    )));
                }
                Ok(())
            }
        }
    }

    /// True for channels expressible as a Pauli mixture.
    pub fn is_pauli(&self) -> bool {
        self.pauli_probabilities().is_some()
    }

    /// `(px, py, pz)` of a Pauli channel, `None` for backend-delegated ones.
    pub fn pauli_probabilities(&self) -> Option<[f64; 3]> {
        match *self {
            Self::Depolarizing { p } => Some([p / 3.0; 3]),
            Self::BitFlip { p } => Some([p, 0.0, 0.0]),
            Self::PhaseFlip { p } => Some([0.0, 0.0, p]),
            Self::BitPhaseFlip { p } => Some([0.0, p, 0.0]),
            Self::CustomPauli { px, py, pz } => Some([px, py, pz]),
            Self::AmplitudeDamping { .. }
            | Self::PhaseDamping { .. }
            | Self::ThermalRelaxation { .. } => None,
        }
    }

    /// Maps a uniform draw `u ∈ [0, 1)` to the Pauli this channel applies.
    ///
    /// The unit interval is split as `[X | Y | Z | I]` by the channel's
    /// probabilities. Backend-delegated channels always return `I`.
    pub fn pauli_for_draw(&self, u: f64) -> Pauli {
        match self.pauli_probabilities() {
            Some(rates) => pauli_from_rates(&rates, u),
            None => Pauli::I,
        }
    }

    /// Draws one Pauli per target qubit and returns the composite pattern.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        num_qubits: usize,
        targets: &[usize],
        rng: &mut R,
    ) -> Result<(PauliString, Vec<(usize, Pauli)>), QecError> {
        let applied: Vec<(usize, Pauli)> = targets
            .iter()
            .filter_map(|&q| match self.pauli_for_draw(rng.gen_range(0.0..1.0)) {
                Pauli::I => None,
                p => Some((q, p)),
            })
            .collect();
        let pattern = PauliString::from_sparse(num_qubits, &applied)?;
        Ok((pattern, applied))
    }

    /// Gate classes the channel attaches to when used as backend noise.
    ///
    /// Thermal relaxation is a single-qubit process and skips two-qubit gates.
    pub fn default_targets(&self) -> NoiseTargets {
        match self {
            Self::ThermalRelaxation { .. } => NoiseTargets {
                single_qubit: true,
                two_qubit: false,
                idle: true,
            },
            _ => NoiseTargets::ALL,
        }
    }
}

/// Maps a uniform draw `u ∈ [0, 1)` onto `[X | Y | Z | I]` split by
/// `rates = [px, py, pz]`.
pub fn pauli_from_rates(rates: &[f64; 3], u: f64) -> Pauli {
    let [px, py, pz] = *rates;
    if u < px {
        Pauli::X
    } else if u < px + py {
        Pauli::Y
    } else if u < px + py + pz {
        Pauli::Z
    } else {
        Pauli::I
    }
}

fn parse_params<const N: usize>(kind: &str, args: &str) -> Result<[f64; N], QecError> {
    let values = args
        .split(',')
        .map(|v| {
            v.trim().parse::<f64>().map_err(|_| {
                QecError::InvalidArgument(format!("{kind}: '{v}' is not a number"))
            })
        })
        .collect::<Result<Vec<f64>, _>>()?;
    <[f64; N]>::try_from(values).map_err(|v| {
        QecError::InvalidArgument(format!(
            "{kind} takes {N} parameter(s), got {}",
            v.len()
        ))
    })
}

impl FromStr for ErrorChannel {
    type Err = QecError;

    /// Parses `kind:params`, e.g. `depolarizing:0.01` or `thermal:50,70,0.1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, args) = s.trim().split_once(':').ok_or_else(|| {
            QecError::InvalidArgument(format!("channel '{s}' must look like kind:params"))
        })?;
        let kind = kind.trim().to_ascii_lowercase();
        match kind.as_str() {
            "depolarizing" | "depol" => {
                let [p] = parse_params(&kind, args)?;
                Self::depolarizing(p)
            }
            "bit-flip" => {
                let [p] = parse_params(&kind, args)?;
                Self::bit_flip(p)
            }
            "phase-flip" => {
                let [p] = parse_params(&kind, args)?;
                Self::phase_flip(p)
            }
            "bit-phase-flip" => {
                let [p] = parse_params(&kind, args)?;
                Self::bit_phase_flip(p)
            }
            "custom" | "pauli" => {
                let [px, py, pz] = parse_params(&kind, args)?;
                Self::custom_pauli(px, py, pz)
            }
            "amplitude-damping" => {
                let [g] = parse_params(&kind, args)?;
                Self::amplitude_damping(g)
            }
            "phase-damping" => {
                let [g] = parse_params(&kind, args)?;
                Self::phase_damping(g)
            }
            "thermal" => {
                let [t1, t2, gate_time] = parse_params(&kind, args)?;
                Self::thermal_relaxation(t1, t2, gate_time)
            }
            other => Err(QecError::InvalidArgument(format!(
                "unknown channel '{other}'"
            ))),
        }
    }
}

impl fmt::Display for ErrorChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Depolarizing { p } => write!(f, "depolarizing:{p}"),
            Self::BitFlip { p } => write!(f, "bit-flip:{p}"),
            Self::PhaseFlip { p } => write!(f, "phase-flip:{p}"),
            Self::BitPhaseFlip { p } => write!(f, "bit-phase-flip:{p}"),
            Self::CustomPauli { px, py, pz } => write!(f, "custom:{px},{py},{pz}"),
            Self::AmplitudeDamping { gamma } => write!(f, "amplitude-damping:{gamma}"),
            Self::PhaseDamping { gamma } => write!(f, "phase-damping:{gamma}"),
            Self::ThermalRelaxation { t1, t2, gate_time } => {
                write!(f, "thermal:{t1},{t2},{gate_time}")
            }
        }
    }
}

/// Gate classes a backend noise channel is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NoiseTargets {
    /// After every H, S and S†.
    pub single_qubit: bool,
    /// After every CNOT and CZ, on both qubits.
    pub two_qubit: bool,
    /// At every idle marker in the error window.
    pub idle: bool,
}

impl NoiseTargets {
    pub const ALL: Self = Self {
        single_qubit: true,
        two_qubit: true,
        idle: true,
    };
    pub const IDLE: Self = Self {
        single_qubit: false,
        two_qubit: false,
        idle: true,
    };
}

/// Backend-level noise: a channel plus the gate classes it follows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NoiseModel {
    pub channel: ErrorChannel,
    pub targets: NoiseTargets,
}

impl NoiseModel {
    /// Attaches `channel` to its default gate classes.
    pub fn new(channel: ErrorChannel) -> Self {
        Self {
            channel,
            targets: channel.default_targets(),
        }
    }

    /// Attaches `channel` to the error window only.
    pub fn idle(channel: ErrorChannel) -> Self {
        Self {
            channel,
            targets: NoiseTargets::IDLE,
        }
    }
}

/// Independently per qubit, applies an error with probability `rate`, its
/// type drawn uniformly from `allowed`.
///
/// Returns the composite pattern and the `(qubit, type)` pairs applied.
pub fn apply_random_errors<R: Rng + ?Sized>(
    qubit_count: usize,
    rate: f64,
    allowed: &[Pauli],
    rng: &mut R,
) -> Result<(PauliString, Vec<(usize, Pauli)>), QecError> {
    check_probability("rate", rate)?;
    let allowed: Vec<Pauli> = allowed.iter().copied().filter(|&p| p != Pauli::I).collect();
    if allowed.is_empty() {
        return Err(QecError::InvalidArgument(
            "no error types allowed for random injection".into(),
        ));
    }
    let mut applied = Vec::new();
    for q in 0..qubit_count {
        if rng.gen_bool(rate) {
            applied.push((q, allowed[rng.gen_range(0..allowed.len())]));
        }
    }
    let pattern = PauliString::from_sparse(qubit_count, &applied)?;
    Ok((pattern, applied))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn custom_pauli_rejects_oversubscribed_probabilities() {
        let err = ErrorChannel::custom_pauli(0.5, 0.3, 0.3).unwrap_err();
        assert!(matches!(err, QecError::InvalidArgument(_)));
        assert!(ErrorChannel::custom_pauli(0.5, 0.25, 0.25).is_ok());
    }

    #[test]
    fn probabilities_outside_unit_interval_are_rejected() {
        assert!(ErrorChannel::depolarizing(1.5).is_err());
        assert!(ErrorChannel::bit_flip(-0.1).is_err());
        assert!(ErrorChannel::amplitude_damping(f64::NAN).is_err());
    }

    #[test]
    fn thermal_relaxation_bounds() {
        assert!(ErrorChannel::thermal_relaxation(50.0, 70.0, 0.1).is_ok());
        assert!(ErrorChannel::thermal_relaxation(50.0, 120.0, 0.1).is_err());
        assert!(ErrorChannel::thermal_relaxation(0.0, 1.0, 0.1).is_err());
        assert!(ErrorChannel::thermal_relaxation(50.0, 70.0, -1.0).is_err());
    }

    #[test]
    fn draw_partitions_unit_interval() {
        let c = ErrorChannel::custom_pauli(0.1, 0.2, 0.3).unwrap();
        assert_eq!(c.pauli_for_draw(0.05), Pauli::X);
        assert_eq!(c.pauli_for_draw(0.25), Pauli::Y);
        assert_eq!(c.pauli_for_draw(0.55), Pauli::Z);
        assert_eq!(c.pauli_for_draw(0.7), Pauli::I);

        let d = ErrorChannel::depolarizing(0.3).unwrap();
        assert_eq!(d.pauli_for_draw(0.05), Pauli::X);
        assert_eq!(d.pauli_for_draw(0.15), Pauli::Y);
        assert_eq!(d.pauli_for_draw(0.25), Pauli::Z);
        assert_eq!(d.pauli_for_draw(0.35), Pauli::I);

        let a = ErrorChannel::amplitude_damping(0.9).unwrap();
        assert!(!a.is_pauli());
        assert_eq!(a.pauli_for_draw(0.0), Pauli::I);
        assert_eq!(pauli_from_rates(&[0.0, 0.0, 0.5], 0.2), Pauli::Z);
        assert_eq!(pauli_from_rates(&[0.0; 3], 0.0), Pauli::I);
    }

    #[test]
    fn parses_channel_strings() {
        assert_eq!(
            "depolarizing:0.01".parse::<ErrorChannel>().unwrap(),
            ErrorChannel::Depolarizing { p: 0.01 }
        );
        assert_eq!(
            "custom:0.1,0,0.2".parse::<ErrorChannel>().unwrap(),
            ErrorChannel::CustomPauli {
                px: 0.1,
                py: 0.0,
                pz: 0.2
            }
        );
        let t: ErrorChannel = "thermal:50,70,0.1".parse().unwrap();
        assert_eq!(t.default_targets(), NoiseTargets {
            single_qubit: true,
            two_qubit: false,
            idle: true
        });
        assert!("bit-flip".parse::<ErrorChannel>().is_err());
        assert!("bit-flip:0.1,0.2".parse::<ErrorChannel>().is_err());
        assert!("laser:0.1".parse::<ErrorChannel>().is_err());
        let c: ErrorChannel = "phase-damping:0.2".parse().unwrap();
        assert_eq!(c.to_string().parse::<ErrorChannel>().unwrap(), c);
    }

    #[test]
    fn random_errors_report_what_they_applied() {
        let mut rng = StdRng::seed_from_u64(7);
        let (pattern, applied) = apply_random_errors(20, 0.5, &[Pauli::X], &mut rng).unwrap();
        assert_eq!(pattern.weight(), applied.len());
        for (q, p) in &applied {
            assert_eq!(*p, Pauli::X);
            assert_eq!(pattern.get(*q), Pauli::X);
        }

        let (none, applied) = apply_random_errors(20, 0.0, &Pauli::ERRORS, &mut rng).unwrap();
        assert!(none.is_identity());
        assert!(applied.is_empty());
        assert!(apply_random_errors(3, 0.1, &[], &mut rng).is_err());
        assert!(apply_random_errors(3, 2.0, &[Pauli::Z], &mut rng).is_err());
    }

    #[test]
    fn sample_targets_only_listed_qubits() {
        let mut rng = StdRng::seed_from_u64(1);
        let c = ErrorChannel::bit_flip(1.0).unwrap();
        let (pattern, applied) = c.sample(5, &[1, 3], &mut rng).unwrap();
        assert_eq!(pattern.to_string(), "IXIXI");
        assert_eq!(applied, vec![(1, Pauli::X), (3, Pauli::X)]);
    }
}
