//! Syndrome bit-strings.

use crate::QecError;
use bitvec::prelude::*;
use core::fmt;
use core::str::FromStr;
use serde::{Serialize, Serializer};

/// Measured generator eigenvalues, bit `k` for generator `k` (`1` = `-1`).
///
/// Rendered with bit 0 first, so the syndrome of `X` on the middle qubit of
/// the bit-flip code prints as `11`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Syndrome(BitVec<u8, Lsb0>);

impl Syndrome {
    pub fn zeros(len: usize) -> Self {
        Self(bitvec![u8, Lsb0; 0; len])
    }

    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        Self(bits.into_iter().collect())
    }

    pub fn from_bitslice(bits: &BitSlice<u8, Lsb0>) -> Self {
        Self(bits.to_bitvec())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, k: usize) -> bool {
        self.0[k]
    }

    pub fn set(&mut self, k: usize, value: bool) {
        self.0.set(k, value);
    }

    /// True if every generator reported `+1`.
    pub fn is_trivial(&self) -> bool {
        self.0.not_any()
    }

    pub fn bits(&self) -> &BitSlice<u8, Lsb0> {
        &self.0
    }

    /// Sub-syndrome over the listed generator positions, in the given order.
    pub fn restrict(&self, positions: &[usize]) -> Syndrome {
        Self(positions.iter().map(|&k| self.0[k]).collect())
    }
}

impl fmt::Display for Syndrome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.0.iter() {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Syndrome {
    type Err = QecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(QecError::InvalidArgument(format!(
                    "syndrome digit '{other}' is not 0 or 1"
                ))),
            })
            .collect::<Result<BitVec<u8, Lsb0>, _>>()
            .map(Self)
    }
}

impl Serialize for Syndrome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
