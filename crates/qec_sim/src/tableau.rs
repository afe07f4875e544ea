//! Stabilizer tableau in the CHP form.
//!
//! Rows `0..n` are destabilizers, rows `n..2n` stabilizers and row `2n` is
//! scratch space for deterministic measurements. Each row stores packed X
//! and Z bits over the `n` qubits plus a sign bit. Gates update every row by
//! their conjugation rule; measurement follows the Aaronson-Gottesman
//! procedure.

use qec_core::bit_utils::BitPack;
use rand::Rng;

/// Stabilizer state of `n` qubits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tableau {
    n: usize,
    x: Vec<Vec<u64>>,
    z: Vec<Vec<u64>>,
    r: Vec<bool>,
}

/// Power of `i` picked up when multiplying Pauli `(x1, z1)` by `(x2, z2)`.
#[inline(always)]
fn g(x1: bool, z1: bool, x2: bool, z2: bool) -> i32 {
    let (x2, z2) = (x2 as i32, z2 as i32);
    match (x1, z1) {
        (false, false) => 0,
        (true, true) => z2 - x2,
        (true, false) => z2 * (2 * x2 - 1),
        (false, true) => x2 * (1 - 2 * z2),
    }
}

impl Tableau {
    /// The state `|0…0⟩`.
    pub fn new(n: usize) -> Self {
        let words = BitPack::words_for(n);
        let rows = 2 * n + 1;
        let mut x = vec![vec![0u64; words]; rows];
        let mut z = vec![vec![0u64; words]; rows];
        for q in 0..n {
            BitPack::set(&mut x[q], q, true);
            BitPack::set(&mut z[n + q], q, true);
        }
        Self {
            n,
            x,
            z,
            r: vec![false; rows],
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.n
    }

    #[inline(always)]
    fn xb(&self, row: usize, q: usize) -> bool {
        BitPack::get(&self.x[row], q)
    }

    #[inline(always)]
    fn zb(&self, row: usize, q: usize) -> bool {
        BitPack::get(&self.z[row], q)
    }

    pub fn h(&mut self, q: usize) {
        for i in 0..2 * self.n {
            let (xi, zi) = (self.xb(i, q), self.zb(i, q));
            self.r[i] ^= xi && zi;
            BitPack::set(&mut self.x[i], q, zi);
            BitPack::set(&mut self.z[i], q, xi);
        }
    }

    pub fn s(&mut self, q: usize) {
        for i in 0..2 * self.n {
            let (xi, zi) = (self.xb(i, q), self.zb(i, q));
            self.r[i] ^= xi && zi;
            BitPack::set(&mut self.z[i], q, zi ^ xi);
        }
    }

    /// `S† = Z·S`.
    pub fn s_adj(&mut self, q: usize) {
        self.s(q);
        self.z(q);
    }

    pub fn x(&mut self, q: usize) {
        for i in 0..2 * self.n {
            self.r[i] ^= self.zb(i, q);
        }
    }

    pub fn y(&mut self, q: usize) {
        for i in 0..2 * self.n {
            self.r[i] ^= self.xb(i, q) ^ self.zb(i, q);
        }
    }

    pub fn z(&mut self, q: usize) {
        for i in 0..2 * self.n {
            self.r[i] ^= self.xb(i, q);
        }
    }

    pub fn cnot(&mut self, control: usize, target: usize) {
        let (a, b) = (control, target);
        for i in 0..2 * self.n {
            let (xa, za) = (self.xb(i, a), self.zb(i, a));
            let (xb, zb) = (self.xb(i, b), self.zb(i, b));
            self.r[i] ^= xa && zb && !(xb ^ za);
            BitPack::set(&mut self.x[i], b, xb ^ xa);
            BitPack::set(&mut self.z[i], a, za ^ zb);
        }
    }

    /// `CZ = H_b · CNOT_ab · H_b`.
    pub fn cz(&mut self, a: usize, b: usize) {
        self.h(b);
        self.cnot(a, b);
        self.h(b);
    }

    /// Left-multiplies row `h` by row `i`, tracking the sign.
    fn rowsum(&mut self, h: usize, i: usize) {
        let mut phase = 2 * (self.r[h] as i32) + 2 * (self.r[i] as i32);
        for q in 0..self.n {
            phase += g(self.xb(i, q), self.zb(i, q), self.xb(h, q), self.zb(h, q));
        }
        self.r[h] = phase.rem_euclid(4) == 2;
        let (xi, zi) = (self.x[i].clone(), self.z[i].clone());
        BitPack::xor_into(&mut self.x[h], &xi);
        BitPack::xor_into(&mut self.z[h], &zi);
    }

    fn copy_row(&mut self, dst: usize, src: usize) {
        self.x[dst] = self.x[src].clone();
        self.z[dst] = self.z[src].clone();
        self.r[dst] = self.r[src];
    }

    /// Outcome of a Z measurement on `q` if it is determined, without
    /// disturbing the state.
    pub fn peek(&mut self, q: usize) -> Option<bool> {
        let n = self.n;
        if (n..2 * n).any(|p| self.xb(p, q)) {
            return None;
        }
        let scratch = 2 * n;
        self.x[scratch].fill(0);
        self.z[scratch].fill(0);
        self.r[scratch] = false;
        for i in 0..n {
            if self.xb(i, q) {
                self.rowsum(scratch, i + n);
            }
        }
        Some(self.r[scratch])
    }

    /// Z-basis measurement of `q`, collapsing the state.
    pub fn measure<R: Rng + ?Sized>(&mut self, q: usize, rng: &mut R) -> bool {
        let n = self.n;
        let Some(p) = (n..2 * n).find(|&p| self.xb(p, q)) else {
            // Deterministic outcome; peek never returns None here.
            return self.peek(q).unwrap_or(false);
        };

        for i in 0..2 * n {
            if i != p && self.xb(i, q) {
                self.rowsum(i, p);
            }
        }
        self.copy_row(p - n, p);
        self.x[p].fill(0);
        self.z[p].fill(0);
        BitPack::set(&mut self.z[p], q, true);
        let outcome = rng.gen_bool(0.5);
        self.r[p] = outcome;
        outcome
    }

    /// Resets `q` to `|0⟩` by measuring and flipping on outcome 1.
    pub fn reset<R: Rng + ?Sized>(&mut self, q: usize, rng: &mut R) {
        if self.measure(q, rng) {
            self.x(q);
        }
    }
}
