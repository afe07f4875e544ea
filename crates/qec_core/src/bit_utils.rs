//! Word-packed bit helpers shared by the Pauli and GF(2) code.

pub struct BitPack;

impl BitPack {
    /// Number of `u64` words needed to hold `bits` bits.
    #[inline(always)]
    pub fn words_for(bits: usize) -> usize {
        bits.div_ceil(64)
    }

    #[inline(always)]
    pub fn get(storage: &[u64], index: usize) -> bool {
        let word = storage[index / 64];
        let bit = index % 64;
        (word >> bit) & 1 == 1
    }

    #[inline(always)]
    pub fn toggle(storage: &mut [u64], index: usize) {
        let word_idx = index / 64;
        let bit_idx = index % 64;
        storage[word_idx] ^= 1 << bit_idx;
    }

    #[inline(always)]
    pub fn set(storage: &mut [u64], index: usize, val: bool) {
        let word_idx = index / 64;
        let bit_idx = index % 64;
        if val {
            storage[word_idx] |= 1 << bit_idx;
        } else {
            storage[word_idx] &= !(1 << bit_idx);
        }
    }

    /// XORs `src` into `dst` word by word. Slices must be the same length.
    #[inline(always)]
    pub fn xor_into(dst: &mut [u64], src: &[u64]) {
        for (d, s) in dst.iter_mut().zip(src) {
            *d ^= *s;
        }
    }

    /// Parity of the bitwise AND of two equal-length slices.
    #[inline(always)]
    pub fn and_parity(a: &[u64], b: &[u64]) -> bool {
        let ones: u32 = a.iter().zip(b).map(|(x, y)| (x & y).count_ones()).sum();
        ones & 1 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_toggle_across_word_boundary() {
        let mut words = vec![0u64; BitPack::words_for(130)];
        assert_eq!(words.len(), 3);
        BitPack::set(&mut words, 63, true);
        BitPack::set(&mut words, 64, true);
        BitPack::toggle(&mut words, 129);
        assert!(BitPack::get(&words, 63));
        assert!(BitPack::get(&words, 64));
        assert!(BitPack::get(&words, 129));
        BitPack::set(&mut words, 64, false);
        assert!(!BitPack::get(&words, 64));
        assert_eq!(words, vec![1 << 63, 0, 0b10]);
    }

    #[test]
    fn and_parity_counts_overlap() {
        let a = [0b1011u64, 1];
        let b = [0b0011u64, 1];
        // overlap: bits 0, 1 and word-1 bit 0
        assert!(BitPack::and_parity(&a, &b));
        let mut c = a;
        BitPack::xor_into(&mut c, &b);
        assert_eq!(c, [0b1000, 0]);
    }
}
