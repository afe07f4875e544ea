use anyhow::{Context, Result, ensure};
use bitvec::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// Loads a .b8 file (packed shot records, least-significant bit first).
pub fn load_b8_file<P: AsRef<Path>>(path: P) -> Result<BitVec<u8, Lsb0>> {
    let path = path.as_ref();
    let mut file =
        File::open(path).with_context(|| format!("Failed to open .b8 file {}", path.display()))?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    Ok(BitVec::<u8, Lsb0>::from_vec(buffer))
}

/// Splits raw file bits into shots of `bits_per_shot`, each padded to whole
/// bytes in the file. A trailing partial shot is ignored.
pub fn slice_shots(raw_bits: &BitSlice<u8, Lsb0>, bits_per_shot: usize) -> Vec<&BitSlice<u8, Lsb0>> {
    if bits_per_shot == 0 {
        return Vec::new();
    }
    let stride_bits = bits_per_shot.div_ceil(8) * 8;
    raw_bits
        .chunks_exact(stride_bits)
        .map(|shot| &shot[..bits_per_shot])
        .collect()
}

/// Packs shots of exactly `bits_per_shot` bits into .b8 bytes.
pub fn encode_shots<'a, I>(shots: I, bits_per_shot: usize) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a BitSlice<u8, Lsb0>>,
{
    let stride_bits = bits_per_shot.div_ceil(8) * 8;
    let mut out: BitVec<u8, Lsb0> = BitVec::new();
    for (i, shot) in shots.into_iter().enumerate() {
        ensure!(
            shot.len() == bits_per_shot,
            "shot {i} has {} bits, expected {bits_per_shot}",
            shot.len()
        );
        out.extend_from_bitslice(shot);
        out.resize(out.len() + stride_bits - bits_per_shot, false);
    }
    Ok(out.into_vec())
}

/// Writes shots to a .b8 file.
pub fn write_b8_file<'a, P, I>(path: P, shots: I, bits_per_shot: usize) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a BitSlice<u8, Lsb0>>,
{
    let path = path.as_ref();
    let bytes = encode_shots(shots, bits_per_shot)?;
    let mut file = BufWriter::new(
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
    );
    file.write_all(&bytes)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shots_are_padded_to_bytes() {
        let a = bitvec![u8, Lsb0; 1, 0, 1, 1, 0, 0, 0, 0, 1, 1];
        let b = bitvec![u8, Lsb0; 0, 1, 0, 0, 0, 0, 0, 0, 0, 1];
        let bytes = encode_shots([a.as_bitslice(), b.as_bitslice()], 10).unwrap();
        assert_eq!(bytes, vec![0b0000_1101, 0b0000_0011, 0b0000_0010, 0b0000_0010]);

        let raw = BitVec::<u8, Lsb0>::from_vec(bytes);
        let shots = slice_shots(&raw, 10);
        assert_eq!(shots.len(), 2);
        assert_eq!(shots[0], a.as_bitslice());
        assert_eq!(shots[1], b.as_bitslice());
    }

    #[test]
    fn partial_trailing_shot_is_dropped() {
        let raw = BitVec::<u8, Lsb0>::from_vec(vec![0xFF, 0x01, 0x00]);
        assert_eq!(slice_shots(&raw, 9).len(), 1);
        assert!(slice_shots(&raw, 0).is_empty());
    }

    #[test]
    fn wrong_shot_length_is_rejected() {
        let a = bitvec![u8, Lsb0; 1, 0];
        assert!(encode_shots([a.as_bitslice()], 3).is_err());
    }
}
