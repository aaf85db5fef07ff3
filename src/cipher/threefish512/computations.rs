use zeroize::Zeroize;

use super::{KEY_SCHEDULE_PARITY, PERMUTATION, ROTATIONS};
use crate::observer::Observer;

/// Expanded key material: the 8 key words plus the parity word, and the
/// 2 tweak words plus their XOR.
pub(crate) struct KeySchedule {
    key: [u64; 9],
    tweak: [u64; 3],
}

impl KeySchedule {
    pub(crate) fn new(key: &[u64; 8], tweak: &[u64; 2]) -> Self {
        let mut k = [0u64; 9];
        k[..8].copy_from_slice(key);
        k[8] = key.iter().fold(KEY_SCHEDULE_PARITY, |acc, word| acc ^ word);

        Self {
            key: k,
            tweak: [tweak[0], tweak[1], tweak[0] ^ tweak[1]],
        }
    }

    /// Subkey `s`: the extended key rotated by `s`, with the tweak words
    /// added to words 5 and 6 and the injection counter added to word 7.
    #[inline(always)]
    pub(crate) fn subkey(&self, s: usize) -> [u64; 8] {
        let mut out: [u64; 8] = core::array::from_fn(|i| self.key[(s + i) % 9]);

        out[5] = out[5].wrapping_add(self.tweak[s % 3]);
        out[6] = out[6].wrapping_add(self.tweak[(s + 1) % 3]);
        out[7] = out[7].wrapping_add(s as u64);

        out
    }
}

impl Drop for KeySchedule {
    fn drop(&mut self) {
        self.key.zeroize();
        self.tweak.zeroize();
    }
}

#[inline(always)]
fn inject(x: &mut [u64; 8], subkey: &[u64; 8]) {
    for (word, k) in x.iter_mut().zip(subkey) {
        *word = word.wrapping_add(*k);
    }
}

#[inline(always)]
fn eject(x: &mut [u64; 8], subkey: &[u64; 8]) {
    for (word, k) in x.iter_mut().zip(subkey) {
        *word = word.wrapping_sub(*k);
    }
}

/// One mixing round: MIX on the four word pairs, then the word permutation.
#[cfg(not(feature = "speed"))]
#[inline(always)]
fn mix(x: &mut [u64; 8], rotations: &[u32; 4]) {
    for (pair, &r) in rotations.iter().enumerate() {
        let (a, b) = (2 * pair, 2 * pair + 1);

        x[a] = x[a].wrapping_add(x[b]);
        x[b] = x[b].rotate_left(r) ^ x[a];
    }

    let permuted: [u64; 8] = core::array::from_fn(|i| x[PERMUTATION[i]]);
    *x = permuted;
}

/// Exact inverse of one mixing round.
#[inline(always)]
fn unmix(x: &mut [u64; 8], rotations: &[u32; 4]) {
    let mut unpermuted = [0u64; 8];
    for (i, &source) in PERMUTATION.iter().enumerate() {
        unpermuted[source] = x[i];
    }
    *x = unpermuted;

    for (pair, &r) in rotations.iter().enumerate() {
        let (a, b) = (2 * pair, 2 * pair + 1);

        x[b] = (x[b] ^ x[a]).rotate_right(r);
        x[a] = x[a].wrapping_sub(x[b]);
    }
}

#[cfg(not(feature = "speed"))]
pub(crate) fn all_rounds<O: Observer>(
    x: &mut [u64; 8],
    schedule: &KeySchedule,
    rounds: usize,
    observer: &O,
) {
    for d in 0..rounds {
        if d % 4 == 0 {
            inject(x, &schedule.subkey(d / 4));
        }

        mix(x, &ROTATIONS[d % 8]);

        if (d + 1) % 4 == 0 {
            observer.on_round(d + 1, x);
        }
    }

    inject(x, &schedule.subkey(rounds / 4));
}

/// Unrolled variant: each group of four rounds is written out with the
/// permutation folded into the word indices, so no words move between
/// rounds. Four rounds of the permutation are the identity, which puts
/// the state back in natural order at every injection point.
#[cfg(feature = "speed")]
pub(crate) fn all_rounds<O: Observer>(
    x: &mut [u64; 8],
    schedule: &KeySchedule,
    rounds: usize,
    observer: &O,
) {
    macro_rules! R {
        ($rot:expr, $a0:expr, $b0:expr, $a1:expr, $b1:expr, $a2:expr, $b2:expr, $a3:expr, $b3:expr) => {{
            let r = &ROTATIONS[$rot];

            x[$a0] = x[$a0].wrapping_add(x[$b0]);
            x[$b0] = x[$b0].rotate_left(r[0]) ^ x[$a0];

            x[$a1] = x[$a1].wrapping_add(x[$b1]);
            x[$b1] = x[$b1].rotate_left(r[1]) ^ x[$a1];

            x[$a2] = x[$a2].wrapping_add(x[$b2]);
            x[$b2] = x[$b2].rotate_left(r[2]) ^ x[$a2];

            x[$a3] = x[$a3].wrapping_add(x[$b3]);
            x[$b3] = x[$b3].rotate_left(r[3]) ^ x[$a3];
        }};
    }

    for group in 0..rounds / 4 {
        inject(x, &schedule.subkey(group));

        let base = (group % 2) * 4;

        R!(base, 0, 1, 2, 3, 4, 5, 6, 7);
        R!(base + 1, 2, 1, 4, 7, 6, 5, 0, 3);
        R!(base + 2, 4, 1, 6, 3, 0, 5, 2, 7);
        R!(base + 3, 6, 1, 0, 7, 2, 5, 4, 3);

        observer.on_round((group + 1) * 4, x);
    }

    inject(x, &schedule.subkey(rounds / 4));
}

pub(crate) fn all_rounds_inverse(x: &mut [u64; 8], schedule: &KeySchedule, rounds: usize) {
    eject(x, &schedule.subkey(rounds / 4));

    for d in (0..rounds).rev() {
        unmix(x, &ROTATIONS[d % 8]);

        if d % 4 == 0 {
            eject(x, &schedule.subkey(d / 4));
        }
    }
}
