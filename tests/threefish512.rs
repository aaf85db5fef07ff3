use skein::SkeinError;
use skein::cipher::Threefish512;
use skein::cipher::threefish512::STANDARD_ROUNDS;

fn sample_key() -> [u8; 64] {
    core::array::from_fn(|i| (i + 16) as u8)
}

fn sample_tweak() -> [u8; 16] {
    core::array::from_fn(|i| i as u8)
}

fn sample_plaintext() -> [u8; 64] {
    core::array::from_fn(|i| 255 - i as u8)
}

// -------------------------------------------------------
// 1. KNOWN-ANSWER VECTORS
// -------------------------------------------------------

#[test]
fn threefish512_zero_vector() {
    let expected = [
        0x40, 0x8b, 0xe9, 0x42, 0x49, 0x44, 0x92, 0xea, 0xb1, 0x9d, 0xaa, 0x3e, 0x96, 0xad, 0x19,
        0xae, 0xdf, 0xc4, 0x1f, 0x4e, 0x55, 0xf8, 0xa2, 0x62, 0x6c, 0x1e, 0x46, 0xd5, 0x45, 0x47,
        0xa7, 0x13, 0xd4, 0x3b, 0x21, 0xf0, 0xde, 0x1a, 0x10, 0x88, 0x1e, 0xd5, 0xc4, 0xad, 0xef,
        0xda, 0xd1, 0xc4, 0x17, 0x2c, 0xd7, 0x68, 0xc8, 0xfc, 0x28, 0xd0, 0xdd, 0xe9, 0xdf, 0x01,
        0x80, 0x42, 0xfe, 0x3e,
    ];

    let cipher = Threefish512::new(&[0u64; 8], &[0u64; 2]);

    assert_eq!(cipher.encrypt_block(&[0u8; 64]), expected);
}

#[test]
fn threefish512_patterned_vector() {
    let expected = [
        0x86, 0x9a, 0xe1, 0x22, 0x10, 0xe5, 0x1d, 0x3b, 0x07, 0x36, 0x39, 0x9f, 0x2a, 0xcb, 0x40,
        0x0d, 0xe2, 0x30, 0x60, 0x0b, 0x13, 0xe6, 0x2f, 0x1d, 0xf7, 0x59, 0x6a, 0x14, 0x62, 0x32,
        0xd2, 0x81, 0xdf, 0xbf, 0x12, 0x7a, 0x65, 0x57, 0x1b, 0x9a, 0x79, 0x89, 0x06, 0xc7, 0x19,
        0x67, 0x83, 0x94, 0xc5, 0x0d, 0x99, 0x51, 0x38, 0xfd, 0x83, 0xf2, 0xbf, 0xa5, 0x4a, 0x3b,
        0xc3, 0x50, 0xd2, 0xf0,
    ];

    let cipher = Threefish512::from_bytes(&sample_key(), &sample_tweak());

    assert_eq!(cipher.encrypt_block(&sample_plaintext()), expected);
}

#[test]
fn threefish512_words_and_bytes_agree() {
    let cipher = Threefish512::from_bytes(&sample_key(), &sample_tweak());
    let block = sample_plaintext();

    let words: [u64; 8] =
        core::array::from_fn(|i| u64::from_le_bytes(block[i * 8..i * 8 + 8].try_into().unwrap()));
    let encrypted = cipher.encrypt_words(&words);

    let mut bytes = [0u8; 64];
    for (chunk, word) in bytes.chunks_exact_mut(8).zip(encrypted) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }

    assert_eq!(bytes, cipher.encrypt_block(&block));
}

// -------------------------------------------------------
// 2. INVERSE
// -------------------------------------------------------

#[test]
fn threefish512_decrypt_inverts_encrypt() {
    let cipher = Threefish512::from_bytes(&sample_key(), &sample_tweak());
    let block = sample_plaintext();

    assert_eq!(cipher.decrypt_block(&cipher.encrypt_block(&block)), block);
}

#[test]
fn threefish512_tweak_changes_ciphertext() {
    let key = sample_key();
    let a = Threefish512::from_bytes(&key, &[0u8; 16]);
    let b = Threefish512::from_bytes(&key, &[1u8; 16]);

    assert_ne!(a.encrypt_block(&[0u8; 64]), b.encrypt_block(&[0u8; 64]));
}

// -------------------------------------------------------
// 3. RAW BLOCK PROCESSING
// -------------------------------------------------------

#[test]
fn threefish512_process_blocks() {
    let cipher = Threefish512::from_bytes(&sample_key(), &sample_tweak());

    let input: Vec<u8> = (0..192).map(|i| i as u8).collect();
    let mut output = vec![0u8; 192];

    assert_eq!(cipher.process_blocks(&input, &mut output).unwrap(), 3);

    for (src, dst) in input.chunks_exact(64).zip(output.chunks_exact(64)) {
        assert_eq!(dst, cipher.encrypt_block(src.try_into().unwrap()));
    }

    let mut back = vec![0u8; 192];
    cipher.process_blocks_inverse(&output, &mut back).unwrap();
    assert_eq!(back, input);
}

#[test]
fn threefish512_process_blocks_empty() {
    let cipher = Threefish512::new(&[0u64; 8], &[0u64; 2]);

    assert_eq!(cipher.process_blocks(&[], &mut []).unwrap(), 0);
}

#[test]
fn threefish512_process_blocks_rejects_partial_block() {
    let cipher = Threefish512::new(&[0u64; 8], &[0u64; 2]);
    let mut output = [0u8; 65];

    assert_eq!(
        cipher.process_blocks(&[0u8; 65], &mut output),
        Err(SkeinError::UnalignedBlocks(65))
    );
    assert!(output.iter().all(|&b| b == 0));
}

#[test]
fn threefish512_process_blocks_rejects_mismatched_output() {
    let cipher = Threefish512::new(&[0u64; 8], &[0u64; 2]);
    let mut output = [0u8; 64];

    assert_eq!(
        cipher.process_blocks(&[0u8; 128], &mut output),
        Err(SkeinError::UnalignedBlocks(64))
    );
}

// -------------------------------------------------------
// 4. ROUND-COUNT HOOK
// -------------------------------------------------------

#[test]
fn threefish512_standard_round_count() {
    let cipher = Threefish512::new(&[0u64; 8], &[0u64; 2]);

    assert_eq!(cipher.rounds(), STANDARD_ROUNDS);
    assert_eq!(STANDARD_ROUNDS, 72);
}

#[test]
fn threefish512_explicit_72_rounds_is_standard() {
    let standard = Threefish512::new(&[7u64; 8], &[3u64; 2]);
    let explicit = Threefish512::with_rounds(&[7u64; 8], &[3u64; 2], 72).unwrap();

    assert_eq!(standard.encrypt_block(&[9u8; 64]), explicit.encrypt_block(&[9u8; 64]));
}

#[test]
fn threefish512_reduced_rounds_differ_and_invert() {
    let reduced = Threefish512::with_rounds(&[7u64; 8], &[3u64; 2], 40).unwrap();
    let standard = Threefish512::new(&[7u64; 8], &[3u64; 2]);
    let block = [9u8; 64];

    assert_ne!(reduced.encrypt_block(&block), standard.encrypt_block(&block));
    assert_eq!(reduced.decrypt_block(&reduced.encrypt_block(&block)), block);
}

#[test]
fn threefish512_invalid_round_counts() {
    for rounds in [0usize, 32, 36, 44, 76, 120] {
        assert_eq!(
            Threefish512::with_rounds(&[0u64; 8], &[0u64; 2], rounds).err(),
            Some(SkeinError::InvalidRounds(rounds)),
            "rounds {rounds}"
        );
    }

    for rounds in [40usize, 48, 80, 112] {
        assert!(Threefish512::with_rounds(&[0u64; 8], &[0u64; 2], rounds).is_ok());
    }
}
