use std::cell::RefCell;

use skein::cipher::Threefish512;
use skein::hash::skein512::{BlockType, Skein512, Skein512Params, Tweak};
use skein::observer::{BlockEvent, Observer, TracingObserver};

#[derive(Default)]
struct Recorder {
    rounds: RefCell<Vec<usize>>,
    blocks: RefCell<Vec<(Tweak, [u64; 8])>>,
    outputs: RefCell<Vec<(u64, usize)>>,
}

impl Observer for Recorder {
    fn on_round(&self, rounds_done: usize, _state: &[u64; 8]) {
        self.rounds.borrow_mut().push(rounds_done);
    }

    fn on_block(&self, event: &BlockEvent<'_>) {
        self.blocks.borrow_mut().push((event.tweak, *event.chaining_out));
    }

    fn on_output(&self, counter: u64, bytes: &[u8]) {
        self.outputs.borrow_mut().push((counter, bytes.len()));
    }
}

#[test]
fn observer_sees_every_injection_point() {
    let recorder = Recorder::default();
    let cipher = Threefish512::new(&[1u64; 8], &[2u64; 2]);

    cipher.encrypt_words_observed(&[3u64; 8], &recorder);

    let expected: Vec<usize> = (1..=18).map(|i| i * 4).collect();
    assert_eq!(*recorder.rounds.borrow(), expected);
}

#[test]
fn observer_final_round_state_precedes_last_subkey() {
    let recorder = RefCell::new([0u64; 8]);

    struct LastState<'a>(&'a RefCell<[u64; 8]>);
    impl Observer for LastState<'_> {
        fn on_round(&self, _rounds_done: usize, state: &[u64; 8]) {
            *self.0.borrow_mut() = *state;
        }
    }

    let cipher = Threefish512::new(&[0u64; 8], &[0u64; 2]);
    let out = cipher.encrypt_words_observed(&[0u64; 8], &LastState(&recorder));

    assert_ne!(*recorder.borrow(), out);
}

#[test]
fn observer_traces_block_sequence_of_empty_hash() {
    let recorder = Recorder::default();

    let mut ctx = Skein512::with_observer(&Skein512Params::default(), &recorder).unwrap();
    let digest = ctx.finalize().unwrap();

    let blocks = recorder.blocks.borrow();
    let types: Vec<BlockType> = blocks.iter().map(|(t, _)| t.block_type()).collect();
    assert_eq!(types, [BlockType::Config, BlockType::Message, BlockType::Output]);

    let (cfg, _) = blocks[0];
    assert!(cfg.is_first() && cfg.is_final());
    assert_eq!(cfg.position(), 32);

    let (msg, _) = blocks[1];
    assert!(msg.is_first() && msg.is_final());
    assert_eq!(msg.position(), 0);

    let (out, chain) = blocks[2];
    assert!(out.is_first() && out.is_final());
    assert_eq!(out.position(), 8);

    let mut expected = [0u8; 64];
    for (chunk, word) in expected.chunks_exact_mut(8).zip(chain) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    assert_eq!(digest, expected);

    assert_eq!(recorder.rounds.borrow().len(), 3 * 18);
    assert_eq!(*recorder.outputs.borrow(), [(0u64, 64usize)]);
}

#[test]
fn observer_sees_first_flag_only_once_per_pass() {
    let recorder = Recorder::default();

    let mut ctx = Skein512::with_observer(&Skein512Params::default(), &recorder).unwrap();
    ctx.update(&[0x42u8; 200]).unwrap();
    ctx.finalize().unwrap();

    let blocks = recorder.blocks.borrow();
    let message: Vec<Tweak> = blocks
        .iter()
        .map(|(t, _)| *t)
        .filter(|t| t.block_type() == BlockType::Message)
        .collect();

    assert_eq!(message.len(), 4);
    assert_eq!(message.iter().filter(|t| t.is_first()).count(), 1);
    assert!(message[0].is_first());
    assert!(message[3].is_final());
    assert_eq!(
        message.iter().map(|t| t.position()).collect::<Vec<_>>(),
        [64, 128, 192, 200]
    );
}

#[test]
fn observer_reports_multi_block_output() {
    let recorder = Recorder::default();

    let params = Skein512Params::with_output_bits(1100);
    let mut ctx = Skein512::with_observer(&params, &recorder).unwrap();
    ctx.finalize().unwrap();

    assert_eq!(
        *recorder.outputs.borrow(),
        [(0u64, 64usize), (1, 64), (2, 10)]
    );
}

#[test]
fn tracing_observer_matches_silent_context() {
    let mut traced = Skein512::with_observer(&Skein512Params::default(), TracingObserver).unwrap();
    let mut silent = Skein512::new(512).unwrap();

    traced.update(b"abc").unwrap();
    silent.update(b"abc").unwrap();

    assert_eq!(traced.finalize().unwrap(), silent.finalize().unwrap());
}

#[cfg(not(feature = "parallel"))]
#[test]
fn observer_follows_tree_levels() {
    use skein::hash::skein512::{TreeHasher, TreeInfo};

    // leaf = 128 bytes, fanout 2; 300 bytes -> 3 leaves, 2 level-2 nodes,
    // 1 level-3 node.
    let params = Skein512Params {
        tree: TreeInfo::new(1, 1, 255).unwrap(),
        ..Skein512Params::default()
    };
    let recorder = Recorder::default();
    let hasher = TreeHasher::with_observer(&params, &recorder).unwrap();

    let data: Vec<u8> = (0..300usize).map(|i| i as u8).collect();
    let digest = hasher.hash(&data).unwrap();

    assert_eq!(digest, TreeHasher::new(&params).unwrap().hash(&data).unwrap());

    let blocks = recorder.blocks.borrow();
    let levels: Vec<u8> = blocks
        .iter()
        .filter(|(tweak, _)| tweak.block_type() == BlockType::Message)
        .map(|(tweak, _)| tweak.tree_level())
        .collect();

    assert_eq!(blocks[0].0.block_type(), BlockType::Config);
    assert_eq!(levels, [1, 1, 1, 1, 1, 2, 2, 2, 3, 3]);
    assert_eq!(*recorder.outputs.borrow(), [(0u64, 64usize)]);
}
