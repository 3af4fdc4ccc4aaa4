#![cfg(not(target_arch = "wasm32"))]

use gridnoise_wasm::swap::{PingPong, Slot, TargetPair};
use proptest::prelude::*;

#[test]
fn first_frame_reads_a_and_writes_b() {
    let mut pair = TargetPair::new('a', 'b');
    let seen = pair
        .frame(|prev, next| Ok::<_, ()>((*prev, *next)))
        .unwrap();
    assert_eq!(seen, ('a', 'b'));
    assert_eq!(*pair.current(), 'b');
    assert_eq!(pair.state(), PingPong::ReadyB);
}

#[test]
fn written_target_becomes_previous_input() {
    let mut pair = TargetPair::new(0u32, 1u32);
    let mut written = None;
    for _ in 0..5 {
        pair.frame(|prev, next| {
            if let Some(w) = written {
                assert_eq!(*prev, w);
            }
            written = Some(*next);
            Ok::<_, ()>(())
        })
        .unwrap();
    }
}

#[test]
fn slot_indices_cover_the_pair() {
    assert_eq!(Slot::A.index(), 0);
    assert_eq!(Slot::B.index(), 1);
    assert_eq!(Slot::A.other(), Slot::B);
    assert_eq!(PingPong::ReadyB.swapped(), PingPong::ReadyA);
}

proptest! {
    #[test]
    fn parity_after_n_frames(n in 1u64..500) {
        let mut pair = TargetPair::new(Slot::A, Slot::B);
        for _ in 0..n {
            prop_assert_ne!(pair.current(), pair.next());
            pair.swap();
        }
        let expected = if n % 2 == 0 { Slot::A } else { Slot::B };
        prop_assert_eq!(*pair.current(), expected);
        prop_assert_eq!(pair.state().current(), expected);
        prop_assert_eq!(pair.frames(), n);
    }
}
