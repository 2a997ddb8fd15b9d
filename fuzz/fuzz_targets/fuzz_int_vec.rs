#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use txi::IntVec;

#[derive(Arbitrary, Debug)]
struct Input {
    width: u8,
    values: Vec<u64>,
}

fuzz_target!(|input: Input| {
    // Fuzz packing round trips across arbitrary widths and value patterns.
    let width = (input.width % 64 + 1) as u32;
    if input.values.len() > 1 << 12 {
        return;
    }
    let mask = if width == 64 { u64::MAX } else { (1u64 << width) - 1 };

    let mut v = IntVec::with_width(input.values.len(), 64);
    for (i, value) in input.values.iter().enumerate() {
        v.set(i, value & mask);
    }
    let before = v.to_vec();

    v.compress_to(width);
    assert_eq!(v.width(), width);
    assert_eq!(v.to_vec(), before);
});
