//! Random numeric codes

use rand::Rng;

/// Zero-padded numeric code of `len` digits (e.g. `"048213"`)
pub fn numeric_code(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Uniform integer in `0..upper`
pub fn below(upper: u32) -> u32 {
    rand::rng().random_range(0..upper)
}
