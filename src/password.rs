use log::debug;
use rand::Rng;

use crate::charset::{Charset, GenerationOptions, build_charset};

/// Generates a password from the selected character classes.
///
/// Every position first picks a group uniformly, then a character within
/// that group uniformly. Small groups (digits) therefore show up more often
/// than a draw over the whole alphabet would give them.
pub fn generate_password(options: &GenerationOptions) -> String {
    let charset = build_charset(options);
    // Use rand::rng() in rand 0.9.x
    let mut rng = rand::rng();
    generate_password_with(&charset, options.length(), &mut rng)
}

/// Same as [`generate_password`] with an explicit charset, length and RNG.
///
/// `length` is expected to be clamped already.
pub fn generate_password_with<R: Rng>(
    charset: &Charset,
    length: usize,
    rng: &mut R,
) -> String {
    let groups = charset.groups();
    debug!("generating {length} chars from {} groups", groups.len());

    (0..length)
        .map(|_| {
            let group = &groups[rng.random_range(0..groups.len())];
            group.chars()[rng.random_range(0..group.len())]
        })
        .collect()
}
