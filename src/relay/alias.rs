//! Ephemeral sender aliases
//!
//! When no fixed sender is configured, each relayed e-mail goes out from a
//! fresh `ta-xxxxxxxx@<domain>` address. The alias only has to avoid
//! pointing at a real person; collisions and guessability are acceptable.

use rand::Rng;

const ALIAS_PREFIX: &str = "ta-";
const ALIAS_LEN: usize = 8;
const ALIAS_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Fresh alias at `domain`
pub fn random_alias(domain: &str) -> String {
    random_alias_with(&mut rand::thread_rng(), domain)
}

/// Alias drawn from a caller-supplied RNG
pub fn random_alias_with<R: Rng + ?Sized>(rng: &mut R, domain: &str) -> String {
    let local: String = (0..ALIAS_LEN)
        .map(|_| ALIAS_CHARSET[rng.gen_range(0..ALIAS_CHARSET.len())] as char)
        .collect();
    format!("{}{}@{}", ALIAS_PREFIX, local, domain)
}
