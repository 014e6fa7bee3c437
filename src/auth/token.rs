// src/auth/token.rs
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

pub const SESSION_TOKEN_BYTES: usize = 32;
pub const ID_BYTES: usize = 12;

/// Fresh session token from the OS RNG (~43 chars).
pub fn generate_session_token() -> String {
    generate_token(&mut OsRng, SESSION_TOKEN_BYTES)
}

/// Opaque record id (16 URL-safe chars).
pub fn generate_id() -> String {
    generate_token(&mut OsRng, ID_BYTES)
}

/// URL-safe base64 (no padding) of `nbytes` random bytes.
pub fn generate_token<R: RngCore>(rng: &mut R, nbytes: usize) -> String {
    let mut buf = vec![0u8; nbytes];
    rng.fill_bytes(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf)
}

/// SHA-256 of the token; this is what gets stored.
pub fn hash_token(token: &str) -> [u8; 32] {
    let out = Sha256::digest(token.as_bytes());
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&out);
    arr
}
