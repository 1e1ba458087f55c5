use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use std::sync::OnceLock;

const DUMMY_PASSWORD: &str = "sensor-hub-no-such-account";

/// Salted Argon2id hash in PHC string form.
pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
}

/// `false` on mismatch and on a hash that does not parse.
pub fn verify(password: &str, hashword: &str) -> bool {
    PasswordHash::new(hashword)
        .map(|hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), &hash)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Runs one verification against a fixed hash, for logins with no stored
/// account, so unknown usernames take as long as wrong passwords.
pub fn verify_dummy(password: &str) {
    if let Some(hashword) = dummy_hash() {
        verify(password, hashword);
    }
}

fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY.get_or_init(|| hash(DUMMY_PASSWORD).ok()).as_deref()
}
