use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use crate::core::library::{LibraryError, LibraryResult};

// hash_password derives an Argon2id PHC string with a fresh random salt
pub(crate) fn hash_password(password: &str) -> LibraryResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| LibraryError::runtime(format!("failed to hash password {}", err).as_str(), None))
}
