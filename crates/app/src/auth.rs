//! Login gate for the app shell. A single hardcoded credential guards the
//! screen, nothing more — this is not a security boundary and holds no
//! per-user state.

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

const DEFAULT_USERNAME: &str = "admin";
// SHA-256 of the default password.
const DEFAULT_PASSWORD_DIGEST: &str =
    "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9";

const TOKEN_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
}

#[derive(Debug, Clone)]
pub struct SessionUser {
    pub username: String,
    pub role: Role,
    pub token: String,
    pub logged_in_at: DateTime<Utc>,
}

/// Check the credential pair; username matching is case-insensitive.
pub fn login(username: &str, password: &str) -> Option<SessionUser> {
    let digest = hex::encode(Sha256::digest(password.as_bytes()));
    if username.eq_ignore_ascii_case(DEFAULT_USERNAME) && digest == DEFAULT_PASSWORD_DIGEST {
        Some(SessionUser {
            username: DEFAULT_USERNAME.to_string(),
            role: Role::Admin,
            token: session_token(),
            logged_in_at: Utc::now(),
        })
    } else {
        None
    }
}

fn session_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}
