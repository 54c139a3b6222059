use axum_extra::extract::cookie::SignedCookieJar;
use cookie::{Cookie, Key, SameSite};

pub const COOKIE_NAME: &str = "csrf";

const TOKEN_TTL: time::Duration = time::Duration::hours(12);

/// Builds the cookie signing key. Secrets shorter than 32 bytes cannot be
/// expanded, so those fall back to a key that lives as long as the process.
pub fn signing_key(secret: &str) -> Key {
    if secret.len() >= 32 {
        Key::derive_from(secret.as_bytes())
    } else {
        if secret.is_empty() {
            tracing::warn!("no SECRET_KEY provided; form tokens will not survive a restart");
        } else {
            tracing::warn!("SECRET_KEY shorter than 32 bytes; using a per-process key instead");
        }
        Key::generate()
    }
}

/// Returns the jar's current token, minting and storing a new one if the
/// browser does not have a valid one yet.
pub fn issue(jar: SignedCookieJar) -> (SignedCookieJar, String) {
    if let Some(cookie) = jar.get(COOKIE_NAME) {
        let token = cookie.value().to_string();
        return (jar, token);
    }

    let token = uuid::Uuid::new_v4().simple().to_string();
    let cookie = Cookie::build((COOKIE_NAME, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(TOKEN_TTL)
        .build();
    (jar.add(cookie), token)
}

/// True when the submitted form token matches the signed cookie.
pub fn verify(jar: &SignedCookieJar, submitted: &str) -> bool {
    let submitted = submitted.trim();
    !submitted.is_empty() && jar.get(COOKIE_NAME).is_some_and(|c| c.value() == submitted)
}
