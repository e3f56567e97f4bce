//! One-shot messages carried across a redirect in a private cookie.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};

pub(crate) const COOKIE_FLASH: &str = "flash";

/// Add a flash message to the cookie jar, to be shown on the next page load.
///
/// The cookie is encrypted and signed with the server's cookie key.
pub(crate) fn set_flash(jar: PrivateCookieJar, message: &str) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_FLASH, message.to_owned()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Remove the flash message from the cookie jar and return it.
///
/// Returns the jar unchanged and `None` if there is no valid flash cookie.
pub(crate) fn take_flash(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<String>) {
    match jar.get(COOKIE_FLASH) {
        Some(cookie) => {
            let message = cookie.value().to_owned();
            let jar = jar.remove(Cookie::build(COOKIE_FLASH).path("/"));

            (jar, Some(message))
        }
        None => (jar, None),
    }
}

#[cfg(test)]
mod tests {
    use axum_extra::extract::PrivateCookieJar;

    use crate::app_state::create_cookie_key;

    use super::{COOKIE_FLASH, set_flash, take_flash};

    #[test]
    fn take_returns_message_that_was_set() {
        let jar = PrivateCookieJar::new(create_cookie_key("foobar"));
        let jar = set_flash(jar, "Income added.");

        let (jar, message) = take_flash(jar);

        assert_eq!(message.as_deref(), Some("Income added."));
        assert!(
            jar.get(COOKIE_FLASH).is_none(),
            "the flash message should only be shown once"
        );
    }

    #[test]
    fn take_returns_none_without_message() {
        let jar = PrivateCookieJar::new(create_cookie_key("foobar"));

        let (_, message) = take_flash(jar);

        assert_eq!(message, None);
    }
}
