use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

/// Cookie carrying the chat session id
pub const SESSION_COOKIE: &str = "session_id";

/// The session id sent by the client, if any.
pub fn session_id(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value().trim().to_string())
        .filter(|id| !id.is_empty())
}

/// The client's session id, or a new one that is added to the jar so
/// the response sets the cookie.
pub fn session_id_or_new(jar: CookieJar) -> (CookieJar, String) {
    if let Some(id) = session_id(&jar) {
        return (jar, id);
    }

    let id = Uuid::new_v4().to_string();
    tracing::debug!("Issuing new session id {}", id);
    let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    (jar.add(cookie), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reuses_existing_session() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "abc"));
        let (jar, id) = session_id_or_new(jar);
        assert_eq!(id, "abc");
        assert_eq!(jar.iter().count(), 1);
    }

    #[test]
    fn test_issues_new_session() {
        let (jar, id) = session_id_or_new(CookieJar::new());
        assert!(Uuid::parse_str(&id).is_ok());
        let cookie = jar.get(SESSION_COOKIE).unwrap();
        assert_eq!(cookie.value(), id);
        assert_eq!(cookie.http_only(), Some(true));
    }

    #[test]
    fn test_blank_cookie_is_ignored() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, " "));
        assert_eq!(session_id(&jar), None);
    }
}
