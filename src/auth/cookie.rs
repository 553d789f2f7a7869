use axum::http::{header, HeaderMap};

/// Find the value of cookie `name` across every `Cookie` header
pub fn read<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

pub fn build(name: &str, value: &str, max_age: Option<u64>, secure: bool) -> String {
    let mut cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", name, value);
    if let Some(max_age) = max_age {
        cookie.push_str(&format!("; Max-Age={}", max_age));
    }
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1; bo_session=tok"));
        headers.append(header::COOKIE, HeaderValue::from_static("b=2"));

        assert_eq!(read(&headers, "bo_session"), Some("tok"));
        assert_eq!(read(&headers, "b"), Some("2"));
        assert_eq!(read(&headers, "missing"), None);
    }

    #[test]
    fn empty_value_counts_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("bo_session="));
        assert_eq!(read(&headers, "bo_session"), None);
    }

    #[test]
    fn builds_secure_cookie() {
        let cookie = build("bo_session", "", Some(0), true);
        assert_eq!(cookie, "bo_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0; Secure");
    }
}
