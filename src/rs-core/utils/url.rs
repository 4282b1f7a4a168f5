use std::fmt::Display;

/// Source url of a media, as assigned to the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaUrl {
    inner: String,
}

impl MediaUrl {
    /// Returns a `MediaUrl` from the given string, `None` if it cannot designate a media
    /// resource (empty, only whitespace or containing control characters).
    pub fn parse(url: &str) -> Option<Self> {
        let trimmed = url.trim();
        if trimmed.is_empty() || trimmed.chars().any(|c| c.is_control()) {
            None
        } else {
            Some(Self {
                inner: trimmed.to_owned(),
            })
        }
    }

    pub fn get_ref(&self) -> &str {
        self.inner.as_str()
    }

    pub fn is_absolute(&self) -> bool {
        scheme(&self.inner).is_some()
    }

    /// Returns the last path component of the url, without query string nor fragment.
    pub fn filename(&self) -> &str {
        let parsed = strip_suffixes(&self.inner);
        match parsed.rfind('/') {
            Some(idx) => &parsed[idx + 1..],
            None => parsed,
        }
    }
}

impl Display for MediaUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

fn strip_suffixes(url: &str) -> &str {
    let url = match url.find('#') {
        Some(idx) => &url[..idx],
        None => url,
    };
    match url.find('?') {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// Returns the scheme of `url` (e.g. `https`, `blob`) if it has one.
fn scheme(url: &str) -> Option<&str> {
    let idx = url.find(':')?;
    let candidate = &url[..idx];
    let mut chars = candidate.chars();
    let first_ok = chars.next().map(|c| c.is_ascii_alphabetic()).unwrap_or(false);
    if first_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.') {
        Some(candidate)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert!(MediaUrl::parse("").is_none());
        assert!(MediaUrl::parse("   \t").is_none());
        assert!(MediaUrl::parse("https://cdn/a\nb.mp4").is_none());
        let url = MediaUrl::parse("  https://cdn.example.com/lessons/intro.mp4  ").unwrap();
        assert_eq!(url.get_ref(), "https://cdn.example.com/lessons/intro.mp4");
    }

    #[test]
    fn test_absolute_and_filename() {
        let url = MediaUrl::parse("https://cdn.example.com/v/intro.mp4?token=a#t=3").unwrap();
        assert!(url.is_absolute());
        assert_eq!(url.filename(), "intro.mp4");

        let url = MediaUrl::parse("blob:https://lms.example.com/3f2a").unwrap();
        assert!(url.is_absolute());

        let url = MediaUrl::parse("/media/lesson-4.webm").unwrap();
        assert!(!url.is_absolute());
        assert_eq!(url.filename(), "lesson-4.webm");
    }
}
