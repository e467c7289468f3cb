//! Masking for values that end up in log lines.

const EMAIL_PREFIX_CHARS: usize = 3;
const SECRET_PREFIX_CHARS: usize = 6;

/// First `n` characters of `value`, never splitting a code point.
fn head(value: &str, n: usize) -> &str {
    value
        .char_indices()
        .nth(n)
        .map_or(value, |(end, _)| &value[..end])
}

/// `alice@example.com` becomes `ali***@example.com`.
pub fn mask_email(email: &str) -> String {
    let (local, domain) = email.split_once('@').unwrap_or((email, ""));
    if domain.is_empty() {
        format!("{}***", head(local, EMAIL_PREFIX_CHARS))
    } else {
        format!("{}***@{}", head(local, EMAIL_PREFIX_CHARS), domain)
    }
}

/// Keep only enough of a key or token to tell two apart in the logs.
pub fn mask_secret(secret: &str) -> String {
    format!("{}...", head(secret, SECRET_PREFIX_CHARS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "ali***@example.com");
        assert_eq!(mask_email("ab@test.org"), "ab***@test.org");
        assert_eq!(mask_email("notanemail"), "not***");
    }

    #[test]
    fn test_mask_email_multibyte() {
        assert_eq!(mask_email("ééééé@test.org"), "ééé***@test.org");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("vn_abcdefghijkl"), "vn_abc...");
        assert_eq!(mask_secret("vn"), "vn...");
    }
}
