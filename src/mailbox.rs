//! RFC 5322 mailboxes.
//!
//! Accepts a single mailbox in one of these forms:
//!
//! - `user@example.com`
//! - `<user@example.com>`
//! - `Jane Doe <user@example.com>`
//! - `"Doe, Jane" <user@example.com>`
//!
//! Comments, groups and address lists are not supported. Non-ASCII text is
//! accepted in the display name and the address (RFC 6532).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Why a mailbox failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ParseMailboxError {
    reason: String,
}

impl ParseMailboxError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A display name paired with an address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mailbox {
    name: Option<String>,
    address: String,
}

impl Mailbox {
    /// Builds a mailbox from parts. An empty name counts as no name.
    ///
    /// # Errors
    ///
    /// Returns an error if `address` is not a valid `addr-spec`, or if `name`
    /// contains a control character.
    pub fn new(name: Option<&str>, address: &str) -> Result<Self, ParseMailboxError> {
        if name.is_some_and(|n| n.chars().any(char::is_control)) {
            return Err(ParseMailboxError::new("control character in display name"));
        }
        validate_addr_spec(address)?;
        Ok(Self {
            name: name.filter(|n| !n.is_empty()).map(str::to_string),
            address: address.to_string(),
        })
    }

    /// The display name, if one was given.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The `local@domain` address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl FromStr for Mailbox {
    type Err = ParseMailboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseMailboxError::new("empty address"));
        }

        let Some(open) = angle_open(s) else {
            validate_addr_spec(s)?;
            return Ok(Self {
                name: None,
                address: s.to_string(),
            });
        };

        let rest = &s[open + 1..];
        let close = rest
            .find('>')
            .ok_or_else(|| ParseMailboxError::new("missing closing '>'"))?;
        if !rest[close + 1..].trim().is_empty() {
            return Err(ParseMailboxError::new("unexpected text after '>'"));
        }

        let address = rest[..close].trim();
        validate_addr_spec(address)?;
        let name = parse_display_name(s[..open].trim())?;

        Ok(Self {
            name,
            address: address.to_string(),
        })
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            let bare = !name.is_empty()
                && name.trim() == name
                && !name.contains("  ")
                && name.chars().all(|c| is_atext(c) || c == ' ');
            if bare {
                write!(f, "{name} ")?;
            } else {
                f.write_str("\"")?;
                for c in name.chars() {
                    if c == '"' || c == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str("\" ")?;
            }
        }
        write!(f, "<{}>", self.address)
    }
}

/// Position of the `<` that opens the angle address, ignoring quoted text.
fn angle_open(s: &str) -> Option<usize> {
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '<' if !in_quotes => return Some(i),
            _ => {}
        }
    }
    None
}

fn parse_display_name(display: &str) -> Result<Option<String>, ParseMailboxError> {
    if display.is_empty() {
        return Ok(None);
    }

    if let Some(quoted) = display.strip_prefix('"') {
        let mut name = String::with_capacity(quoted.len());
        let mut chars = quoted.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => name.push(escaped),
                    None => return Err(ParseMailboxError::new("unterminated quoted name")),
                },
                '"' => {
                    if !chars.as_str().trim().is_empty() {
                        return Err(ParseMailboxError::new(
                            "unexpected text after quoted name",
                        ));
                    }
                    return Ok((!name.is_empty()).then_some(name));
                }
                c if c.is_control() => {
                    return Err(ParseMailboxError::new("control character in display name"));
                }
                c => name.push(c),
            }
        }
        return Err(ParseMailboxError::new("unterminated quoted name"));
    }

    if let Some(bad) = display
        .chars()
        .find(|&c| !(is_atext(c) || c == ' ' || c == '.'))
    {
        return Err(ParseMailboxError::new(format!(
            "invalid character '{bad}' in display name"
        )));
    }
    Ok(Some(display.to_string()))
}

fn validate_addr_spec(address: &str) -> Result<(), ParseMailboxError> {
    let at = address
        .rfind('@')
        .ok_or_else(|| ParseMailboxError::new("missing '@' in address"))?;
    let (local, domain) = (&address[..at], &address[at + 1..]);

    if local.is_empty() {
        return Err(ParseMailboxError::new("empty local part"));
    }
    if domain.is_empty() {
        return Err(ParseMailboxError::new("empty domain"));
    }

    if local.len() >= 2 && local.starts_with('"') && local.ends_with('"') {
        if local.chars().any(char::is_control) {
            return Err(ParseMailboxError::new("control character in local part"));
        }
        if local.contains(['<', '>']) {
            return Err(ParseMailboxError::new("angle bracket in local part"));
        }
    } else if !is_dot_atom(local) {
        return Err(ParseMailboxError::new(format!("invalid local part '{local}'")));
    }

    if let Some(literal) = domain
        .strip_prefix('[')
        .and_then(|d| d.strip_suffix(']'))
    {
        if literal.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '[' | ']' | '\\' | '<' | '>')
        }) {
            return Err(ParseMailboxError::new(format!(
                "invalid domain literal '{domain}'"
            )));
        }
    } else if !is_dot_atom(domain) {
        return Err(ParseMailboxError::new(format!("invalid domain '{domain}'")));
    }

    Ok(())
}

fn is_dot_atom(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(|atom| !atom.is_empty() && atom.chars().all(is_atext))
}

fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~".contains(c) || (!c.is_ascii() && !c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_address() {
        let m: Mailbox = "example@example.com".parse().unwrap();
        assert_eq!(m.name(), None);
        assert_eq!(m.address(), "example@example.com");
        assert_eq!(m.to_string(), "<example@example.com>");
    }

    #[test]
    fn angle_address_without_name() {
        let m: Mailbox = "<example@example.com>".parse().unwrap();
        assert_eq!(m.name(), None);
        assert_eq!(m.address(), "example@example.com");
    }

    #[test]
    fn name_and_address() {
        let m: Mailbox = "Jane Doe <jane@example.com>".parse().unwrap();
        assert_eq!(m.name(), Some("Jane Doe"));
        assert_eq!(m.to_string(), "Jane Doe <jane@example.com>");
    }

    #[test]
    fn quoted_name_with_specials() {
        let m: Mailbox = r#""Doe, \"JD\" Jane" <jane@example.com>"#.parse().unwrap();
        assert_eq!(m.name(), Some(r#"Doe, "JD" Jane"#));
        assert_eq!(m.to_string(), r#""Doe, \"JD\" Jane" <jane@example.com>"#);
    }

    #[test]
    fn quoted_name_may_contain_angle_bracket() {
        let m: Mailbox = r#""a<b" <ab@example.com>"#.parse().unwrap();
        assert_eq!(m.name(), Some("a<b"));
        assert_eq!(m.address(), "ab@example.com");
    }

    #[test]
    fn display_round_trips() {
        for text in [
            "<a@example.com>",
            "Jane <jane@example.com>",
            "\"J. R. Doe\" <jrd@example.com>",
            "<\"odd local\"@example.com>",
            "<user@[192.168.0.1]>",
        ] {
            let m: Mailbox = text.parse().unwrap();
            assert_eq!(m.to_string(), text);
        }
    }

    #[test]
    fn rejects_missing_at() {
        let err = "no at symbol".parse::<Mailbox>().unwrap_err();
        assert_eq!(err.to_string(), "missing '@' in address");
    }

    #[test]
    fn rejects_malformed() {
        for text in [
            "",
            "@example.com",
            "user@",
            "user@@example.com",
            "us er@example.com",
            "user@exa mple.com",
            "a..b@example.com",
            ".a@example.com",
            "Jane <jane@example.com",
            "Jane <jane@example.com> trailing",
            "Jane, Doe <jane@example.com>",
            "\"unterminated <jane@example.com>",
            "user@[a>b]",
            "<user@[a<b]>",
        ] {
            assert!(text.parse::<Mailbox>().is_err(), "{text:?} should fail");
        }
    }

    #[test]
    fn new_validates_address() {
        assert!(Mailbox::new(Some("Jane"), "jane@example.com").is_ok());
        assert!(Mailbox::new(None, "jane").is_err());
        let m = Mailbox::new(Some(""), "jane@example.com").unwrap();
        assert_eq!(m.name(), None);
    }

    #[test]
    fn new_rejects_control_characters_in_name() {
        for name in ["Jane\r\nBcc: x", "tab\there", "\u{7f}", "\u{85}"] {
            assert!(
                Mailbox::new(Some(name), "jane@example.com").is_err(),
                "{name:?} should fail"
            );
        }
    }

    #[test]
    fn built_mailboxes_round_trip() {
        for name in [
            "Jane",
            " padded ",
            "two  spaces",
            r#"say "hi""#,
            r"back\slash",
            "a<b>c",
            "Doe, Jane",
        ] {
            let m = Mailbox::new(Some(name), "jane@example.com").unwrap();
            let back: Mailbox = m.to_string().parse().unwrap();
            assert_eq!(back, m, "{m}");
        }
        let literal = Mailbox::new(None, "user@[IPv6:2001:db8::1]").unwrap();
        assert_eq!(literal.to_string().parse::<Mailbox>().unwrap(), literal);
        assert!(Mailbox::new(None, "user@[a>b]").is_err());
    }

    #[test]
    fn unicode_is_accepted() {
        let m: Mailbox = "José <josé@exämple.com>".parse().unwrap();
        assert_eq!(m.name(), Some("José"));
        assert_eq!(m.address(), "josé@exämple.com");
    }
}
