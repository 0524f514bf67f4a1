//! Parser for shell-style `KEY=value` release files such as `/etc/os-release`.
//!
//! Format: https://www.freedesktop.org/software/systemd/man/os-release.html

use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Parsed key/value assignments. Later assignments of the same key replace earlier ones.
pub type ReleaseMap = BTreeMap<String, String>;

/// Parse a release file. An unreadable or missing file yields an empty map.
pub fn parse_release_file(path: impl AsRef<Path>) -> ReleaseMap {
    let path = path.as_ref();
    let bytes = match std::fs::read(path) {
        Ok(b)  => b,
        Err(e) => {
            debug!("release file {} not readable: {}", path.display(), e);
            return ReleaseMap::new();
        }
    };
    let text = String::from_utf8_lossy(&bytes);
    parse_release_str(text.strip_prefix('\u{feff}').unwrap_or(&text))
}

/// Parse release-file text line by line. Malformed lines are logged and skipped.
pub fn parse_release_str(text: &str) -> ReleaseMap {
    let mut out = ReleaseMap::new();

    for line in text.lines() {
        if line.starts_with('#') { continue; }
        // Blank lines carry no assignment; not worth a warning.
        if line.trim().is_empty() {
            debug!("skipping blank line");
            continue;
        }

        match parse_line(line) {
            Ok((key, value)) => { out.insert(key.to_string(), value); }
            Err(reason)      => warn!("{} in input line: '{}'", reason, line),
        }
    }
    out
}

fn parse_line(line: &str) -> Result<(&str, String), &'static str> {
    let (key, raw) = line.split_once('=').unwrap_or((line, ""));
    let mut value = raw.trim();

    if !is_shell_identifier(key) {
        return Err("Invalid key");
    }

    // An empty value is never treated as quoted.
    if let Some(quote) = value.chars().next().filter(|c| *c == '"' || *c == '\'') {
        // A lone quote has no closing partner.
        if value.len() < 2 || !value.ends_with(quote) {
            return Err("Quoting error");
        }
        value = &value[1..value.len() - 1];
    }

    Ok((key, unescape(value)))
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`, matched against the whole key.
fn is_shell_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Replace every `\X` with `X`, left to right. A trailing lone backslash is kept.
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None       => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_mixed_file() {
        let map = parse_release_str("#comment\nVERSION=\"1.2.3\"\nBAD-KEY=x\nEMPTY=\n");
        assert_eq!(map.len(), 2);
        assert_eq!(map["VERSION"], "1.2.3");
        assert_eq!(map["EMPTY"], "");
        assert!(!map.contains_key("BAD-KEY"));
    }

    #[test]
    fn unquoted_value_is_trimmed() {
        let map = parse_release_str("NAME=  Sailfish OS  \t\n");
        assert_eq!(map["NAME"], "Sailfish OS");
    }

    #[test]
    fn value_may_contain_equals() {
        let map = parse_release_str("OPTS=a=b=c\n");
        assert_eq!(map["OPTS"], "a=b=c");
    }

    #[test]
    fn quoted_values_are_unwrapped() {
        let map = parse_release_str("A=\"a b\"\nB='c d'\n");
        assert_eq!(map["A"], "a b");
        assert_eq!(map["B"], "c d");
    }

    #[test]
    fn mismatched_quotes_are_discarded() {
        let map = parse_release_str("A=\"a b'\nB='x\nC=ok\n");
        assert!(!map.contains_key("A"));
        assert!(!map.contains_key("B"));
        assert_eq!(map["C"], "ok");
    }

    #[test]
    fn lone_quote_is_a_quoting_error() {
        let map = parse_release_str("A=\"\nB='\n");
        assert!(map.is_empty());
    }

    #[test]
    fn empty_quotes_give_empty_value() {
        let map = parse_release_str("A=\"\"\n");
        assert_eq!(map["A"], "");
    }

    #[test]
    fn backslash_escapes_are_removed() {
        let map = parse_release_str("A=a\\\"b\nB=\"x\\\\y\"\nC=\\$HOME\nD=end\\\n");
        assert_eq!(map["A"], "a\"b");
        assert_eq!(map["B"], "x\\y");
        assert_eq!(map["C"], "$HOME");
        assert_eq!(map["D"], "end\\");
    }

    #[test]
    fn escapes_do_not_overlap() {
        // `\\\\n` is two escaped backslashes followed by `n`.
        let map = parse_release_str("A=\\\\\\\\n\n");
        assert_eq!(map["A"], "\\\\n");
    }

    #[test]
    fn invalid_keys_are_discarded() {
        let map = parse_release_str("1KEY=x\nMY-KEY=y\n KEY=z\nKEY =w\n_ok9=v\n");
        assert_eq!(map.len(), 1);
        assert_eq!(map["_ok9"], "v");
    }

    #[test]
    fn line_without_equals_keeps_identifier_key() {
        let map = parse_release_str("FLAG\nnot a key\n");
        assert_eq!(map.len(), 1);
        assert_eq!(map["FLAG"], "");
    }

    #[test]
    fn last_assignment_wins() {
        let map = parse_release_str("VERSION=1\nOTHER=x\nVERSION=2\n");
        assert_eq!(map["VERSION"], "2");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn comments_never_contribute() {
        let map = parse_release_str("#VERSION=1\n# NAME=foo\n");
        assert!(map.is_empty());
    }

    #[test]
    fn indented_hash_is_not_a_comment() {
        // Only a leading `#` marks a comment; this becomes an invalid key.
        let map = parse_release_str(" #X=1\n");
        assert!(map.is_empty());
    }

    #[test]
    fn crlf_line_endings() {
        let map = parse_release_str("ID=sailfishos\r\nVERSION_ID=4.5\r\n");
        assert_eq!(map["ID"], "sailfishos");
        assert_eq!(map["VERSION_ID"], "4.5");
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let map = parse_release_file(dir.path().join("nope"));
        assert!(map.is_empty());
    }

    #[test]
    fn leading_bom_is_stripped() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"\xEF\xBB\xBFVERSION=\"4.5\"\nNAME=x\n").unwrap();
        let map = parse_release_file(f.path());
        assert_eq!(map.len(), 2);
        assert_eq!(map["VERSION"], "4.5");
        assert_eq!(map["NAME"], "x");
    }

    #[test]
    fn reads_file_from_disk() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "NAME=\"Sailfish OS\"").unwrap();
        writeln!(f, "VERSION=\"4.5.0.19 (Struven ketju)\"").unwrap();
        let map = parse_release_file(f.path());
        assert_eq!(map["NAME"], "Sailfish OS");
        assert_eq!(map["VERSION"], "4.5.0.19 (Struven ketju)");
    }
}
