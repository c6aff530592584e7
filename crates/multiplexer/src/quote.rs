/// Quotes `s` as a single POSIX shell word.
///
/// The result is wrapped in single quotes; embedded single quotes become
/// `'\''`.
pub fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain() {
        assert_eq!(quote("thoth_bot"), "'thoth_bot'");
    }

    #[test]
    fn test_quote_empty() {
        assert_eq!(quote(""), "''");
    }

    #[test]
    fn test_quote_metacharacters_stay_literal() {
        assert_eq!(quote("a; rm -rf $HOME"), "'a; rm -rf $HOME'");
    }

    #[test]
    fn test_quote_single_quote() {
        assert_eq!(quote("it's"), r"'it'\''s'");
    }
}
