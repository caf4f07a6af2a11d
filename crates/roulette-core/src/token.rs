use crate::error::{Result, RouletteError};
use std::fmt;
use std::str::FromStr;

pub const TOKEN_PREFIX: &str = "save";
pub const DELIMITER: char = ':';

/// `save:<project>:<port>`: a proposal the user has not yet picked.
///
/// Only the first two delimiters split, so a project name containing ':'
/// cannot be encoded; [`ConfirmationToken::new`] rejects such names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationToken {
    pub project: String,
    pub port: u32,
}

impl ConfirmationToken {
    pub fn new(project: impl Into<String>, port: u32) -> Result<Self> {
        let project = project.into();
        if project.contains(DELIMITER) {
            return Err(RouletteError::DelimiterInName(project));
        }
        Ok(Self { project, port })
    }

    /// True if `input` carries the token prefix, well-formed or not.
    pub fn looks_like_token(input: &str) -> bool {
        input
            .trim()
            .strip_prefix(TOKEN_PREFIX)
            .is_some_and(|rest| rest.starts_with(DELIMITER))
    }
}

impl fmt::Display for ConfirmationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TOKEN_PREFIX}{DELIMITER}{}{DELIMITER}{}", self.project, self.port)
    }
}

impl FromStr for ConfirmationToken {
    type Err = RouletteError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || RouletteError::MalformedToken(s.to_string());

        let mut parts = s.trim().splitn(3, DELIMITER);
        let (Some(prefix), Some(project), Some(port)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        if prefix != TOKEN_PREFIX || project.is_empty() {
            return Err(malformed());
        }
        let port = port.trim().parse::<u32>().map_err(|_| malformed())?;

        Ok(Self {
            project: project.to_string(),
            port,
        })
    }
}

/// The port segment of a token, or the input itself when it is not one.
///
/// Mirrors what the clipboard step of the workflow needs: whatever the user
/// selected, hand back just the port.
pub fn extract_port(input: &str) -> String {
    let input = input.trim();
    if !ConfirmationToken::looks_like_token(input) {
        return input.to_string();
    }
    input
        .splitn(3, DELIMITER)
        .nth(2)
        .unwrap_or(input)
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_token() {
        let token: ConfirmationToken = "save:myapp:4521".parse().unwrap();
        assert_eq!(token.project, "myapp");
        assert_eq!(token.port, 4521);
        assert_eq!(token.to_string(), "save:myapp:4521");
    }

    #[test]
    fn rejects_malformed_tokens() {
        for input in [
            "notsave:x",
            "save:myapp",
            "save::4521",
            "save:myapp:port",
            "save:my:app:4521",
            "SAVE:myapp:4521",
            "",
        ] {
            assert!(
                matches!(
                    input.parse::<ConfirmationToken>(),
                    Err(RouletteError::MalformedToken(_))
                ),
                "expected malformed: {input:?}"
            );
        }
    }

    #[test]
    fn names_with_delimiter_cannot_be_encoded() {
        assert!(matches!(
            ConfirmationToken::new("a:b", 1234),
            Err(RouletteError::DelimiterInName(_))
        ));
        assert!(ConfirmationToken::new("my app", 1234).is_ok());
    }

    #[test]
    fn token_detection() {
        assert!(ConfirmationToken::looks_like_token("save:x:1"));
        assert!(ConfirmationToken::looks_like_token("  save:broken"));
        assert!(!ConfirmationToken::looks_like_token("saved"));
        assert!(!ConfirmationToken::looks_like_token("4521"));
    }

    #[test]
    fn extract_port_from_token_or_passthrough() {
        assert_eq!(extract_port("save:api:1169"), "1169");
        assert_eq!(extract_port(" 8080 "), "8080");
        assert_eq!(extract_port("reset"), "reset");
    }
}
