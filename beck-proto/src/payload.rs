//! Payload grammar: `<credential><space><command-text>`.

use crate::Error;

/// Splits a decoded payload into credential bytes and command text.
///
/// Only the first space is structural; the command text keeps any further
/// spaces and may be empty. The command text must be valid UTF-8; the
/// credential is raw bytes and carries no such requirement.
pub fn split(payload: &[u8]) -> Result<(&[u8], &str), Error> {
    let sp = payload
        .iter()
        .position(|&b| b == b' ')
        .ok_or(Error::Protocol("no credential separator"))?;
    let text = std::str::from_utf8(&payload[sp + 1..])
        .map_err(|_| Error::Protocol("command text is not valid UTF-8"))?;
    Ok((&payload[..sp], text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_space() {
        let (cred, text) = split(b"s3cr3t exec ls -la").unwrap();
        assert_eq!(cred, b"s3cr3t");
        assert_eq!(text, "exec ls -la");
    }

    #[test]
    fn command_text_may_be_empty() {
        let (cred, text) = split(b"s3cr3t ").unwrap();
        assert_eq!(cred, b"s3cr3t");
        assert_eq!(text, "");
    }

    #[test]
    fn credential_may_be_empty() {
        let (cred, text) = split(b" stop").unwrap();
        assert_eq!(cred, b"");
        assert_eq!(text, "stop");
    }

    #[test]
    fn rejects_missing_separator() {
        assert!(matches!(split(b"s3cr3tstop"), Err(Error::Protocol(_))));
        assert!(matches!(split(b""), Err(Error::Protocol(_))));
    }

    #[test]
    fn rejects_non_utf8_command_text() {
        assert!(matches!(
            split(b"s3cr3t \xff\xfe"),
            Err(Error::Protocol(_))
        ));
    }
}
