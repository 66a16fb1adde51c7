//! Content hashes tying an annotation file to its text.

use std::io::{self, Read};

use sha2::{Digest, Sha256};

use crate::document::Document;
use crate::error::{GlozzError, Result};

/// Lowercase hex SHA-256 of `bytes`.
pub fn hashcode(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// [`hashcode`] over everything `reader` yields.
pub fn hashcode_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Check the hashcode recorded in `document` against its text.
///
/// Documents without a recorded hashcode pass.
pub fn check_hashcode(document: &Document, text: &[u8]) -> Result<()> {
    let Some(expected) = document.hashcode.as_deref() else {
        return Ok(());
    };
    let actual = hashcode(text);
    if expected != actual {
        return Err(GlozzError::HashcodeMismatch {
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO: &str = "315f5bdb76d078c43b8ac0064e4a0164612b1fce77c869345bfc94c75894edd3";

    #[test]
    fn test_hashcode_known_value() {
        assert_eq!(hashcode(b"Hello, world!"), HELLO);
    }

    #[test]
    fn test_hashcode_is_sensitive_to_every_byte() {
        assert_ne!(hashcode(b"Hello, world!"), hashcode(b"Hello, world?"));
        assert_ne!(hashcode(b""), hashcode(b" "));
    }

    #[test]
    fn test_reader_matches_slice() {
        let bytes = b"Hello, world!".as_slice();
        assert_eq!(hashcode_reader(bytes).unwrap(), HELLO);
    }

    #[test]
    fn test_check_hashcode() {
        let doc = Document {
            hashcode: Some(HELLO.to_string()),
            ..Document::default()
        };
        assert!(check_hashcode(&doc, b"Hello, world!").is_ok());
        assert!(matches!(
            check_hashcode(&doc, b"Goodbye"),
            Err(GlozzError::HashcodeMismatch { ref expected, .. }) if expected == HELLO
        ));
        assert!(check_hashcode(&Document::new(), b"anything").is_ok());
    }
}
