//! Errors raised while reading or writing annotation XML.

use glozz_source_map::SourceInfo;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Rejected by quick-xml.
    #[error("malformed XML: {message}{}", .position.map(|p| format!(" (byte {})", p)).unwrap_or_default())]
    Syntax {
        message: String,
        position: Option<u64>,
    },

    #[error("<{name}> is never closed")]
    Unclosed {
        name: String,
        location: Option<SourceInfo>,
    },

    #[error("<{name}> mixes text with child elements")]
    MixedContent {
        name: String,
        location: Option<SourceInfo>,
    },

    #[error("no root element")]
    NoRoot,

    #[error("more than one root element")]
    MultipleRoots { location: Option<SourceInfo> },

    #[error("cannot write XML: {0}")]
    Write(String),
}

impl Error {
    pub fn location(&self) -> Option<&SourceInfo> {
        match self {
            Error::Unclosed { location, .. }
            | Error::MixedContent { location, .. }
            | Error::MultipleRoots { location } => location.as_ref(),
            Error::Syntax { .. } | Error::NoRoot | Error::Write(_) => None,
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Syntax {
            message: err.to_string(),
            position: None,
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Syntax {
            message: err.to_string(),
            position: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = Error::Syntax {
            message: "unexpected token".to_string(),
            position: Some(12),
        };
        assert_eq!(err.to_string(), "malformed XML: unexpected token (byte 12)");

        let err = Error::Syntax {
            message: "unexpected token".to_string(),
            position: None,
        };
        assert_eq!(err.to_string(), "malformed XML: unexpected token");
    }

    #[test]
    fn test_location() {
        let loc = SourceInfo::default();
        let err = Error::Unclosed {
            name: "unit".to_string(),
            location: Some(loc.clone()),
        };
        assert_eq!(err.to_string(), "<unit> is never closed");
        assert_eq!(err.location(), Some(&loc));
        assert!(Error::NoRoot.location().is_none());
    }
}
