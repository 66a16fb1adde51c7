//! Source locations for Glozz annotation files
//!
//! Every element read from an `.aa` file remembers the byte range it came
//! from, so that structural problems can be reported as `path:line:column`
//! instead of a bare message.
//!
//! - [`SourceInfo`]: a byte range in a registered file
//! - [`SourceContext`]: the registered files, able to turn byte offsets
//!   into 1-indexed lines and columns
//!
//! # Example
//!
//! ```rust
//! use glozz_source_map::*;
//!
//! let mut ctx = SourceContext::new();
//! let file_id = ctx.add_file("doc.aa".into(), Some("<annotations>\n<unit/>".into()));
//!
//! let info = SourceInfo::original(file_id, 14, 21);
//! assert_eq!(ctx.describe(&info), "doc.aa:2:1");
//! ```

pub mod context;
pub mod source_info;

pub use context::{LineColumn, SourceContext, SourceFile};
pub use source_info::{FileId, SourceInfo};
