//! Registered source files and offset-to-line lookups

use crate::source_info::{FileId, SourceInfo};

/// The files locations can point into
#[derive(Debug, Clone, Default)]
pub struct SourceContext {
    files: Vec<SourceFile>,
}

/// A registered file
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path as it should appear in messages
    pub path: String,
    /// File content, when it was kept around for location lookups
    pub content: Option<String>,
    /// Byte offset of the start of every line
    line_starts: Vec<usize>,
}

/// A 1-indexed line and column; columns count characters, not bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}

impl SourceFile {
    fn new(path: String, content: Option<String>) -> Self {
        let line_starts = content
            .as_deref()
            .map(|text| {
                std::iter::once(0)
                    .chain(text.match_indices('\n').map(|(i, _)| i + 1))
                    .collect()
            })
            .unwrap_or_default();
        SourceFile {
            path,
            content,
            line_starts,
        }
    }

    /// Line and column of a byte offset, or `None` without content or past the end
    pub fn line_column(&self, offset: usize) -> Option<LineColumn> {
        let content = self.content.as_deref()?;
        let before = content.get(..offset)?;

        // index of the last line starting at or before `offset`
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let column = before[self.line_starts[line]..].chars().count();
        Some(LineColumn {
            line: line + 1,
            column: column + 1,
        })
    }
}

impl SourceContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file and return its id
    ///
    /// Without content, locations in this file are reported by byte offset only.
    pub fn add_file(&mut self, path: String, content: Option<String>) -> FileId {
        let id = FileId(self.files.len());
        self.files.push(SourceFile::new(path, content));
        id
    }

    pub fn get_file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0)
    }

    /// Where a source range starts
    pub fn line_column(&self, info: &SourceInfo) -> Option<LineColumn> {
        self.get_file(info.file_id)?.line_column(info.start_offset())
    }

    /// `path:line:column` for a source range
    ///
    /// Falls back to `path@byte` when the file content is unknown.
    pub fn describe(&self, info: &SourceInfo) -> String {
        let path = self
            .get_file(info.file_id)
            .map_or("<unknown>", |f| f.path.as_str());

        match self.line_column(info) {
            Some(LineColumn { line, column }) => format!("{}:{}:{}", path, line, column),
            None => format!("{}@{}", path, info.start_offset()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(content: Option<&str>) -> (SourceContext, FileId) {
        let mut ctx = SourceContext::new();
        let id = ctx.add_file("doc.aa".to_string(), content.map(str::to_string));
        (ctx, id)
    }

    #[test]
    fn test_add_and_get_file() {
        let (ctx, id) = context(Some("<annotations/>"));
        assert_eq!(id, FileId(0));
        assert_eq!(ctx.get_file(id).map(|f| f.path.as_str()), Some("doc.aa"));
        assert!(ctx.get_file(FileId(1)).is_none());
    }

    #[test]
    fn test_line_column() {
        let (ctx, id) = context(Some("hello\nworld\n"));
        let at = |offset| ctx.get_file(id).and_then(|f| f.line_column(offset));

        assert_eq!(at(0), Some(LineColumn { line: 1, column: 1 }));
        assert_eq!(at(3), Some(LineColumn { line: 1, column: 4 }));
        // the newline itself still belongs to line 1
        assert_eq!(at(5), Some(LineColumn { line: 1, column: 6 }));
        assert_eq!(at(6), Some(LineColumn { line: 2, column: 1 }));
        assert_eq!(at(12), Some(LineColumn { line: 3, column: 1 }));
        assert_eq!(at(13), None);
    }

    #[test]
    fn test_columns_count_chars() {
        // 'é' is two bytes
        let (ctx, id) = context(Some("é<unit/>"));
        let loc = ctx.line_column(&SourceInfo::original(id, 2, 8));
        assert_eq!(loc, Some(LineColumn { line: 1, column: 2 }));
    }

    #[test]
    fn test_describe() {
        let (ctx, id) = context(Some("<annotations>\n  <unit/>"));
        assert_eq!(ctx.describe(&SourceInfo::original(id, 16, 23)), "doc.aa:2:3");

        let (ctx, id) = context(None);
        assert_eq!(ctx.describe(&SourceInfo::original(id, 16, 23)), "doc.aa@16");
    }
}
