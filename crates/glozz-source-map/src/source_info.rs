//! Byte ranges tagged with the file they point into

/// Index of a file registered with a [`SourceContext`](crate::SourceContext)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct FileId(pub usize);

/// A byte range `[start, end)` in one registered file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceInfo {
    pub file_id: FileId,
    pub start: usize,
    pub end: usize,
}

impl SourceInfo {
    /// Source info for a byte range read straight from `file_id`
    pub fn original(file_id: FileId, start: usize, end: usize) -> Self {
        SourceInfo {
            file_id,
            start,
            end: end.max(start),
        }
    }

    pub fn start_offset(&self) -> usize {
        self.start
    }

    pub fn end_offset(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Slice of `content` this range covers, if it lies on char boundaries
    pub fn slice<'a>(&self, content: &'a str) -> Option<&'a str> {
        content.get(self.start..self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_source_info() {
        let info = SourceInfo::original(FileId(2), 4, 9);

        assert_eq!(info.file_id, FileId(2));
        assert_eq!(info.start_offset(), 4);
        assert_eq!(info.end_offset(), 9);
        assert_eq!(info.len(), 5);
    }

    #[test]
    fn test_backwards_range_collapses() {
        let info = SourceInfo::original(FileId(0), 9, 4);
        assert!(info.is_empty());
        assert_eq!(info.start_offset(), 9);
    }

    #[test]
    fn test_slice() {
        let content = "<unit id=\"a_1\"/>";
        let info = SourceInfo::original(FileId(0), 1, 5);
        assert_eq!(info.slice(content), Some("unit"));
        assert_eq!(SourceInfo::original(FileId(0), 10, 40).slice(content), None);
    }
}
