/// One file picked for upload but not yet committed.
///
/// Supplied by the file picker collaborator. The conventional spreadsheet
/// extension allowlist is advisory and enforced at the picker, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl StagedFile {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Raw byte length, the input to the record's display size.
    #[inline]
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Transient pre-commit buffer owned by the caller.
///
/// Nothing here touches persisted state; removing a staged file has no side
/// effects because nothing has been written yet. Once `take_all` feeds a
/// batch into `submit` there is no cancellation.
#[derive(Debug, Default)]
pub struct StagingArea {
    files: Vec<StagedFile>,
}

impl StagingArea {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a picked file to the batch, preserving pick order.
    pub fn stage(&mut self, file: StagedFile) {
        self.files.push(file);
    }

    /// Remove one staged file by position. Out-of-range is `None`.
    pub fn remove(&mut self, index: usize) -> Option<StagedFile> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    /// Drop the whole batch.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Drain the batch for submission, leaving the buffer empty.
    #[must_use]
    pub fn take_all(&mut self) -> Vec<StagedFile> {
        std::mem::take(&mut self.files)
    }

    #[inline]
    #[must_use]
    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> StagedFile {
        StagedFile::new(name, "application/vnd.ms-excel", vec![1, 2, 3])
    }

    #[test]
    fn staging_preserves_pick_order() {
        let mut area = StagingArea::new();
        area.stage(file("a.xlsx"));
        area.stage(file("b.xlsx"));

        let names: Vec<&str> = area.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.xlsx", "b.xlsx"]);
    }

    #[test]
    fn remove_is_positional_and_bounded() {
        let mut area = StagingArea::new();
        area.stage(file("a.xlsx"));
        area.stage(file("b.xlsx"));

        assert_eq!(area.remove(0).unwrap().name, "a.xlsx");
        assert!(area.remove(5).is_none());
        assert_eq!(area.len(), 1);
    }

    #[test]
    fn take_all_drains_the_buffer() {
        let mut area = StagingArea::new();
        area.stage(file("a.xlsx"));

        let batch = area.take_all();
        assert_eq!(batch.len(), 1);
        assert!(area.is_empty());
    }
}
