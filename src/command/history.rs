use crate::raster::RasterRef;

/// Linear undo/redo history over committed rasters.
///
/// Never empty: index 0 holds the original upload and the cursor always
/// points at a valid entry. Committing while the cursor is not at the end
/// discards everything after it.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<RasterRef>,
    cursor: usize,
}

#[allow(clippy::len_without_is_empty)]
impl History {
    /// Creates a history holding only the original raster
    pub fn new(original: RasterRef) -> Self {
        Self {
            entries: vec![original],
            cursor: 0,
        }
    }

    /// Truncates after the cursor, appends `raster` and moves onto it.
    pub fn commit(&mut self, raster: RasterRef) -> &RasterRef {
        let discarded = self.entries.len() - (self.cursor + 1);
        if discarded > 0 {
            log::debug!("Discarding {discarded} redo entries");
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(raster);
        self.cursor = self.entries.len() - 1;
        self.current()
    }

    /// Steps back one entry; a no-op at the original
    pub fn undo(&mut self) -> &RasterRef {
        if self.can_undo() {
            self.cursor -= 1;
        }
        self.current()
    }

    /// Steps forward one entry; a no-op at the newest entry
    pub fn redo(&mut self) -> &RasterRef {
        if self.can_redo() {
            self.cursor += 1;
        }
        self.current()
    }

    /// Replaces the entire history with a single original
    pub fn reset(&mut self, original: RasterRef) {
        self.entries.clear();
        self.entries.push(original);
        self.cursor = 0;
    }

    pub fn current(&self) -> &RasterRef {
        &self.entries[self.cursor]
    }

    pub fn original(&self) -> &RasterRef {
        &self.entries[0]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of entries, including the original
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[RasterRef] {
        &self.entries
    }

    /// Returns true if there are entries before the cursor
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Returns true if there are entries after the cursor
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Raster;
    use egui::Color32;
    use std::sync::Arc;

    fn raster(shade: u8) -> RasterRef {
        Raster::from_color(2, 2, Color32::from_gray(shade)).into_ref()
    }

    #[test]
    fn test_new_history() {
        let history = History::new(raster(0));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_commit_moves_cursor() {
        let mut history = History::new(raster(0));
        history.commit(raster(1));
        history.commit(raster(2));
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(**history.current(), *raster(2));
    }

    #[test]
    fn test_boundaries_are_no_ops() {
        let mut history = History::new(raster(0));
        let original = history.current().clone();
        assert!(Arc::ptr_eq(history.undo(), &original));
        assert!(Arc::ptr_eq(history.redo(), &original));
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_commit_after_undo_truncates() {
        let mut history = History::new(raster(0));
        history.commit(raster(1));
        history.commit(raster(2));
        history.commit(raster(3));
        history.undo();
        history.undo();
        history.commit(raster(9));

        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(**history.current(), *raster(9));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_reset() {
        let mut history = History::new(raster(0));
        history.commit(raster(1));
        history.reset(raster(5));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(**history.original(), *raster(5));
    }
}
