use crate::cycle::ImageCycle;

/// Which filtered item has its detail modal open, and which of its images is
/// showing.
///
/// When set, the item index always points into the current filtered list;
/// callers that change that list must call [`Selection::retain_if`].
#[derive(Debug, Clone, Default)]
pub struct Selection {
    item: Option<usize>,
    image: ImageCycle,
}

impl Selection {
    pub fn is_open(&self) -> bool {
        self.item.is_some()
    }

    pub fn item_index(&self) -> Option<usize> {
        self.item
    }

    pub fn image_index(&self) -> usize {
        self.image.index()
    }

    pub fn cycle_mut(&mut self) -> Option<&mut ImageCycle> {
        if self.item.is_some() {
            Some(&mut self.image)
        } else {
            None
        }
    }

    /// Open `index` of a list with `len` entries and rewind to its cover.
    ///
    /// An out-of-range index closes the modal instead and returns `false`.
    pub fn select(&mut self, index: usize, len: usize) -> bool {
        self.image.reset();
        if index >= len {
            log::warn!("ignoring selection of item {} in a list of {}", index, len);
            self.item = None;
            return false;
        }
        self.item = Some(index);
        true
    }

    /// Close the modal. Returns whether it was open.
    pub fn deselect(&mut self) -> bool {
        self.image.reset();
        self.item.take().is_some()
    }

    /// Keep the selection only if `keep(index)` holds for the open index.
    /// Returns `true` when an open selection was dropped.
    pub fn retain_if<F>(&mut self, keep: F) -> bool
    where
        F: FnOnce(usize) -> bool,
    {
        match self.item {
            Some(index) if !keep(index) => {
                log::debug!("dropping stale selection at index {}", index);
                self.deselect()
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_and_deselect() {
        let mut selection = Selection::default();
        assert!(!selection.is_open());
        assert!(selection.select(1, 3));
        assert_eq!(selection.item_index(), Some(1));
        assert!(selection.deselect());
        assert!(!selection.deselect());
        assert!(!selection.is_open());
    }

    #[test]
    fn test_select_resets_image_index() {
        let mut selection = Selection::default();
        selection.select(0, 2);
        selection.cycle_mut().unwrap().next(4);
        assert_eq!(selection.image_index(), 1);
        selection.select(1, 2);
        assert_eq!(selection.image_index(), 0);
    }

    #[test]
    fn test_out_of_range_select_closes() {
        let mut selection = Selection::default();
        selection.select(0, 2);
        assert!(!selection.select(5, 2));
        assert!(!selection.is_open());
    }

    #[test]
    fn test_cycle_requires_open_item() {
        let mut selection = Selection::default();
        assert!(selection.cycle_mut().is_none());
    }

    #[test]
    fn test_retain_if() {
        let mut selection = Selection::default();
        selection.select(2, 3);
        assert!(!selection.retain_if(|i| i < 3));
        assert!(selection.is_open());
        assert!(selection.retain_if(|i| i < 1));
        assert!(!selection.is_open());
        assert!(!selection.retain_if(|_| false));
    }
}
