use std::ops::Range;

/// Cards per page in the project and gallery grids.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Fixed-size page window over a list, with a "show all" override.
///
/// Pages are 1-indexed. The window never stores the list length; every
/// operation that depends on it takes `len` so the window stays valid when
/// the filtered list underneath changes.
#[derive(Debug, Clone)]
pub struct PageWindow {
    page_size: usize,
    current_page: usize,
    show_all: bool,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageWindow {
    /// A page size of zero is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            show_all: false,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    /// Always at least 1, even for an empty list.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Index range of `page` within a list of `len` items, clamped to the
    /// list. Ignores `show_all`.
    pub fn page_range(&self, len: usize, page: usize) -> Range<usize> {
        let start = page.saturating_sub(1).saturating_mul(self.page_size).min(len);
        let end = page.saturating_mul(self.page_size).min(len);
        start..end.max(start)
    }

    /// Items of `page`, or the whole list when "show all" is on.
    pub fn page_items<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        if self.show_all {
            items
        } else {
            &items[self.page_range(items.len(), page)]
        }
    }

    /// Items of the current page.
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        self.page_items(items, self.current_page)
    }

    pub fn can_go_next(&self, len: usize) -> bool {
        self.current_page < self.total_pages(len)
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Advance one page. Returns `false` at the last page.
    pub fn next_page(&mut self, len: usize) -> bool {
        if !self.can_go_next(len) {
            return false;
        }
        self.current_page += 1;
        log::debug!("page window advanced to {}/{}", self.current_page, self.total_pages(len));
        true
    }

    /// Go back one page. Returns `false` at page 1.
    pub fn prev_page(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.current_page -= 1;
        log::debug!("page window moved back to {}", self.current_page);
        true
    }

    /// Jump to `page`, clamped into `1..=total_pages(len)`.
    pub fn go_to_page(&mut self, len: usize, page: usize) -> bool {
        let target = page.clamp(1, self.total_pages(len));
        if target == self.current_page {
            return false;
        }
        self.current_page = target;
        true
    }

    /// Flip "show all". Turning it off returns to page 1.
    pub fn toggle_show_all(&mut self) -> bool {
        self.show_all = !self.show_all;
        if !self.show_all {
            self.current_page = 1;
        }
        self.show_all
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Pull the current page back in range after the list shrank.
    pub fn clamp(&mut self, len: usize) {
        self.current_page = self.current_page.clamp(1, self.total_pages(len));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        let window = PageWindow::new(6);
        assert_eq!(window.total_pages(0), 1);
        assert_eq!(window.total_pages(1), 1);
        assert_eq!(window.total_pages(6), 1);
        assert_eq!(window.total_pages(7), 2);
        assert_eq!(window.total_pages(14), 3);
    }

    #[test]
    fn test_page_items_slices_and_clamps() {
        let items: Vec<u32> = (0..8).collect();
        let window = PageWindow::new(6);
        assert_eq!(window.page_items(&items, 1), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(window.page_items(&items, 2), &[6, 7]);
        assert!(window.page_items(&items, 3).is_empty());
        assert!(window.page_items(&items, 0).is_empty());
    }

    #[test]
    fn test_navigation_saturates() {
        let mut window = PageWindow::new(6);
        assert!(!window.prev_page());
        assert_eq!(window.current_page(), 1);
        assert!(window.next_page(8));
        assert!(!window.next_page(8));
        assert_eq!(window.current_page(), 2);
        assert!(window.prev_page());
        assert_eq!(window.current_page(), 1);
    }

    #[test]
    fn test_show_all_overrides_page() {
        let items: Vec<u32> = (0..14).collect();
        let mut window = PageWindow::new(6);
        window.next_page(items.len());
        assert!(window.toggle_show_all());
        assert_eq!(window.visible(&items).len(), 14);
        assert!(!window.toggle_show_all());
        assert_eq!(window.current_page(), 1);
        assert_eq!(window.visible(&items).len(), 6);
    }

    #[test]
    fn test_zero_page_size_is_coerced() {
        let window = PageWindow::new(0);
        assert_eq!(window.page_size(), 1);
        assert_eq!(window.total_pages(3), 3);
    }

    #[test]
    fn test_go_to_page_and_clamp() {
        let mut window = PageWindow::new(2);
        assert!(window.go_to_page(10, 99));
        assert_eq!(window.current_page(), 5);
        window.clamp(3);
        assert_eq!(window.current_page(), 2);
        assert!(!window.go_to_page(3, 2));
    }
}
