//! Browsing state for one gallery or project view.
//!
//! [`GalleryController`] composes the category filter, the page window, the
//! modal selection and the image carousel over an immutable item list. It
//! renders nothing: views read the derived accessors, issue commands in
//! response to input, and drain [`ControllerEvent`]s to drive side effects
//! such as scroll locking or entrance effects.

use crate::error::{FolioError, Result};
use crate::filter::{self, Category, CategoryFilter};
use crate::item::{BrowsableItem, ItemId};
use crate::pagination::{PageWindow, DEFAULT_PAGE_SIZE};
use crate::selection::Selection;

/// Observable transitions, queued in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// The detail modal opened on filtered index `index`.
    Opened { index: usize },
    /// The detail modal closed, by request or because its item went away.
    Closed,
    ImageChanged { index: usize },
    PageChanged { page: usize },
    CategoryChanged(Category),
    ShowAllToggled { show_all: bool },
}

#[derive(Debug, Clone)]
pub struct GalleryController {
    items: Vec<BrowsableItem>,
    filter: CategoryFilter,
    // source indices of the filtered items
    filtered: Vec<usize>,
    window: PageWindow,
    selection: Selection,
    events: Vec<ControllerEvent>,
}

impl GalleryController {
    pub fn new(items: Vec<BrowsableItem>) -> Self {
        Self::with_page_size(items, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(items: Vec<BrowsableItem>, page_size: usize) -> Self {
        let filter = CategoryFilter::new();
        let filtered = filter.apply(&items);
        Self {
            items,
            filter,
            filtered,
            window: PageWindow::new(page_size),
            selection: Selection::default(),
            events: Vec::new(),
        }
    }

    pub fn items(&self) -> &[BrowsableItem] {
        &self.items
    }

    pub fn page_size(&self) -> usize {
        self.window.page_size()
    }

    // ---- category filter ----

    pub fn categories(&self) -> Vec<Category> {
        filter::categories(&self.items)
    }

    pub fn active_category(&self) -> &Category {
        self.filter.active()
    }

    /// Switch the active category. A real change returns to page 1 and
    /// closes any open item.
    pub fn set_category(&mut self, category: impl Into<Category>) {
        let category = category.into();
        if !self.filter.set(category.clone()) {
            return;
        }
        self.filtered = self.filter.apply(&self.items);
        self.window.reset();
        if self.selection.deselect() {
            self.events.push(ControllerEvent::Closed);
        }
        log::debug!("category set to {} ({} items)", category, self.filtered.len());
        self.events.push(ControllerEvent::CategoryChanged(category));
    }

    pub fn filtered_items(&self) -> Vec<&BrowsableItem> {
        self.filtered.iter().map(|&idx| &self.items[idx]).collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    fn filtered_item(&self, index: usize) -> Option<&BrowsableItem> {
        self.filtered.get(index).map(|&idx| &self.items[idx])
    }

    // ---- pagination ----

    pub fn total_pages(&self) -> usize {
        self.window.total_pages(self.filtered.len())
    }

    pub fn current_page(&self) -> usize {
        self.window.current_page()
    }

    pub fn show_all(&self) -> bool {
        self.window.show_all()
    }

    pub fn can_go_next(&self) -> bool {
        !self.window.show_all() && self.window.can_go_next(self.filtered.len())
    }

    pub fn can_go_previous(&self) -> bool {
        !self.window.show_all() && self.window.can_go_previous()
    }

    pub fn next_page(&mut self) {
        if self.window.next_page(self.filtered.len()) {
            self.events.push(ControllerEvent::PageChanged { page: self.current_page() });
        }
    }

    pub fn prev_page(&mut self) {
        if self.window.prev_page() {
            self.events.push(ControllerEvent::PageChanged { page: self.current_page() });
        }
    }

    pub fn go_to_page(&mut self, page: usize) {
        if self.window.go_to_page(self.filtered.len(), page) {
            self.events.push(ControllerEvent::PageChanged { page: self.current_page() });
        }
    }

    pub fn toggle_show_all(&mut self) {
        let show_all = self.window.toggle_show_all();
        self.events.push(ControllerEvent::ShowAllToggled { show_all });
    }

    /// Filter, then paginate (or not, under "show all").
    pub fn visible_items(&self) -> Vec<&BrowsableItem> {
        self.window
            .visible(&self.filtered)
            .iter()
            .map(|&idx| &self.items[idx])
            .collect()
    }

    /// Filtered index of the first visible card.
    pub fn visible_offset(&self) -> usize {
        if self.window.show_all() {
            0
        } else {
            self.window
                .page_range(self.filtered.len(), self.window.current_page())
                .start
        }
    }

    // ---- selection / modal ----

    pub fn is_open(&self) -> bool {
        self.selection.is_open()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection.item_index()
    }

    /// Open the item at filtered index `index`. An index outside the filtered
    /// list leaves the modal closed.
    pub fn select(&mut self, index: usize) {
        let was_open = self.selection.is_open();
        if self.selection.select(index, self.filtered.len()) {
            self.events.push(ControllerEvent::Opened { index });
        } else if was_open {
            self.events.push(ControllerEvent::Closed);
        }
    }

    /// Open filtered item `index` on image `image`, for callers that take
    /// both from user input. Either index out of range is an error and
    /// leaves the modal closed.
    pub fn open_at(&mut self, index: usize, image: usize) -> Result<()> {
        let Some(item) = self.filtered_item(index) else {
            let err = FolioError::Validation(format!(
                "no item at index {} ({} items in {})",
                index,
                self.filtered.len(),
                self.filter.active()
            ));
            self.deselect();
            return Err(err);
        };
        if image >= item.image_count() {
            let err = FolioError::Validation(format!(
                "no image {} in '{}' ({} images)",
                image,
                item.title,
                item.image_count()
            ));
            self.deselect();
            return Err(err);
        }
        self.select(index);
        if image > 0 {
            self.jump_to(image);
        }
        Ok(())
    }

    /// Open the item shown in the `slot`-th card of the current page.
    pub fn select_visible(&mut self, slot: usize) {
        let visible = self.window.visible(&self.filtered).len();
        if slot >= visible {
            log::warn!("ignoring click on card {} of {}", slot, visible);
            if self.selection.deselect() {
                self.events.push(ControllerEvent::Closed);
            }
            return;
        }
        self.select(self.visible_offset() + slot);
    }

    pub fn deselect(&mut self) {
        if self.selection.deselect() {
            self.events.push(ControllerEvent::Closed);
        }
    }

    pub fn current_item(&self) -> Option<&BrowsableItem> {
        self.selection
            .item_index()
            .and_then(|index| self.filtered_item(index))
    }

    pub fn current_image(&self) -> Option<&str> {
        self.current_item()
            .and_then(|item| item.images.get(self.selection.image_index()))
            .map(String::as_str)
    }

    pub fn selected_image_index(&self) -> usize {
        self.selection.image_index()
    }

    /// Image count of the open item, 0 when closed.
    pub fn image_count(&self) -> usize {
        self.current_item().map_or(0, BrowsableItem::image_count)
    }

    // ---- image cycle ----

    pub fn next_image(&mut self) {
        let len = self.image_count();
        if let Some(cycle) = self.selection.cycle_mut() {
            let index = cycle.next(len);
            self.events.push(ControllerEvent::ImageChanged { index });
        }
    }

    pub fn prev_image(&mut self) {
        let len = self.image_count();
        if let Some(cycle) = self.selection.cycle_mut() {
            let index = cycle.prev(len);
            self.events.push(ControllerEvent::ImageChanged { index });
        }
    }

    /// Show image `index` of the open item, as the pager dots do.
    pub fn jump_to(&mut self, index: usize) {
        let len = self.image_count();
        if let Some(cycle) = self.selection.cycle_mut() {
            if cycle.jump_to(index, len) {
                self.events.push(ControllerEvent::ImageChanged { index });
            } else {
                log::warn!("ignoring jump to image {} of {}", index, len);
            }
        }
    }

    // ---- source list ----

    /// Swap the source list, e.g. after loading another catalog.
    ///
    /// The open item survives only if the same id still sits at its filtered
    /// index; the current page is pulled back into range. A surviving item
    /// whose image list shrank past the shown image rewinds to its cover.
    pub fn replace_items(&mut self, items: Vec<BrowsableItem>) {
        let selected_id: Option<ItemId> = self.current_item().map(|item| item.id.clone());
        self.items = items;
        self.filtered = self.filter.apply(&self.items);

        let page = self.window.current_page();
        self.window.clamp(self.filtered.len());
        if self.window.current_page() != page {
            self.events.push(ControllerEvent::PageChanged { page: self.current_page() });
        }

        let filtered = &self.filtered;
        let source = &self.items;
        let dropped = self.selection.retain_if(|index| {
            filtered
                .get(index)
                .map(|&idx| Some(&source[idx].id) == selected_id.as_ref())
                .unwrap_or(false)
        });
        if dropped {
            self.events.push(ControllerEvent::Closed);
            return;
        }

        let len = self.image_count();
        if let Some(cycle) = self.selection.cycle_mut() {
            if cycle.index() >= len {
                log::debug!("image {} gone after reload, back to the cover", cycle.index());
                cycle.reset();
                self.events.push(ControllerEvent::ImageChanged { index: 0 });
            }
        }
    }

    /// Take the queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<ControllerEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(layout: &[(&str, usize)]) -> Vec<BrowsableItem> {
        layout.iter()
            .enumerate()
            .map(|(i, (category, images))| {
                let images: Vec<String> = (0..*images).map(|n| format!("{}-{}.jpg", i, n)).collect();
                BrowsableItem::new(i as i64, format!("Item {}", i), images)
                    .unwrap()
                    .with_category(*category)
            })
            .collect()
    }

    #[test]
    fn test_defaults() {
        let controller = GalleryController::new(items(&[("UI/UX", 1), ("Animation", 2)]));
        assert_eq!(controller.active_category(), &Category::All);
        assert_eq!(controller.current_page(), 1);
        assert!(!controller.show_all());
        assert!(!controller.is_open());
        assert_eq!(controller.current_image(), None);
        assert_eq!(controller.image_count(), 0);
    }

    #[test]
    fn test_select_visible_translates_page_offset() {
        let mut controller = GalleryController::with_page_size(items(&[("A", 1); 5]), 2);
        controller.next_page();
        controller.select_visible(1);
        assert_eq!(controller.selected_index(), Some(3));
        assert_eq!(controller.current_item().unwrap().title, "Item 3");
        controller.select_visible(5);
        assert!(!controller.is_open());
    }

    #[test]
    fn test_image_commands_need_open_item() {
        let mut controller = GalleryController::new(items(&[("A", 3)]));
        controller.next_image();
        controller.prev_image();
        controller.jump_to(1);
        assert!(controller.drain_events().is_empty());
        assert_eq!(controller.selected_image_index(), 0);
    }

    #[test]
    fn test_jump_to_out_of_range_keeps_index() {
        let mut controller = GalleryController::new(items(&[("A", 3)]));
        controller.select(0);
        controller.jump_to(2);
        assert_eq!(controller.current_image(), Some("0-2.jpg"));
        controller.jump_to(3);
        assert_eq!(controller.selected_image_index(), 2);
    }

    #[test]
    fn test_event_sequence() {
        let mut controller = GalleryController::new(items(&[("A", 2), ("B", 1)]));
        controller.select(0);
        controller.next_image();
        controller.set_category("B");
        assert_eq!(
            controller.drain_events(),
            vec![
                ControllerEvent::Opened { index: 0 },
                ControllerEvent::ImageChanged { index: 1 },
                ControllerEvent::Closed,
                ControllerEvent::CategoryChanged(Category::named("B")),
            ]
        );
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn test_same_category_is_a_no_op() {
        let mut controller = GalleryController::new(items(&[("A", 2), ("A", 1)]));
        controller.set_category("A");
        controller.select(1);
        controller.drain_events();
        controller.set_category("A");
        assert!(controller.is_open());
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn test_open_at_checks_both_indices() {
        let mut controller = GalleryController::new(items(&[("A", 3), ("B", 1)]));
        controller.open_at(0, 2).unwrap();
        assert_eq!(controller.current_image(), Some("0-2.jpg"));

        match controller.open_at(1, 1) {
            Err(FolioError::Validation(msg)) => assert!(msg.contains("no image 1")),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(!controller.is_open());

        assert!(controller.open_at(5, 0).is_err());
        assert!(!controller.is_open());

        controller.open_at(1, 0).unwrap();
        assert_eq!(controller.current_image(), Some("1-0.jpg"));
    }

    #[test]
    fn test_pagination_disabled_under_show_all() {
        let mut controller = GalleryController::with_page_size(items(&[("A", 1); 4]), 2);
        assert!(controller.can_go_next());
        controller.toggle_show_all();
        assert!(!controller.can_go_next());
        assert!(!controller.can_go_previous());
        assert_eq!(controller.visible_offset(), 0);
    }
}
