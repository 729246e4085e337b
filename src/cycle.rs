/// Position inside an item's image list, with wraparound in both directions.
///
/// Carousel arithmetic lives here; the caller supplies the current image
/// count on each call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageCycle {
    index: usize,
}

impl ImageCycle {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// `(i + 1) mod len`. A zero `len` leaves the index at 0.
    pub fn next(&mut self, len: usize) -> usize {
        self.index = if len == 0 { 0 } else { (self.index + 1) % len };
        self.index
    }

    /// `(i - 1 + len) mod len`.
    pub fn prev(&mut self, len: usize) -> usize {
        self.index = if len == 0 {
            0
        } else if self.index == 0 {
            len - 1
        } else {
            (self.index - 1) % len
        };
        self.index
    }

    /// Jump straight to `index`. Out-of-range targets are refused.
    pub fn jump_to(&mut self, index: usize, len: usize) -> bool {
        if index >= len {
            return false;
        }
        self.index = index;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps() {
        let mut cycle = ImageCycle::default();
        assert_eq!(cycle.next(3), 1);
        assert_eq!(cycle.next(3), 2);
        assert_eq!(cycle.next(3), 0);
    }

    #[test]
    fn test_prev_wraps() {
        let mut cycle = ImageCycle::default();
        assert_eq!(cycle.prev(4), 3);
        assert_eq!(cycle.prev(4), 2);
    }

    #[test]
    fn test_single_image_stays_put() {
        let mut cycle = ImageCycle::default();
        assert_eq!(cycle.next(1), 0);
        assert_eq!(cycle.prev(1), 0);
    }

    #[test]
    fn test_jump_to_bounds() {
        let mut cycle = ImageCycle::default();
        assert!(cycle.jump_to(2, 3));
        assert_eq!(cycle.index(), 2);
        assert!(!cycle.jump_to(3, 3));
        assert_eq!(cycle.index(), 2);
        cycle.reset();
        assert_eq!(cycle.index(), 0);
    }
}
