use std::cell::Cell;

/// Selection and scrolling state for a list rendered in a fixed height area.
#[derive(Debug, Default)]
pub struct ListViewState {
    /// Currently selected row.
    selected_index: usize,
    /// First visible row.
    viewport_offset: usize,
    /// Number of rows in the list.
    item_count: usize,
    /// Last rendered viewport height. Set while rendering, needs interior mutability.
    viewport_height: Cell<usize>,
}

impl ListViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn viewport_offset(&self) -> usize {
        self.viewport_offset
    }

    /// Sets the viewport height (called from UI rendering).
    pub fn set_viewport_height(&self, height: usize) {
        self.viewport_height.set(height);
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Sets the row count, clamping the selection into range.
    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
        if count == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= count {
            self.selected_index = count - 1;
        }
        self.adjust_viewport();
    }

    /// Keeps the selected row inside the viewport.
    fn adjust_viewport(&mut self) {
        if self.item_count == 0 {
            self.viewport_offset = 0;
            return;
        }

        let height = self.viewport_height.get();
        if height == 0 {
            return;
        }

        if self.selected_index < self.viewport_offset {
            self.viewport_offset = self.selected_index;
        }
        if self.selected_index >= self.viewport_offset + height {
            self.viewport_offset = self.selected_index + 1 - height;
        }
        let max_offset = self.item_count.saturating_sub(height);
        self.viewport_offset = self.viewport_offset.min(max_offset);
    }

    /// Row offset of the selection inside the viewport.
    pub fn visible_selection(&self) -> Option<usize> {
        (self.item_count > 0 && self.selected_index >= self.viewport_offset)
            .then(|| self.selected_index - self.viewport_offset)
    }

    pub fn move_up(&mut self) {
        if self.item_count > 0 && self.selected_index > 0 {
            self.selected_index -= 1;
            self.adjust_viewport();
        }
    }

    pub fn move_down(&mut self) {
        if self.item_count > 0 && self.selected_index < self.item_count - 1 {
            self.selected_index += 1;
            self.adjust_viewport();
        }
    }

    /// Moves selection up by half a page.
    pub fn page_up(&mut self) {
        if self.item_count > 0 {
            let page = self.viewport_height.get().saturating_sub(1).max(1) / 2;
            self.selected_index = self.selected_index.saturating_sub(page.max(1));
            self.adjust_viewport();
        }
    }

    /// Moves selection down by half a page.
    pub fn page_down(&mut self) {
        if self.item_count > 0 {
            let page = self.viewport_height.get().saturating_sub(1).max(1) / 2;
            self.selected_index = (self.selected_index + page.max(1)).min(self.item_count - 1);
            self.adjust_viewport();
        }
    }

    pub fn select_last(&mut self) {
        if self.item_count > 0 {
            self.selected_index = self.item_count - 1;
            self.adjust_viewport();
        }
    }

    /// Selects a row, clamped to the valid range.
    pub fn select_index(&mut self, index: usize) {
        if self.item_count > 0 {
            self.selected_index = index.min(self.item_count - 1);
            self.adjust_viewport();
        }
    }

    pub fn reset(&mut self) {
        self.selected_index = 0;
        self.viewport_offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(height: usize, count: usize) -> ListViewState {
        let mut state = ListViewState::new();
        state.set_viewport_height(height);
        state.set_item_count(count);
        state
    }

    #[test]
    fn test_move_down_stops_at_end() {
        let mut state = state(10, 3);
        state.move_down();
        state.move_down();
        state.move_down();
        assert_eq!(state.selected_index(), 2);
    }

    #[test]
    fn test_move_up_stops_at_start() {
        let mut state = state(10, 3);
        state.move_up();
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn test_page_down_clamps_to_last() {
        let mut state = state(20, 12);
        state.select_index(8);
        state.page_down();
        assert_eq!(state.selected_index(), 11);
    }

    #[test]
    fn test_page_up_moves_half_page() {
        let mut state = state(20, 50);
        state.select_index(20);
        state.page_up();
        assert_eq!(state.selected_index(), 11);
    }

    #[test]
    fn test_shrinking_list_clamps_selection() {
        let mut state = state(10, 10);
        state.select_last();
        state.set_item_count(4);
        assert_eq!(state.selected_index(), 3);

        state.set_item_count(0);
        assert_eq!(state.selected_index(), 0);
        assert_eq!(state.visible_selection(), None);
    }

    #[test]
    fn test_viewport_follows_selection() {
        let mut state = state(5, 20);
        for _ in 0..10 {
            state.move_down();
        }
        assert_eq!(state.selected_index(), 10);
        assert_eq!(state.viewport_offset(), 6);
        assert_eq!(state.visible_selection(), Some(4));

        for _ in 0..8 {
            state.move_up();
        }
        assert_eq!(state.viewport_offset(), 2);
        assert_eq!(state.visible_selection(), Some(0));
    }

    #[test]
    fn test_reset() {
        let mut state = state(5, 20);
        state.select_index(12);
        state.reset();
        assert_eq!(state.selected_index(), 0);
        assert_eq!(state.viewport_offset(), 0);
    }
}
