/// Incremental "load more" window over a result list.
///
/// Without active filters the list is shown `BATCH` entries at a time; with
/// any filter active everything matching is shown at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMore {
    visible: usize,
}

impl LoadMore {
    pub const BATCH: usize = 10;

    pub fn new() -> Self {
        Self { visible: Self::BATCH }
    }

    /// Resume from a count the client already shows. Zero restarts.
    pub fn from_visible(visible: usize) -> Self {
        if visible == 0 {
            Self::new()
        } else {
            Self { visible }
        }
    }

    pub fn has_more(&self, total: usize, filters_active: bool) -> bool {
        !filters_active && self.visible < total
    }

    pub fn window<'a, T>(&self, items: &'a [T], filters_active: bool) -> &'a [T] {
        if filters_active {
            items
        } else {
            &items[..self.visible.min(items.len())]
        }
    }
}

impl Default for LoadMore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batches_of_ten() {
        let items: Vec<u32> = (0..25).collect();
        let window = LoadMore::new();
        assert_eq!(window.window(&items, false).len(), 10);
        assert!(window.has_more(items.len(), false));

        let window = LoadMore::from_visible(20);
        assert_eq!(window.window(&items, false).len(), 20);
        assert!(window.has_more(items.len(), false));

        let window = LoadMore::from_visible(30);
        assert_eq!(window.window(&items, false).len(), 25);
        assert!(!window.has_more(items.len(), false));
    }

    #[test]
    fn test_filters_show_everything() {
        let items: Vec<u32> = (0..25).collect();
        let window = LoadMore::new();
        assert_eq!(window.window(&items, true).len(), 25);
        assert!(!window.has_more(items.len(), true));
    }

    #[test]
    fn test_short_list() {
        let items = [1, 2, 3];
        assert_eq!(LoadMore::from_visible(0).window(&items, false), &[1, 2, 3]);
    }
}
