//! Fixed-size pages over the shown sequence.

pub const DEFAULT_PAGE_SIZE: usize = 12;
pub const PAGE_SIZE_CHOICES: [usize; 4] = [6, 12, 24, 48];

/// Where the current slice sits in the shown sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// 1-based, always within `1..=total_pages`.
    pub current_page: usize,
    pub page_size: usize,
    /// Never below 1, even for an empty sequence.
    pub total_pages: usize,
    pub total_items: usize,
    pub is_first_page: bool,
    pub is_last_page: bool,
}

impl PageInfo {
    /// Zero-based offset of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.current_page - 1) * self.page_size
    }

    pub fn summary(&self) -> String {
        format!(
            "Page {} of {} · {} results",
            self.current_page, self.total_pages, self.total_items
        )
    }
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Clamps `page` into range and returns the matching slice.
///
/// Page `0` becomes the first page and anything past the end becomes the
/// last one. A page size of `0` is treated as `1`.
pub fn paginate<T>(shown: &[T], page: usize, page_size: usize) -> (&[T], PageInfo) {
    let page_size = page_size.max(1);
    let total_items = shown.len();
    let total_pages = total_pages(total_items, page_size);
    let current_page = page.clamp(1, total_pages);

    let start = ((current_page - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);

    let info = PageInfo {
        current_page,
        page_size,
        total_pages,
        total_items,
        is_first_page: current_page == 1,
        is_last_page: current_page == total_pages,
    };

    (&shown[start..end], info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sequence() {
        let shown: Vec<u32> = Vec::new();
        let (slice, info) = paginate(&shown, 1, 12);
        assert!(slice.is_empty());
        assert_eq!(info.total_pages, 1);
        assert_eq!(info.current_page, 1);
        assert_eq!(info.total_items, 0);
        assert!(info.is_first_page);
        assert!(info.is_last_page);
    }

    #[test]
    fn test_page_past_end_clamps_to_last() {
        let shown: Vec<u32> = (1..=7).collect();
        let (slice, info) = paginate(&shown, 10, 3);
        assert_eq!(info.current_page, 3);
        assert_eq!(info.total_pages, 3);
        assert_eq!(slice, &[7]);
        assert!(info.is_last_page);
        assert!(!info.is_first_page);
    }

    #[test]
    fn test_page_zero_clamps_to_first() {
        let shown: Vec<u32> = (1..=7).collect();
        let (slice, info) = paginate(&shown, 0, 3);
        assert_eq!(info.current_page, 1);
        assert_eq!(slice, &[1, 2, 3]);
        assert!(info.is_first_page);
        assert!(!info.is_last_page);
    }

    #[test]
    fn test_middle_page() {
        let shown: Vec<u32> = (1..=7).collect();
        let (slice, info) = paginate(&shown, 2, 3);
        assert_eq!(slice, &[4, 5, 6]);
        assert_eq!(info.offset(), 3);
        assert!(!info.is_first_page && !info.is_last_page);
    }

    #[test]
    fn test_total_pages_formula() {
        for page_size in 1..=13 {
            for len in 0..=40 {
                let expected = std::cmp::max(1, (len + page_size - 1) / page_size);
                assert_eq!(total_pages(len, page_size), expected, "len={} size={}", len, page_size);
            }
        }
    }

    #[test]
    fn test_pages_cover_sequence_exactly_once() {
        let shown: Vec<u32> = (0..50).collect();
        let pages = total_pages(shown.len(), 12);
        let mut seen = Vec::new();
        for page in 1..=pages {
            let (slice, _) = paginate(&shown, page, 12);
            seen.extend_from_slice(slice);
        }
        assert_eq!(seen, shown);
    }

    #[test]
    fn test_zero_page_size_is_treated_as_one() {
        let shown = vec!['a', 'b'];
        let (slice, info) = paginate(&shown, 2, 0);
        assert_eq!(slice, &['b']);
        assert_eq!(info.page_size, 1);
        assert_eq!(info.total_pages, 2);
    }

    #[test]
    fn test_summary() {
        let shown: Vec<u32> = (1..=25).collect();
        let (_, info) = paginate(&shown, 2, 12);
        assert_eq!(info.summary(), "Page 2 of 3 · 25 results");
    }
}
