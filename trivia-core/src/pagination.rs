//! Page slicing over an ordered result set

/// Fixed number of questions per page
pub const QUESTIONS_PER_PAGE: usize = 10;

/// 1-based page number taken from the `page` query parameter.
///
/// Absent or non-numeric values fall back to page 1. Values below 1 are kept
/// and produce an empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNumber(i64);

impl PageNumber {
    pub fn new(page: i64) -> Self {
        Self(page)
    }

    /// Parse a raw query value, defaulting to page 1.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse::<i64>().ok())
            .map(Self)
            .unwrap_or_default()
    }

    pub fn get(&self) -> i64 {
        self.0
    }

    /// Half-open index range `[start, end)` covered by this page, or `None`
    /// if the page lies before the first item.
    fn bounds(&self) -> Option<(usize, usize)> {
        if self.0 < 1 {
            return None;
        }
        let start = usize::try_from(self.0 - 1)
            .ok()?
            .checked_mul(QUESTIONS_PER_PAGE)?;
        Some((start, start.saturating_add(QUESTIONS_PER_PAGE)))
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self(1)
    }
}

/// Slice `items` to the given page.
///
/// Out-of-range pages yield an empty slice rather than an error.
pub fn paginate<T>(page: PageNumber, items: &[T]) -> &[T] {
    match page.bounds() {
        Some((start, end)) if start < items.len() => &items[start..end.min(items.len())],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn first_page_is_first_ten() {
        let all = items(19);
        assert_eq!(paginate(PageNumber::new(1), &all), &all[0..10]);
    }

    #[test]
    fn last_partial_page() {
        let all = items(19);
        let page = paginate(PageNumber::new(2), &all);
        assert_eq!(page.len(), 9);
        assert_eq!(page[0], 10);
    }

    #[test]
    fn page_past_end_is_empty() {
        let all = items(19);
        assert!(paginate(PageNumber::new(3), &all).is_empty());
        assert!(paginate(PageNumber::new(1000), &all).is_empty());
        assert!(paginate(PageNumber::new(i64::MAX), &all).is_empty());
    }

    #[test]
    fn page_below_one_is_empty() {
        let all = items(19);
        assert!(paginate(PageNumber::new(0), &all).is_empty());
        assert!(paginate(PageNumber::new(-1), &all).is_empty());
    }

    #[test]
    fn page_length_matches_formula() {
        for n in [0usize, 1, 9, 10, 11, 20, 35] {
            let all = items(n);
            for p in 1..=5i64 {
                let expected = 10usize.min(n.saturating_sub(10 * (p as usize - 1)));
                let page = paginate(PageNumber::new(p), &all);
                assert_eq!(page.len(), expected, "n={n} page={p}");
                if let Some(first) = page.first() {
                    assert_eq!(*first, 10 * (p as usize - 1));
                }
            }
        }
    }

    #[test]
    fn parse_defaults_to_one() {
        assert_eq!(PageNumber::parse(None), PageNumber::new(1));
        assert_eq!(PageNumber::parse(Some("abc")), PageNumber::new(1));
        assert_eq!(PageNumber::parse(Some("")), PageNumber::new(1));
        assert_eq!(PageNumber::parse(Some("2")), PageNumber::new(2));
        assert_eq!(PageNumber::parse(Some("-3")), PageNumber::new(-3));
    }
}
