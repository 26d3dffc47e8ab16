use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [25, 50, 100, 200];

/// Запрос страницы (страницы нумеруются с 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
        }
    }

    pub fn total_pages(&self, total_count: usize) -> usize {
        total_count.div_ceil(self.page_size.max(1))
    }

    /// Номер страницы, прижатый к последней существующей
    pub fn clamped_page(&self, total_count: usize) -> usize {
        let pages = self.total_pages(total_count);
        if pages == 0 {
            0
        } else {
            self.page.min(pages - 1)
        }
    }

    /// Вырезать текущую страницу из списка
    pub fn slice<T>(&self, items: Vec<T>) -> Page<T> {
        let total_count = items.len();
        let size = self.page_size.max(1);
        let page = self.clamped_page(total_count);
        let items: Vec<T> = items.into_iter().skip(page * size).take(size).collect();
        Page {
            items,
            page,
            page_size: size,
            total_count,
            total_pages: self.total_pages(total_count),
        }
    }
}

/// Страница результата
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_middle_page() {
        let page = PageRequest::new(1, 2).slice((1..=5).collect::<Vec<_>>());
        assert_eq!(page.items, vec![3, 4]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_count, 5);
    }

    #[test]
    fn test_page_past_end_is_clamped() {
        let page = PageRequest::new(10, 2).slice((1..=5).collect::<Vec<_>>());
        assert_eq!(page.page, 2);
        assert_eq!(page.items, vec![5]);
    }

    #[test]
    fn test_zero_page_size_uses_default_and_empty_list() {
        let request = PageRequest::new(3, 0);
        assert_eq!(request.page_size, DEFAULT_PAGE_SIZE);
        let page = request.slice(Vec::<u8>::new());
        assert_eq!(page.page, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }
}
