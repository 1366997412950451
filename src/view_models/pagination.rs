use serde::Serialize;
use std::{num::NonZeroUsize, ops::Range};

/// The visible slice of a filtered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub page: usize,
    pub total_pages: usize,
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range()]
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Pages are 1-based; with no pages at all the page stays at 1.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    if total_pages == 0 {
        1
    } else {
        page.clamp(1, total_pages)
    }
}

pub fn paginate(len: usize, page: usize, page_size: NonZeroUsize) -> PageWindow {
    let total_pages = total_pages(len, page_size);
    let page = clamp_page(page, total_pages);
    let start = ((page - 1) * page_size.get()).min(len);
    let end = (page * page_size.get()).min(len);

    PageWindow {
        page,
        total_pages,
        start,
        end,
    }
}
