use std::ops::Range;

pub const PAGE_SIZE: usize = 10;

/// Halaman aktif (mulai dari 1) atas sejumlah baris terfilter.
/// Halaman tidak saling tumpang tindih; halaman terakhir berisi sisanya.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Paginator {
    page: usize,
    total: usize,
    count: usize,
}

pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// Pemetaan halaman -> rentang indeks baris; elemen ke-i adalah halaman i+1.
pub fn page_map(count: usize) -> Vec<Range<usize>> {
    (0..count)
        .step_by(PAGE_SIZE)
        .map(|start| start..(start + PAGE_SIZE).min(count))
        .collect()
}

impl Paginator {
    pub fn new(count: usize) -> Self {
        let total = total_pages(count);
        Self {
            page: if total > 0 { 1 } else { 0 },
            total,
            count,
        }
    }

    /// Hitung ulang untuk jumlah baris baru dan kembali ke halaman 1.
    pub fn reset(&mut self, count: usize) {
        *self = Self::new(count);
    }

    /// 0 kalau tidak ada halaman.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn first(&mut self) -> bool {
        self.go_to(1)
    }

    pub fn last(&mut self) -> bool {
        self.go_to(self.total)
    }

    /// Pindah ke halaman `page`; diabaikan kalau di luar `[1, total]`.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page == 0 || page > self.total || page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    /// Rentang indeks (ke dalam baris terfilter) untuk halaman aktif.
    pub fn range(&self) -> Range<usize> {
        if self.page == 0 {
            return 0..0;
        }
        let start = (self.page - 1) * PAGE_SIZE;
        start..(start + PAGE_SIZE).min(self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_active_page() {
        let p = Paginator::new(0);
        assert_eq!((p.page(), p.total()), (0, 0));
        assert_eq!(p.range(), 0..0);
        assert!(page_map(0).is_empty());
        assert!(!p.has_next() && !p.has_previous());
    }

    #[test]
    fn pages_are_disjoint_and_cover_every_row() {
        for count in [1, 9, 10, 11, 20, 25, 101] {
            let pages = page_map(count);
            assert_eq!(pages.len(), total_pages(count));
            assert_eq!(pages.iter().map(|r| r.len()).sum::<usize>(), count);
            for pair in pages.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
            }
            assert!(pages.iter().all(|r| r.len() <= PAGE_SIZE));
        }
        assert_eq!(page_map(25).last(), Some(&(20..25)));
    }

    #[test]
    fn navigation_stops_at_the_edges() {
        let mut p = Paginator::new(25);
        assert_eq!(p.total(), 3);
        assert!(!p.previous());
        assert_eq!(p.page(), 1);

        assert!(p.next());
        assert_eq!(p.range(), 10..20);
        assert!(p.last());
        assert_eq!(p.range(), 20..25);
        assert!(!p.next());
        assert_eq!(p.page(), 3);

        assert!(p.first());
        assert!(!p.first());
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn reset_returns_to_first_page() {
        let mut p = Paginator::new(40);
        p.last();
        p.reset(5);
        assert_eq!((p.page(), p.total()), (1, 1));
        assert!(!p.go_to(2));
    }
}
