/// An ordered collection of pages or images to impose
///
/// Only the count and the intrinsic size of each item matter for layout;
/// rendering the content is the sink's business.
pub trait PageSource {
    /// Number of items in the collection
    fn page_count(&self) -> usize;

    /// Intrinsic (width, height) in points of the item at `index`
    fn page_dimensions(&self, index: usize) -> (f32, f32);
}

impl PageSource for [(f32, f32)] {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page_dimensions(&self, index: usize) -> (f32, f32) {
        self.get(index)
            .copied()
            .unwrap_or(crate::constants::DEFAULT_PAGE_DIMENSIONS)
    }
}

impl PageSource for Vec<(f32, f32)> {
    fn page_count(&self) -> usize {
        self.as_slice().page_count()
    }

    fn page_dimensions(&self, index: usize) -> (f32, f32) {
        self.as_slice().page_dimensions(index)
    }
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn page_dimensions(&self, index: usize) -> (f32, f32) {
        (**self).page_dimensions(index)
    }
}
