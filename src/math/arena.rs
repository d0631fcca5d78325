//! Reusable pre-allocated buffers for the propagation hot paths.

/// Two equally sized state arrays with a source/destination role that flips in O(1).
///
/// Propagation reads the source, writes the destination, then calls [`DoubleBuffer::flip`],
/// so no step ever allocates.
#[derive(Debug, Clone, Default)]
pub struct DoubleBuffer {
    buf0: Vec<f64>,
    buf1: Vec<f64>,
    buf0_is_src: bool,
}

impl DoubleBuffer {
    /// Creates both buffers with length `n`, filled with `value`.
    pub fn new(n: usize, value: f64) -> Self {
        Self {
            buf0: vec![value; n],
            buf1: vec![value; n],
            buf0_is_src: true,
        }
    }

    /// Length of each buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf0.is_empty()
    }

    #[inline]
    pub fn src(&self) -> &[f64] {
        if self.buf0_is_src { &self.buf0 } else { &self.buf1 }
    }

    #[inline]
    pub fn src_mut(&mut self) -> &mut [f64] {
        if self.buf0_is_src {
            &mut self.buf0
        } else {
            &mut self.buf1
        }
    }

    #[inline]
    pub fn dest(&self) -> &[f64] {
        if self.buf0_is_src { &self.buf1 } else { &self.buf0 }
    }

    #[inline]
    pub fn dest_mut(&mut self) -> &mut [f64] {
        if self.buf0_is_src {
            &mut self.buf1
        } else {
            &mut self.buf0
        }
    }

    /// Borrows the source immutably and the destination mutably at the same time.
    #[inline]
    pub fn split(&mut self) -> (&[f64], &mut [f64]) {
        if self.buf0_is_src {
            (self.buf0.as_slice(), self.buf1.as_mut_slice())
        } else {
            (self.buf1.as_slice(), self.buf0.as_mut_slice())
        }
    }

    /// Exchanges the source and destination roles.
    #[inline]
    pub fn flip(&mut self) {
        self.buf0_is_src = !self.buf0_is_src;
    }

    /// Resets both buffers to `value`, keeping their allocation.
    pub fn fill(&mut self, value: f64) {
        self.buf0.fill(value);
        self.buf1.fill(value);
        self.buf0_is_src = true;
    }

    /// Consumes the buffer pair and returns the current source.
    pub fn into_src(self) -> Vec<f64> {
        if self.buf0_is_src { self.buf0 } else { self.buf1 }
    }
}
