/// Nodal DG field with `V` variables on elements of `N` nodes.
///
/// Storage is interleaved by node: the values of all `V` variables at
/// node `i` of element `k` are contiguous at
/// `data[(k * N + i) * V ..][..V]`. This keeps every per-node state
/// access a single cache line in the residual loops.
#[derive(Debug, Clone, PartialEq)]
pub struct NodalField<const V: usize, const N: usize> {
    data: Vec<f64>,
    n_elements: usize,
}

impl<const V: usize, const N: usize> NodalField<V, N> {
    pub fn zeros(n_elements: usize) -> Self {
        Self {
            data: vec![0.0; n_elements * N * V],
            n_elements,
        }
    }

    pub fn n_elements(&self) -> usize {
        self.n_elements
    }

    pub const fn n_nodes() -> usize {
        N
    }

    pub const fn n_vars() -> usize {
        V
    }

    #[inline]
    fn offset(&self, element: usize, node: usize) -> usize {
        debug_assert!(element < self.n_elements && node < N);
        (element * N + node) * V
    }

    /// All variables at one node.
    #[inline]
    pub fn node(&self, element: usize, node: usize) -> [f64; V] {
        let off = self.offset(element, node);
        let mut out = [0.0; V];
        out.copy_from_slice(&self.data[off..off + V]);
        out
    }

    #[inline]
    pub fn set_node(&mut self, element: usize, node: usize, values: [f64; V]) {
        let off = self.offset(element, node);
        self.data[off..off + V].copy_from_slice(&values);
    }

    /// One variable at one node.
    #[inline]
    pub fn get(&self, element: usize, node: usize, var: usize) -> f64 {
        debug_assert!(var < V);
        self.data[self.offset(element, node) + var]
    }

    #[inline]
    pub fn set(&mut self, element: usize, node: usize, var: usize, value: f64) {
        debug_assert!(var < V);
        let off = self.offset(element, node);
        self.data[off + var] = value;
    }

    /// Nodal values of one variable across an element.
    pub fn element_var(&self, element: usize, var: usize) -> [f64; N] {
        let mut out = [0.0; N];
        for (node, o) in out.iter_mut().enumerate() {
            *o = self.get(element, node, var);
        }
        out
    }

    /// `self += alpha * other`.
    pub fn axpy(&mut self, alpha: f64, other: &Self) {
        debug_assert_eq!(self.data.len(), other.data.len());
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a += alpha * b;
        }
    }

    /// `self = alpha * self + beta * other`.
    pub fn combine(&mut self, alpha: f64, beta: f64, other: &Self) {
        debug_assert_eq!(self.data.len(), other.data.len());
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a = alpha * *a + beta * b;
        }
    }

    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0f64, |m, v| m.max(v.abs()))
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }
}
