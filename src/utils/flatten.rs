use burn::prelude::*;

// flattens every non-batch dimension into a single feature dimension
#[derive(Module, Clone, Debug, Default)]
pub struct Flatten;

impl Flatten {
    /// Create the module.
    pub fn new() -> Self {
        Self {}
    }
    /// Applies the forward pass on the input tensor.
    ///
    /// # Shapes
    ///
    /// - input: `[batch, d1, ..., dn]`
    /// - output: `[batch, d1 * ... * dn]`
    pub fn forward<B: Backend, const D: usize>(&self, input: Tensor<B, D>) -> Tensor<B, 2> {
        input.flatten(1, D - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    #[test]
    fn keeps_batch_and_merges_the_rest() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 4>::ones([3, 1, 170, 1], &device);
        let y = Flatten::new().forward(x);
        assert_eq!([3, 170], y.dims());

        let x = Tensor::<TestBackend, 3>::ones([2, 4, 5], &device);
        let y = Flatten::new().forward(x);
        assert_eq!([2, 20], y.dims());
    }

    #[test]
    fn preserves_row_major_order() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 3>::from_floats([[[1.0, 2.0], [3.0, 4.0]]], &device);
        let y = Flatten::new().forward(x);
        let values = y.into_data().to_vec::<f32>().unwrap();
        assert_eq!(vec![1.0, 2.0, 3.0, 4.0], values);
    }
}
