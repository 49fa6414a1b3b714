use crate::utils::conv_output_len;
use crate::utils::flatten::Flatten;
use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::{PaddingConfig2d, Relu};
use burn::prelude::*;

/// Convolutional front-end: `conv → relu → flatten`.
#[derive(Module, Debug)]
pub struct FeatureExtractor<B: Backend> {
    pub conv: Conv2d<B>,
    pub activation: Relu,
    pub flatten: Flatten,
}

#[derive(Config, Debug)]
pub struct FeatureExtractorConfig {
    /// Length of the input signal, laid out along the height dimension.
    #[config(default = 1250)]
    pub input_len: usize,

    /// Kernel height. The kernel width is always 1.
    #[config(default = 17)]
    pub kernel_size: usize,

    /// Vertical stride. The horizontal stride is always 1.
    #[config(default = 7)]
    pub stride: usize,

    /// Spacing between kernel taps along the signal.
    #[config(default = 4)]
    pub dilation: usize,
}

impl FeatureExtractorConfig {
    /// Returns the initialized model.
    pub fn init<B: Backend>(&self, device: &B::Device) -> FeatureExtractor<B> {
        let conv = Conv2dConfig::new([1, 1], [self.kernel_size, 1])
            .with_stride([self.stride, 1])
            .with_dilation([self.dilation, 1])
            .with_padding(PaddingConfig2d::Valid)
            .with_bias(true)
            .init(device);

        FeatureExtractor {
            conv,
            activation: Relu::new(),
            flatten: Flatten::new(),
        }
    }

    /// Flattened width produced for a `[batch, 1, input_len, 1]` input.
    ///
    /// `None` if `input_len` is shorter than the dilated kernel.
    pub fn output_width(&self) -> Option<usize> {
        self.output_width_for(self.input_len, 1)
    }

    /// Flattened width produced for a `[batch, 1, height, width]` input.
    pub fn output_width_for(&self, height: usize, width: usize) -> Option<usize> {
        conv_output_len(height, self.kernel_size, self.stride, self.dilation).map(|h| h * width)
    }
}

impl<B: Backend> FeatureExtractor<B> {
    /// # Shapes
    ///   - Input [batch, 1, input_len, 1]
    ///   - Output [batch, d_features]
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        let [batch, _channels, _height, _width] = x.dims();

        let x = self.conv.forward(x);
        let x = self.activation.forward(x);
        let x = self.flatten.forward(x);
        debug_assert_eq!(batch, x.dims()[0]);

        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    #[test]
    fn default_output_width() {
        let config = FeatureExtractorConfig::new();
        assert_eq!(Some(170), config.output_width());
        assert_eq!(Some(340), config.output_width_for(1250, 2));
        assert_eq!(None, config.output_width_for(60, 1));
    }

    #[test]
    fn conv_weight_shape() {
        let device = Default::default();
        let extractor = FeatureExtractorConfig::new().init::<TestBackend>(&device);
        assert_eq!([1, 1, 17, 1], extractor.conv.weight.dims());
        let bias = extractor.conv.bias.as_ref().expect("conv has a bias");
        assert_eq!([1], bias.dims());
    }

    #[test]
    fn output_is_non_negative() {
        let device = Default::default();
        let extractor = FeatureExtractorConfig::new().init::<TestBackend>(&device);
        let x = Tensor::<TestBackend, 4>::random(
            [2, 1, 1250, 1],
            burn::tensor::Distribution::Normal(0., 1.),
            &device,
        );
        let y = extractor.forward(x);
        assert_eq!([2, 170], y.dims());

        let min = y.min().into_scalar();
        assert!(min >= 0.0);
    }
}
