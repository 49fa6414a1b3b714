//! Binary classifier over a single-channel signal of 1250 samples.
//!
//! The network is a dilated strided convolution acting as a feature extractor,
//! followed by a small fully-connected head:
//!
//! ```ignore
//! [N, 1, 1250, 1] ─conv(17×1, stride 7, dilation 4)→ relu → flatten → [N, 170]
//! [N, 170] ─dropout(0.29)→ linear → relu → dropout(0.23) → linear → [N, 2]
//! ```
//!
//! Dropout is only active when the model lives on an autodiff backend. Calling
//! [`AutodiffModule::valid`](burn::module::AutodiffModule::valid) yields the
//! evaluation model, for which every forward pass is deterministic.

use crate::error::TinyModelError;
use crate::tiny_model::*;
use crate::utils::{contains_nan_or_inf, conv_output_len_checked};
use burn::prelude::*;
use burn::tensor::activation::softmax;

#[derive(Module, Debug)]
pub struct TinyModel<B: Backend> {
    pub conv1: FeatureExtractor<B>,
    pub fcn: Classifier<B>,
}

#[derive(Config, Debug)]
pub struct TinyModelConfig {
    #[config(default = "FeatureExtractorConfig::new()")]
    pub features: FeatureExtractorConfig,

    #[config(default = "ClassifierConfig::new()")]
    pub classifier: ClassifierConfig,
}

impl TinyModelConfig {
    /// Returns the initialized model.
    ///
    /// The classifier width is taken as declared; a disagreement with the
    /// convolution output is only logged; it surfaces as a shape mismatch on the
    /// first forward pass.
    pub fn init<B: Backend>(&self, device: &B::Device) -> TinyModel<B> {
        match self.validate() {
            Ok(()) => log::debug!(
                "tiny model: {} samples -> {} features -> {} hidden -> {} classes",
                self.features.input_len,
                self.classifier.d_features,
                self.classifier.d_hidden,
                self.classifier.n_classes,
            ),
            Err(err) => log::warn!("tiny model config: {err}"),
        }

        TinyModel {
            conv1: self.features.init(device),
            fcn: self.classifier.init(device),
        }
    }

    /// Flattened width produced by the convolution stage for `input_len` samples.
    pub fn feature_width(&self) -> Option<usize> {
        self.features.output_width()
    }

    /// Checks that the convolution output matches the classifier input width.
    pub fn validate(&self) -> crate::error::Result<()> {
        let features = &self.features;
        let found = conv_output_len_checked(
            features.input_len,
            features.kernel_size,
            features.stride,
            features.dilation,
        )?;
        let expected = self.classifier.d_features;
        if found != expected {
            return Err(TinyModelError::FeatureWidthMismatch { expected, found });
        }
        Ok(())
    }
}

impl<B: Backend> TinyModel<B> {
    /// Builds the model with its fixed architecture and freshly initialized parameters.
    pub fn new(device: &B::Device) -> Self {
        TinyModelConfig::new().init(device)
    }

    /// # Shapes
    ///   - Input [batch, 1, 1250, 1]
    ///   - Output [batch, 2]
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        let [batch, _channels, _height, _width] = x.dims();

        let x = self.features(x);
        let x = self.fcn.forward(x);
        debug_assert_eq!(batch, x.dims()[0]);

        x
    }

    /// Output of the convolution stage alone.
    ///
    /// # Shapes
    ///   - Input [batch, 1, 1250, 1]
    ///   - Output [batch, 170]
    pub fn features(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        self.conv1.forward(x)
    }

    /// Class probabilities.
    ///
    /// # Shapes
    ///   - Input [batch, 1, 1250, 1]
    ///   - Output [batch, 2]
    pub fn probabilities(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        softmax(self.forward(x), 1)
    }

    /// Index of the highest-scoring class.
    ///
    /// # Shapes
    ///   - Input [batch, 1, 1250, 1]
    ///   - Output [batch]
    pub fn predict(&self, x: Tensor<B, 4>) -> Tensor<B, 1, Int> {
        self.forward(x).argmax(1).flatten(0, 1)
    }

    /// Verifies that `x` would flow through both stages without a shape mismatch.
    pub fn check_input(&self, x: &Tensor<B, 4>) -> crate::error::Result<()> {
        let [_batch, channels, height, width] = x.dims();
        let [_out_channels, in_channels, kernel_h, _kernel_w] = self.conv1.conv.weight.dims();
        if channels != in_channels {
            return Err(TinyModelError::InputChannels {
                expected: in_channels,
                found: channels,
            });
        }

        let [stride, _] = self.conv1.conv.stride;
        let [dilation, _] = self.conv1.conv.dilation;
        let found = conv_output_len_checked(height, kernel_h, stride, dilation)? * width;

        match self.fcn.d_features() {
            Some(expected) if expected != found => {
                Err(TinyModelError::FeatureWidthMismatch { expected, found })
            }
            _ => Ok(()),
        }
    }

    /// [`Self::forward`] guarded by [`Self::check_input`], rejecting non-finite logits.
    pub fn try_forward(&self, x: Tensor<B, 4>) -> crate::error::Result<Tensor<B, 2>> {
        self.check_input(&x)?;
        let logits = self.forward(x);
        if contains_nan_or_inf(&logits) {
            return Err(TinyModelError::NonFiniteOutput);
        }
        Ok(logits)
    }
}
