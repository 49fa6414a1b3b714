use burn::nn::{Dropout, DropoutConfig, Linear, LinearConfig, Relu};
use burn::prelude::*;

/// One step of the [`Classifier`] pipeline.
#[derive(Module, Debug)]
pub enum ClassifierLayer<B: Backend> {
    /// Only active when the backend tracks gradients.
    Dropout(Dropout),
    Linear(Linear<B>),
    Relu(Relu),
}

impl<B: Backend> ClassifierLayer<B> {
    /// # Shapes
    ///   - Input [batch, d_input]
    ///   - Output [batch, d_output]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        match self {
            ClassifierLayer::Dropout(dropout) => dropout.forward(x),
            ClassifierLayer::Linear(linear) => linear.forward(x),
            ClassifierLayer::Relu(relu) => relu.forward(x),
        }
    }
}

/// Fully-connected head applied in order over [`Self::layers`].
#[derive(Module, Debug)]
pub struct Classifier<B: Backend> {
    /// # Shape
    /// [5]
    pub layers: Vec<ClassifierLayer<B>>,
}

#[derive(Config, Debug)]
pub struct ClassifierConfig {
    /// Width of the flattened features coming from the convolution stage.
    #[config(default = 170)]
    pub d_features: usize,

    #[config(default = 40)]
    pub d_hidden: usize,

    #[config(default = 2)]
    pub n_classes: usize,

    /// Dropout applied to the features before the first projection.
    #[config(default = 0.29)]
    pub input_dropout: f64,

    /// Dropout applied to the hidden activations before the last projection.
    #[config(default = 0.23)]
    pub hidden_dropout: f64,
}

impl ClassifierConfig {
    /// Returns the initialized model.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Classifier<B> {
        let layers = vec![
            ClassifierLayer::Dropout(DropoutConfig::new(self.input_dropout).init()),
            ClassifierLayer::Linear(
                LinearConfig::new(self.d_features, self.d_hidden)
                    .with_bias(true)
                    .init(device),
            ),
            ClassifierLayer::Relu(Relu::new()),
            ClassifierLayer::Dropout(DropoutConfig::new(self.hidden_dropout).init()),
            ClassifierLayer::Linear(
                LinearConfig::new(self.d_hidden, self.n_classes)
                    .with_bias(true)
                    .init(device),
            ),
        ];
        Classifier { layers }
    }
}

impl<B: Backend> Classifier<B> {
    /// # Shapes
    ///   - Input [batch, d_features]
    ///   - Output [batch, n_classes]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        self.layers.iter().fold(x, |x, layer| layer.forward(x))
    }

    /// Input width of the first projection.
    pub fn d_features(&self) -> Option<usize> {
        self.layers.iter().find_map(|layer| match layer {
            ClassifierLayer::Linear(linear) => Some(linear.weight.dims()[0]),
            _ => None,
        })
    }
}
