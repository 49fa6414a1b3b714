use thiserror::Error;

/// Errors reported by the checked entry points ([`TinyModel::check_input`],
/// [`TinyModel::try_forward`] and [`TinyModelConfig::validate`]).
///
/// The unchecked `forward`/`features` paths never return these; they let burn
/// panic on a shape mismatch instead.
///
/// [`TinyModel::check_input`]: crate::tiny_model::TinyModel::check_input
/// [`TinyModel::try_forward`]: crate::tiny_model::TinyModel::try_forward
/// [`TinyModelConfig::validate`]: crate::tiny_model::TinyModelConfig::validate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TinyModelError {
    #[error("expected {expected} input channel(s), found {found}")]
    InputChannels { expected: usize, found: usize },

    #[error(
        "degenerate convolution: kernel size {kernel_size}, stride {stride}, dilation {dilation}"
    )]
    InvalidConvolution {
        kernel_size: usize,
        stride: usize,
        dilation: usize,
    },

    #[error("signal length {len} is shorter than the convolution receptive field {receptive_field}")]
    InputTooShort { len: usize, receptive_field: usize },

    #[error("flattened feature width {found} does not match the classifier input width {expected}")]
    FeatureWidthMismatch { expected: usize, found: usize },

    #[error("the model produced NaN or infinite logits")]
    NonFiniteOutput,
}

pub type Result<T> = std::result::Result<T, TinyModelError>;
