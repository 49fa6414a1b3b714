use crate::error::{Result, TinyModelError};
use burn::prelude::*;

pub mod flatten;

/// Number of input positions spanned by a dilated kernel.
///
/// `None` for an empty kernel, a zero dilation, or an overflowing span.
pub fn receptive_field(kernel_size: usize, dilation: usize) -> Option<usize> {
    if kernel_size == 0 || dilation == 0 {
        return None;
    }
    dilation.checked_mul(kernel_size - 1)?.checked_add(1)
}

/// Output length of an unpadded convolution along one dimension.
///
/// `floor((len - receptive_field) / stride) + 1`, or `None` when the input is
/// shorter than the receptive field or the parameters are degenerate.
pub fn conv_output_len(
    len: usize,
    kernel_size: usize,
    stride: usize,
    dilation: usize,
) -> Option<usize> {
    conv_output_len_checked(len, kernel_size, stride, dilation).ok()
}

/// Like [`conv_output_len`], but reports why no output length exists.
pub fn conv_output_len_checked(
    len: usize,
    kernel_size: usize,
    stride: usize,
    dilation: usize,
) -> Result<usize> {
    let invalid = TinyModelError::InvalidConvolution {
        kernel_size,
        stride,
        dilation,
    };
    let field = receptive_field(kernel_size, dilation).ok_or(invalid.clone())?;
    if stride == 0 {
        return Err(invalid);
    }
    if len < field {
        return Err(TinyModelError::InputTooShort {
            len,
            receptive_field: field,
        });
    }
    Ok((len - field) / stride + 1)
}

/// Reads the tensor back and reports whether any element is NaN or infinite.
///
/// This synchronizes with the device.
pub fn contains_nan_or_inf<B: Backend, const D: usize>(t: &Tensor<B, D>) -> bool {
    t.to_data().iter::<f64>().any(|v| !v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    #[test]
    fn conv_output_len_matches_classifier_width() {
        // 1250 samples, kernel 17, stride 7, dilation 4
        assert_eq!(receptive_field(17, 4), Some(65));
        assert_eq!(conv_output_len(1250, 17, 7, 4), Some(170));
        assert_eq!(conv_output_len(100, 17, 7, 4), Some(6));
        assert_eq!(conv_output_len(65, 17, 7, 4), Some(1));
        assert_eq!(conv_output_len(64, 17, 7, 4), None);
    }

    #[test]
    fn conv_output_len_without_dilation_or_stride() {
        assert_eq!(conv_output_len(10, 3, 1, 1), Some(8));
        assert_eq!(conv_output_len(1, 1, 1, 1), Some(1));
    }

    #[test]
    fn degenerate_convolution_is_rejected() {
        assert_eq!(receptive_field(0, 4), None);
        assert_eq!(receptive_field(17, 0), None);
        assert_eq!(receptive_field(usize::MAX, 2), None);

        assert_eq!(conv_output_len(1250, 0, 7, 4), None);
        assert_eq!(conv_output_len(1250, 17, 0, 4), None);
        assert_eq!(
            conv_output_len_checked(1250, 0, 7, 4),
            Err(TinyModelError::InvalidConvolution {
                kernel_size: 0,
                stride: 7,
                dilation: 4
            })
        );
        assert_eq!(
            conv_output_len_checked(1250, 17, 0, 4),
            Err(TinyModelError::InvalidConvolution {
                kernel_size: 17,
                stride: 0,
                dilation: 4
            })
        );
        assert_eq!(
            conv_output_len_checked(60, 17, 7, 4),
            Err(TinyModelError::InputTooShort {
                len: 60,
                receptive_field: 65
            })
        );
    }

    #[test]
    fn detects_non_finite_values() {
        let device = Default::default();
        let finite = Tensor::<TestBackend, 2>::from_floats([[1.0, -2.0], [0.0, 3.5]], &device);
        assert!(!contains_nan_or_inf(&finite));

        let nan = Tensor::<TestBackend, 1>::from_floats([0.0, f32::NAN], &device);
        assert!(contains_nan_or_inf(&nan));

        let inf = Tensor::<TestBackend, 1>::from_floats([f32::NEG_INFINITY, 1.0], &device);
        assert!(contains_nan_or_inf(&inf));
    }
}
