use burn::prelude::*;
use burn::tensor::Distribution;
use burn_tiny_model::prelude::*;
use log::LevelFilter;
use simplelog::{Config as LogConfig, SimpleLogger};
use std::error::Error;

pub mod backend;
pub mod cli;

use backend::{MainAutoBackend, MainBackend, MainDevice};
use cli::AppArgs;

/// Builds the model and pushes one random batch through both entry points.
pub fn launch<B: Backend + MainDevice>(
    model_config: &TinyModelConfig,
    batch_size: usize,
) -> Result<(), TinyModelError> {
    let device = B::main_device();
    let model: TinyModel<B> = model_config.init(&device);
    log::info!("Initialized model with {} parameters", model.num_params());

    let input_len = model_config.features.input_len;
    let x = Tensor::<B, 4>::random(
        [batch_size, 1, input_len, 1],
        Distribution::Normal(0., 1.),
        &device,
    );

    model.check_input(&x)?;
    let features = model.features(x.clone());
    log::info!("features: {:?}", features.dims());

    let logits = model.try_forward(x)?;
    log::info!("logits: {:?}", logits.dims());
    log::debug!("{logits}");

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let app_args = AppArgs::parse()?;

    let level = if app_args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::init(level, LogConfig::default())?;

    let model_config = app_args.load_model_config()?;
    app_args.save_model_config(&model_config)?;

    if app_args.training {
        log::info!("Evaluating in training mode");
        launch::<MainAutoBackend>(&model_config, app_args.batch_size)?;
    } else {
        log::info!("Evaluating in inference mode");
        launch::<MainBackend>(&model_config, app_args.batch_size)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_signal_is_reported_not_panicked() {
        let model_config =
            TinyModelConfig::new().with_features(FeatureExtractorConfig::new().with_input_len(60));
        assert_eq!(
            Err(TinyModelError::InputTooShort {
                len: 60,
                receptive_field: 65
            }),
            launch::<MainBackend>(&model_config, 1)
        );
    }

    #[test]
    fn default_config_runs() {
        assert_eq!(Ok(()), launch::<MainBackend>(&TinyModelConfig::new(), 2));
    }
}
