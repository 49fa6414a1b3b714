use burn::prelude::*;
use burn_tiny_model::prelude::TinyModelConfig;
use std::path::{Path, PathBuf};

pub const HELP: &str = "\
Tiny Model Smoke Test

Builds the signal classifier once and evaluates it on a random input of the
expected shape [batch, 1, 1250, 1], reporting the output shapes.

USAGE:
    tiny-model-smoke [OPTIONS]

FLAGS:
    -h, --help                  Show this help message and exit
    -t, --training              Evaluate on the autodiff backend, with dropout active
    -v, --verbose               Log at debug level

OPTIONS:
    -b, --batch-size <N>        Number of signals in the random batch [default: 1]
    -m, --model-config <PATH>   Load the model configuration from this JSON file
                                instead of using the built-in architecture
    -s, --save-config <PATH>    Save the effective model configuration as JSON
";

#[derive(Debug)]
pub struct AppArgs {
    pub training: bool,
    pub verbose: bool,
    pub batch_size: usize,
    pub model_config: Option<PathBuf>,
    pub save_config: Option<PathBuf>,
}

impl AppArgs {
    pub fn parse() -> Result<Self, pico_args::Error> {
        let mut pargs = pico_args::Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            println!("{}", HELP);
            std::process::exit(0);
        }

        let args = AppArgs {
            batch_size: pargs
                .opt_value_from_str(["-b", "--batch-size"])?
                .unwrap_or(1),
            model_config: pargs.opt_value_from_os_str(["-m", "--model-config"], parse_path)?,
            save_config: pargs.opt_value_from_os_str(["-s", "--save-config"], parse_path)?,
            // must parse flags after values
            training: pargs.contains(["-t", "--training"]),
            verbose: pargs.contains(["-v", "--verbose"]),
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            return Err(pico_args::Error::ArgumentParsingFailed {
                cause: format!("unused arguments: {remaining:?}"),
            });
        }

        Ok(args)
    }

    pub fn load_model_config(&self) -> Result<TinyModelConfig, std::io::Error> {
        match &self.model_config {
            Some(path) => load_model_config(path),
            None => Ok(TinyModelConfig::new()),
        }
    }

    pub fn save_model_config(&self, model_config: &TinyModelConfig) -> Result<(), std::io::Error> {
        match &self.save_config {
            Some(path) => save_model_config(path, model_config),
            None => Ok(()),
        }
    }
}

fn parse_path(s: &std::ffi::OsStr) -> Result<PathBuf, &'static str> {
    Ok(s.into())
}

pub fn load_model_config(path: &Path) -> Result<TinyModelConfig, std::io::Error> {
    log::info!("Loading model config from {path:?}");
    TinyModelConfig::load(path).map_err(|err| std::io::Error::other(format!("{err:?}")))
}

pub fn save_model_config(path: &Path, model_config: &TinyModelConfig) -> Result<(), std::io::Error> {
    log::info!("Saving model config into {path:?}");
    model_config.save(path)
}
