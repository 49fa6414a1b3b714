mod classifier;
mod features;
mod model;

pub use classifier::{Classifier, ClassifierConfig, ClassifierLayer};
pub use features::{FeatureExtractor, FeatureExtractorConfig};
pub use model::{TinyModel, TinyModelConfig};
