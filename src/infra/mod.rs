pub mod config;
pub mod fetch;
pub mod inference;
pub mod telemetry;

pub use fetch::{HttpImageFetcher, ImageFetcher};
pub use inference::{FeatureExtractor, HfFeatureExtractor};
