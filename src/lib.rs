pub mod app_state;
pub mod cache;
pub mod config;
pub mod error;
pub mod io_struct;
pub mod logging;
pub mod model_id;
pub mod normalize;
pub mod scorer;
pub mod server;
pub mod service;
pub mod store;

pub use app_state::AppState;
pub use cache::ModelCache;
pub use error::{PredictError, PredictResult};
pub use normalize::{FeatureBatch, FeatureVector, normalize_features};
pub use scorer::{LinearClassifier, Scorer, ScorerHandle};
pub use service::predict;
pub use store::{ArtifactStore, FsArtifactStore};
