//! Wire-level shapes exchanged with the training service.

mod dataset;
mod messages;
mod params;

pub use dataset::Dataset;
pub use messages::{PredictionRequest, TrainedModelDescriptor, TrainingRequest};
pub use params::{
    AlgorithmParams, CostFunctionSpec, ForestParams, LinearRegressionParams, OptimizerSpec,
    TreeParams,
};
