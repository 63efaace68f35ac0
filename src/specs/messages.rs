use serde::Serialize;
use serde_json::Value;

use super::{AlgorithmParams, Dataset};

/// Body of `POST /train`: `{algorithm, params, trainingData: {X, y}}`.
///
/// Only the request builder creates one; it lives for a single call.
#[derive(Debug, Serialize)]
pub struct TrainingRequest<'a> {
    #[serde(flatten)]
    params: AlgorithmParams,
    #[serde(rename = "trainingData")]
    training_data: &'a Dataset,
}

impl<'a> TrainingRequest<'a> {
    pub(crate) fn new(params: AlgorithmParams, training_data: &'a Dataset) -> Self {
        Self {
            params,
            training_data,
        }
    }

    pub fn params(&self) -> &AlgorithmParams {
        &self.params
    }

    pub fn training_data(&self) -> &Dataset {
        self.training_data
    }
}

/// The client-held record of a trained model.
///
/// The service keeps no state between calls, so this is sent back verbatim
/// with every prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainedModelDescriptor {
    #[serde(flatten)]
    params: AlgorithmParams,
    model_details: Value,
    #[serde(skip)]
    num_features: usize,
}

impl TrainedModelDescriptor {
    /// Pairs the parameters a model was trained with and the details the
    /// service returned for it.
    pub fn new(params: AlgorithmParams, model_details: Value, num_features: usize) -> Self {
        Self {
            params,
            model_details,
            num_features,
        }
    }

    pub fn params(&self) -> &AlgorithmParams {
        &self.params
    }

    pub fn model_details(&self) -> &Value {
        &self.model_details
    }

    /// Width of the rows the model was trained on.
    pub fn num_features(&self) -> usize {
        self.num_features
    }
}

/// Body of `POST /predict`: `{trainedModel, predictionData}`.
#[derive(Debug, Serialize)]
pub struct PredictionRequest<'a> {
    #[serde(rename = "trainedModel")]
    trained_model: &'a TrainedModelDescriptor,
    #[serde(rename = "predictionData")]
    prediction_data: Vec<f64>,
}

impl<'a> PredictionRequest<'a> {
    pub(crate) fn new(trained_model: &'a TrainedModelDescriptor, prediction_data: Vec<f64>) -> Self {
        Self {
            trained_model,
            prediction_data,
        }
    }

    pub fn trained_model(&self) -> &TrainedModelDescriptor {
        self.trained_model
    }

    pub fn prediction_data(&self) -> &[f64] {
        &self.prediction_data
    }
}
