use std::collections::HashMap;

use log::debug;

use super::{
    error::{RequestError, Result},
    resolved::Resolved,
};
use crate::{
    dataset,
    schema::{Algorithm, COST_FUNCTION_KEY, FieldKind, FieldSpec, OPTIMIZER_KEY, registry},
    specs::{
        CostFunctionSpec, Dataset, OptimizerSpec, PredictionRequest, TrainedModelDescriptor,
        TrainingRequest,
    },
};

/// Raw text values as the operator typed them, keyed by field key.
pub type RawFields = HashMap<String, String>;

/// Turns operator selections into requests the training service accepts.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestBuilder;

impl RequestBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Builds the body of a training call.
    ///
    /// Every field the algorithm's schema requires is read from `raw` and
    /// coerced. For algorithms that need a solver, the cost function and
    /// optimizer named under `costFunction` / `optimizer` are resolved the same
    /// way. The dataset's feature count is injected where the parameters need it.
    ///
    /// # Arguments
    /// * `algorithm` - The selected algorithm.
    /// * `raw` - Raw field values, including the solver selections.
    /// * `dataset` - The parsed training table. Borrowed, never modified.
    ///
    /// # Errors
    /// The first missing or invalid field, or an unknown solver name.
    pub fn build_training_request<'a>(
        &self,
        algorithm: Algorithm,
        raw: &RawFields,
        dataset: &'a Dataset,
    ) -> Result<TrainingRequest<'a>> {
        let schema = registry::algorithm(algorithm);

        let mut resolved = Resolved::with_num_features(dataset.num_features());
        self.resolve_fields(schema.fields, raw, &mut resolved)?;

        if schema.needs_solver {
            resolved.set_cost_function(self.resolve_cost_function(raw)?);
            resolved.set_optimizer(self.resolve_optimizer(raw)?);
        }

        let params = (schema.assemble)(&resolved)?;

        debug!(
            algorithm = algorithm.name(),
            samples = dataset.len(),
            num_features = dataset.num_features();
            "built training request"
        );

        Ok(TrainingRequest::new(params, dataset))
    }

    /// Builds the body of a prediction call.
    ///
    /// The vector's width is not checked against the model here, see
    /// [`check_prediction_width`](Self::check_prediction_width).
    ///
    /// # Arguments
    /// * `trained_model` - The model held from the last successful training.
    /// * `raw_vector` - Comma separated feature values.
    ///
    /// # Errors
    /// `InvalidPredictionInput` for an empty or non-numeric vector,
    /// `NoTrainedModel` if no model is held.
    pub fn build_prediction_request<'a>(
        &self,
        trained_model: Option<&'a TrainedModelDescriptor>,
        raw_vector: &str,
    ) -> Result<PredictionRequest<'a>> {
        let data = parse_vector(raw_vector)?;
        let trained_model = trained_model.ok_or(RequestError::NoTrainedModel)?;
        Ok(PredictionRequest::new(trained_model, data))
    }

    /// Rejects a prediction whose width differs from the training rows'.
    ///
    /// # Errors
    /// `PredictionWidthMismatch` when the widths differ.
    pub fn check_prediction_width(&self, request: &PredictionRequest<'_>) -> Result<()> {
        let expected = request.trained_model().num_features();
        let got = request.prediction_data().len();
        if expected != got {
            return Err(RequestError::PredictionWidthMismatch { expected, got });
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------

    fn resolve_cost_function(&self, raw: &RawFields) -> Result<CostFunctionSpec> {
        let name = self.selected(raw, COST_FUNCTION_KEY)?;
        let schema = registry::cost_function_by_name(name)?;

        let mut resolved = Resolved::default();
        self.resolve_fields(schema.fields, raw, &mut resolved)?;
        (schema.assemble)(&resolved)
    }

    fn resolve_optimizer(&self, raw: &RawFields) -> Result<OptimizerSpec> {
        let name = self.selected(raw, OPTIMIZER_KEY)?;
        let schema = registry::optimizer_by_name(name)?;

        let mut resolved = Resolved::default();
        self.resolve_fields(schema.fields, raw, &mut resolved)?;
        (schema.assemble)(&resolved)
    }

    fn resolve_fields(
        &self,
        fields: &[FieldSpec],
        raw: &RawFields,
        resolved: &mut Resolved,
    ) -> Result<()> {
        for field in fields {
            let value = self.selected(raw, field.key)?;
            resolved.insert(field.name, self.coerce(field, value)?);
        }
        Ok(())
    }

    /// Returns the trimmed raw value under `key`, treating blank as missing.
    fn selected<'r>(&self, raw: &'r RawFields, key: &'static str) -> Result<&'r str> {
        raw.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .ok_or(RequestError::MissingParameter { field: key })
    }

    fn coerce(&self, field: &FieldSpec, value: &str) -> Result<f64> {
        let invalid = || RequestError::InvalidParameter {
            field: field.key,
            value: value.to_string(),
        };

        let parsed = dataset::parse_number(value).ok_or_else(invalid)?;
        let parsed = match field.kind {
            FieldKind::Integer => parsed.trunc(),
            FieldKind::Number => parsed,
        };

        if !field.bound.contains(parsed) {
            return Err(invalid());
        }
        Ok(parsed)
    }
}

/// Parses a comma separated feature vector.
///
/// # Errors
/// `InvalidPredictionInput` if the text is blank or any token is not a finite number.
pub fn parse_vector(raw: &str) -> Result<Vec<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RequestError::InvalidPredictionInput {
            input: raw.to_string(),
        });
    }

    raw.split(',')
        .map(|token| {
            dataset::parse_number(token).ok_or_else(|| RequestError::InvalidPredictionInput {
                input: token.trim().to_string(),
            })
        })
        .collect()
}
