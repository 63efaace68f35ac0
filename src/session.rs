use std::path::Path;

use log::{debug, info, warn};
use parking_lot::Mutex;
use serde_json::Value;

use crate::{
    client::Backend,
    config::ClientConfig,
    dataset,
    error::{Action, Result, SessionError},
    request::{RequestBuilder, RequestError},
    schema::{
        Algorithm, AlgorithmSchema, COST_FUNCTION_KEY, CostFunctionSchema, OPTIMIZER_KEY,
        OptimizerSchema, registry,
    },
    selection::Selection,
    specs::TrainedModelDescriptor,
};

const SUCCESS_STATUS: &str = "success";

/// Where a session is in its train/predict lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Training,
    TrainFailed,
    Trained,
    Predicting,
    PredictFailed,
    Predicted,
}

#[derive(Debug, Default)]
struct Inner {
    state: SessionState,
    selection: Selection,
    trained: Option<TrainedModelDescriptor>,
    training: bool,
    predicting: bool,
}

/// Drives train and predict calls against a [`Backend`] and holds the one
/// trained model a session may have.
///
/// Every method takes `&self`, so a session can be shared between tasks. The
/// held model is cleared as soon as a training starts, which means a
/// prediction issued while training is pending fails with `NoTrainedModel`
/// instead of running against the previous model.
pub struct TrainingSession<B> {
    backend: B,
    builder: RequestBuilder,
    check_prediction_width: bool,
    inner: Mutex<Inner>,
}

impl<B: Backend + Sync> TrainingSession<B> {
    /// Creates a new idle `TrainingSession`.
    ///
    /// # Arguments
    /// * `backend` - The training service to talk to.
    /// * `config` - The client configuration.
    ///
    /// # Returns
    /// A session with an empty selection and no trained model.
    pub fn new(backend: B, config: &ClientConfig) -> Self {
        Self {
            backend,
            builder: RequestBuilder::new(),
            check_prediction_width: config.check_prediction_width,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().state
    }

    /// A copy of the model held from the last successful training, if any.
    pub fn trained_model(&self) -> Option<TrainedModelDescriptor> {
        self.inner.lock().trained.clone()
    }

    /// Whether a prediction can be issued right now.
    pub fn can_predict(&self) -> bool {
        let inner = self.inner.lock();
        inner.trained.is_some() && !inner.predicting
    }

    pub fn selection(&self) -> Selection {
        self.inner.lock().selection.clone()
    }

    // ----- Selection -----

    /// Replaces the whole selection, e.g. with one loaded from a file.
    pub fn apply(&self, selection: Selection) {
        self.inner.lock().selection = selection;
    }

    /// Selects an algorithm by its service name.
    ///
    /// # Returns
    /// The algorithm's schema, listing the fields it needs.
    ///
    /// # Errors
    /// An input error if the name is unknown; the selection is left untouched.
    pub fn select_algorithm(&self, name: &str) -> Result<&'static AlgorithmSchema> {
        let schema = registry::algorithm_by_name(name)?;
        self.inner.lock().selection.algorithm = Some(name.to_string());
        debug!(algorithm = name; "algorithm selected");
        Ok(schema)
    }

    /// Selects a cost function by its service name.
    ///
    /// # Errors
    /// An input error if the name is unknown.
    pub fn select_cost_function(&self, name: &str) -> Result<&'static CostFunctionSchema> {
        let schema = registry::cost_function_by_name(name)?;
        self.set_field(COST_FUNCTION_KEY, name);
        Ok(schema)
    }

    /// Selects an optimizer by its service name.
    ///
    /// # Errors
    /// An input error if the name is unknown.
    pub fn select_optimizer(&self, name: &str) -> Result<&'static OptimizerSchema> {
        let schema = registry::optimizer_by_name(name)?;
        self.set_field(OPTIMIZER_KEY, name);
        Ok(schema)
    }

    /// Stores a raw field value. It is only validated when training.
    pub fn set_field(&self, key: impl Into<String>, value: impl Into<String>) {
        self.inner
            .lock()
            .selection
            .fields
            .insert(key.into(), value.into());
    }

    /// Stores the training table as CSV text. It is only parsed when training.
    pub fn set_dataset(&self, text: impl Into<String>) {
        self.inner.lock().selection.dataset = Some(text.into());
    }

    /// Reads the training table from a CSV file.
    ///
    /// # Errors
    /// An input error if the file cannot be read.
    pub fn load_dataset_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.set_dataset(dataset::read_file(path)?);
        Ok(())
    }

    // ----- Actions -----

    /// Trains a model with the current selection.
    ///
    /// Any previously held model is discarded before anything else happens,
    /// even if this training then fails.
    ///
    /// # Returns
    /// The descriptor of the newly trained model, which the session now holds.
    ///
    /// # Errors
    /// * Input errors (nothing was sent): no algorithm, no dataset, a dataset
    ///   or parameter that does not validate, or a training already in flight.
    /// * Transport errors: the service could not be reached.
    /// * Service errors: the service answered with a non-success status.
    pub async fn train(&self) -> Result<TrainedModelDescriptor> {
        let selection = {
            let mut inner = self.inner.lock();
            if inner.training {
                return Err(SessionError::Busy(Action::Train));
            }
            inner.trained = None;
            inner.training = true;
            inner.state = SessionState::Training;
            inner.selection.clone()
        };

        info!("training started");
        let result = self.run_training(&selection).await;

        let mut inner = self.inner.lock();
        inner.training = false;
        match result {
            Ok(model) => {
                info!(num_features = model.num_features(); "training succeeded");
                inner.trained = Some(model.clone());
                inner.state = SessionState::Trained;
                Ok(model)
            }
            Err(e) => {
                warn!("training failed: {e}");
                inner.state = SessionState::TrainFailed;
                Err(e)
            }
        }
    }

    /// Predicts with the held model.
    ///
    /// # Arguments
    /// * `raw_vector` - Comma separated feature values.
    ///
    /// # Returns
    /// The service's response, verbatim.
    ///
    /// # Errors
    /// * Input errors (nothing was sent): no trained model, an invalid vector,
    ///   a width mismatch when that check is enabled, or a prediction already
    ///   in flight.
    /// * Transport errors: the service could not be reached.
    pub async fn predict(&self, raw_vector: &str) -> Result<Value> {
        let model = {
            let mut inner = self.inner.lock();
            let Some(model) = inner.trained.clone() else {
                return Err(RequestError::NoTrainedModel.into());
            };
            if inner.predicting {
                return Err(SessionError::Busy(Action::Predict));
            }
            inner.predicting = true;
            inner.state = SessionState::Predicting;
            model
        };

        info!("prediction started");
        let result = self.run_prediction(&model, raw_vector).await;

        let mut inner = self.inner.lock();
        inner.predicting = false;

        // A training started meanwhile owns the state now, even once it settled.
        let settled = inner.state == SessionState::Predicting;
        match &result {
            Ok(_) => {
                info!("prediction succeeded");
                if settled {
                    inner.state = SessionState::Predicted;
                }
            }
            Err(e) => {
                warn!("prediction failed: {e}");
                if settled {
                    inner.state = SessionState::PredictFailed;
                }
            }
        }

        result
    }

    async fn run_training(&self, selection: &Selection) -> Result<TrainedModelDescriptor> {
        let name = selection
            .algorithm
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(SessionError::NoAlgorithmSelected)?;

        let text = selection
            .dataset
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .ok_or(SessionError::NoDatasetProvided)?;

        let algorithm: Algorithm = name.parse()?;
        let dataset = dataset::parse(text)?;
        let request = self
            .builder
            .build_training_request(algorithm, &selection.fields, &dataset)?;

        let response = self.backend.train(&request).await?;
        let model_details = into_model_details(response)?;

        Ok(TrainedModelDescriptor::new(
            *request.params(),
            model_details,
            dataset.num_features(),
        ))
    }

    async fn run_prediction(&self, model: &TrainedModelDescriptor, raw_vector: &str) -> Result<Value> {
        let request = self.builder.build_prediction_request(Some(model), raw_vector)?;
        if self.check_prediction_width {
            self.builder.check_prediction_width(&request)?;
        }

        Ok(self.backend.predict(&request).await?)
    }
}

/// Splits a training response into the model details, or the service's
/// failure report.
fn into_model_details(mut response: Value) -> Result<Value> {
    let status = response.get("status").and_then(Value::as_str);
    if status != Some(SUCCESS_STATUS) {
        let message = response
            .get("message")
            .and_then(Value::as_str)
            .or(status)
            .unwrap_or("training failed")
            .to_string();
        return Err(SessionError::Service { message, response });
    }

    if let Some(details) = response.as_object_mut() {
        details.remove("status");
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, io};

    use serde_json::json;

    use super::*;
    use crate::{
        client::{self, TransportError},
        dataset::DatasetError,
        error::ErrorKind,
        specs::{PredictionRequest, TrainingRequest},
    };

    /// Answers with canned responses and records every body it receives.
    #[derive(Default)]
    struct Scripted {
        train: Mutex<VecDeque<client::Result<Value>>>,
        predict: Mutex<VecDeque<client::Result<Value>>>,
        train_bodies: Mutex<Vec<Value>>,
        predict_bodies: Mutex<Vec<Value>>,
    }

    impl Scripted {
        fn train_answers(self, answer: client::Result<Value>) -> Self {
            self.train.lock().push_back(answer);
            self
        }

        fn predict_answers(self, answer: client::Result<Value>) -> Self {
            self.predict.lock().push_back(answer);
            self
        }
    }

    impl Backend for Scripted {
        async fn train(&self, request: &TrainingRequest<'_>) -> client::Result<Value> {
            self.train_bodies
                .lock()
                .push(serde_json::to_value(request).unwrap());
            self.train.lock().pop_front().unwrap()
        }

        async fn predict(&self, request: &PredictionRequest<'_>) -> client::Result<Value> {
            self.predict_bodies
                .lock()
                .push(serde_json::to_value(request).unwrap());
            self.predict.lock().pop_front().unwrap()
        }
    }

    fn refused() -> TransportError {
        TransportError::unreachable(
            "http://127.0.0.1:1/train",
            io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
        )
    }

    fn tree_session(backend: Scripted) -> TrainingSession<Scripted> {
        let session = TrainingSession::new(backend, &ClientConfig::default());
        session.select_algorithm("decisionTreeRegressor").unwrap();
        session.set_field("max_depth", "5");
        session.set_field("min_samples_split", "2");
        session.set_dataset("1,2\n3,4\n5,6");
        session
    }

    #[tokio::test]
    async fn successful_training_stores_the_model() {
        let backend = Scripted::default()
            .train_answers(Ok(json!({ "status": "success", "tree": { "leaf": 4.0 } })));
        let session = tree_session(backend);

        let model = session.train().await.unwrap();

        assert_eq!(session.state(), SessionState::Trained);
        assert_eq!(model.model_details(), &json!({ "tree": { "leaf": 4.0 } }));
        assert_eq!(model.num_features(), 1);
        assert_eq!(session.trained_model(), Some(model));
        assert!(session.can_predict());

        let sent = &session.backend().train_bodies.lock()[0];
        assert_eq!(sent["algorithm"], "decisionTreeRegressor");
        assert_eq!(sent["params"], json!({ "max_depth": 5, "min_samples_split": 2 }));
        assert_eq!(sent["trainingData"]["X"], json!([[1.0], [3.0], [5.0]]));
        assert_eq!(sent["trainingData"]["y"], json!([2.0, 4.0, 6.0]));
    }

    #[tokio::test]
    async fn prediction_sends_the_held_model_and_returns_the_answer() {
        let backend = Scripted::default()
            .train_answers(Ok(json!({ "status": "success", "tree": {} })))
            .predict_answers(Ok(json!({ "status": "success", "prediction": 4.0 })));
        let session = tree_session(backend);
        session.train().await.unwrap();

        let answer = session.predict(" 3 ").await.unwrap();

        assert_eq!(answer, json!({ "status": "success", "prediction": 4.0 }));
        assert_eq!(session.state(), SessionState::Predicted);

        let sent = &session.backend().predict_bodies.lock()[0];
        assert_eq!(sent["predictionData"], json!([3.0]));
        assert_eq!(sent["trainedModel"]["algorithm"], "decisionTreeRegressor");
        assert_eq!(sent["trainedModel"]["model_details"], json!({ "tree": {} }));
    }

    #[tokio::test]
    async fn service_failure_clears_the_model() {
        let backend = Scripted::default()
            .train_answers(Ok(json!({ "status": "success" })))
            .train_answers(Ok(json!({ "status": "error", "message": "bad data" })));
        let session = tree_session(backend);
        session.train().await.unwrap();

        let err = session.train().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Service);
        assert_eq!(err.to_string(), "service error: bad data");
        assert_eq!(session.state(), SessionState::TrainFailed);
        assert_eq!(session.trained_model(), None);

        let err = session.predict("1").await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Request(RequestError::NoTrainedModel)
        ));
        assert!(session.backend().predict_bodies.lock().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_reported_as_such() {
        let backend = Scripted::default().train_answers(Err(refused()));
        let session = tree_session(backend);

        let err = session.train().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(session.state(), SessionState::TrainFailed);
        assert!(!session.can_predict());
    }

    #[tokio::test]
    async fn missing_selections_never_reach_the_service() {
        let session = TrainingSession::new(Scripted::default(), &ClientConfig::default());

        let err = session.train().await.unwrap_err();
        assert!(matches!(err, SessionError::NoAlgorithmSelected));

        session.select_algorithm("decisionTreeClassifier").unwrap();
        let err = session.train().await.unwrap_err();
        assert!(matches!(err, SessionError::NoDatasetProvided));

        session.set_dataset("1,a");
        let err = session.train().await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Dataset(DatasetError::MalformedRow { line: 0, .. })
        ));

        session.set_dataset("1,2");
        let err = session.train().await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Request(RequestError::MissingParameter { field: "max_depth" })
        ));

        assert_eq!(err.kind(), ErrorKind::Input);
        assert_eq!(session.state(), SessionState::TrainFailed);
        assert!(session.backend().train_bodies.lock().is_empty());
    }

    #[test]
    fn unknown_names_are_rejected_on_selection() {
        let session = TrainingSession::new(Scripted::default(), &ClientConfig::default());

        assert!(session.select_algorithm("kMeans").is_err());
        assert!(session.select_cost_function("HingeLoss").is_err());
        assert!(session.select_optimizer("AdagradOptimizer").is_err());
        assert_eq!(session.selection(), Selection::default());

        let schema = session.select_optimizer("AdamOptimizer").unwrap();
        assert_eq!(schema.fields.len(), 3);
        assert_eq!(session.selection().fields["optimizer"], "AdamOptimizer");
    }

    #[tokio::test]
    async fn invalid_vectors_are_rejected_locally() {
        let backend = Scripted::default().train_answers(Ok(json!({ "status": "success" })));
        let session = tree_session(backend);
        session.train().await.unwrap();

        for raw in ["", "1,x", " , "] {
            let err = session.predict(raw).await.unwrap_err();
            assert!(matches!(
                err,
                SessionError::Request(RequestError::InvalidPredictionInput { .. })
            ));
        }

        assert_eq!(session.state(), SessionState::PredictFailed);
        assert!(session.can_predict());
        assert!(session.backend().predict_bodies.lock().is_empty());
    }

    #[tokio::test]
    async fn width_check_is_applied_when_configured() {
        let backend = Scripted::default()
            .train_answers(Ok(json!({ "status": "success" })))
            .predict_answers(Ok(json!({ "status": "success", "prediction": 1.0 })));
        let config = ClientConfig {
            check_prediction_width: true,
            ..ClientConfig::default()
        };
        let session = TrainingSession::new(backend, &config);
        session.apply(
            Selection::new()
                .with_algorithm("decisionTreeRegressor")
                .with_field("max_depth", "3")
                .with_field("min_samples_split", "2")
                .with_dataset("1,2,3\n4,5,6"),
        );
        session.train().await.unwrap();

        let err = session.predict("1").await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Request(RequestError::PredictionWidthMismatch {
                expected: 2,
                got: 1
            })
        ));

        session.predict("1,2").await.unwrap();
    }

    #[tokio::test]
    async fn predictions_of_any_width_pass_by_default() {
        let backend = Scripted::default()
            .train_answers(Ok(json!({ "status": "success" })))
            .predict_answers(Ok(json!({ "status": "success" })));
        let session = tree_session(backend);
        session.train().await.unwrap();

        session.predict("1,2,3").await.unwrap();
    }

    #[test]
    fn dataset_files_are_read_into_the_selection() {
        let session = TrainingSession::new(Scripted::default(), &ClientConfig::default());
        let path = std::env::temp_dir().join(format!("trainer-client-ds-{}.csv", std::process::id()));
        std::fs::write(&path, "1,2\n3,4\n").unwrap();

        session.load_dataset_file(&path).unwrap();
        assert_eq!(session.selection().dataset.as_deref(), Some("1,2\n3,4\n"));
        std::fs::remove_file(&path).unwrap();

        let err = session.load_dataset_file(&path).unwrap_err();
        assert!(matches!(err, SessionError::Dataset(DatasetError::Io { .. })));
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn model_details_drop_only_the_status() {
        let details =
            into_model_details(json!({ "status": "success", "learnedWeights": [1.0] })).unwrap();
        assert_eq!(details, json!({ "learnedWeights": [1.0] }));

        let err = into_model_details(json!({ "learnedWeights": [1.0] })).unwrap_err();
        assert!(matches!(err, SessionError::Service { .. }));

        let err = into_model_details(json!({ "status": "failure" })).unwrap_err();
        assert_eq!(err.to_string(), "service error: failure");
    }
}
