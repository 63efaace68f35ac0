use std::path::Path;

use serde_json::Value;

use crate::{
    request::RawFields,
    schema::{COST_FUNCTION_KEY, OPTIMIZER_KEY},
};

/// Everything a user picked before pressing train, still as raw text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// The algorithm's wire name, e.g. `linearRegression`.
    pub algorithm: Option<String>,
    /// Raw field values keyed by field key, including the cost function and
    /// optimizer choices.
    pub fields: RawFields,
    /// The training table as CSV text.
    pub dataset: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithm(mut self, name: impl Into<String>) -> Self {
        self.algorithm = Some(name.into());
        self
    }

    pub fn with_cost_function(self, name: impl Into<String>) -> Self {
        self.with_field(COST_FUNCTION_KEY, name)
    }

    pub fn with_optimizer(self, name: impl Into<String>) -> Self {
        self.with_field(OPTIMIZER_KEY, name)
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_dataset(mut self, text: impl Into<String>) -> Self {
        self.dataset = Some(text.into());
        self
    }
}

/// Loads a [`Selection`] from a JSON file.
///
/// ```json
/// {
///   "algorithm": "linearRegression",
///   "costFunction": "MeanSquaredError",
///   "optimizer": "AdamOptimizer",
///   "params": { "learningRate": 0.01, "epochs": 500, "adamBeta1": 0.9 },
///   "dataset": "train.csv"
/// }
/// ```
///
/// Numbers under `params` are kept in their text form. A relative `dataset`
/// path resolves against the file's directory.
///
/// # Errors
/// Returns a human-readable string if the file or the dataset cannot be read,
/// or if an entry has the wrong JSON type.
pub fn load_selection(path: &str) -> Result<Selection, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("cannot read '{path}': {e}"))?;

    let val: Value = serde_json::from_str(&content).map_err(|e| format!("invalid JSON: {e}"))?;
    let base_dir = Path::new(path).parent().unwrap_or_else(|| Path::new(""));

    parse_selection(&val, base_dir)
}

fn parse_selection(val: &Value, base_dir: &Path) -> Result<Selection, String> {
    if !val.is_object() {
        return Err("selection must be a JSON object".into());
    }

    let opt_str = |key: &str| -> Result<Option<String>, String> {
        match &val[key] {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.clone())),
            _ => Err(format!("{key} must be a string")),
        }
    };

    let mut selection = Selection {
        algorithm: opt_str("algorithm")?,
        ..Selection::default()
    };

    for key in [COST_FUNCTION_KEY, OPTIMIZER_KEY] {
        if let Some(name) = opt_str(key)? {
            selection.fields.insert(key.to_string(), name);
        }
    }

    match &val["params"] {
        Value::Null => {}
        Value::Object(params) => {
            for (key, value) in params {
                let text = field_text(value)
                    .ok_or_else(|| format!("params.{key} must be a number or a string"))?;
                selection.fields.insert(key.clone(), text);
            }
        }
        _ => return Err("params must be an object".into()),
    }

    if let Some(csv_path) = opt_str("dataset")? {
        let csv_path = base_dir.join(csv_path);
        let text = std::fs::read_to_string(&csv_path)
            .map_err(|e| format!("cannot read dataset '{}': {e}", csv_path.display()))?;
        selection.dataset = Some(text);
    }

    Ok(selection)
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn numbers_become_field_text() {
        let val = json!({
            "algorithm": "linearRegression",
            "costFunction": "HuberLoss",
            "optimizer": "MomentumOptimizer",
            "params": { "learningRate": 0.05, "epochs": 200, "momentum": "0.8" }
        });

        let selection = parse_selection(&val, Path::new("")).unwrap();

        assert_eq!(selection.algorithm.as_deref(), Some("linearRegression"));
        assert_eq!(selection.fields["costFunction"], "HuberLoss");
        assert_eq!(selection.fields["optimizer"], "MomentumOptimizer");
        assert_eq!(selection.fields["learningRate"], "0.05");
        assert_eq!(selection.fields["epochs"], "200");
        assert_eq!(selection.fields["momentum"], "0.8");
        assert_eq!(selection.dataset, None);
    }

    #[test]
    fn everything_is_optional() {
        let selection = parse_selection(&json!({}), Path::new("")).unwrap();
        assert_eq!(selection, Selection::default());
    }

    #[test]
    fn wrong_types_are_reported() {
        let err = parse_selection(&json!({ "algorithm": 3 }), Path::new("")).unwrap_err();
        assert_eq!(err, "algorithm must be a string");

        let err = parse_selection(&json!({ "params": { "epochs": [1] } }), Path::new(""))
            .unwrap_err();
        assert_eq!(err, "params.epochs must be a number or a string");

        let err = parse_selection(&json!([]), Path::new("")).unwrap_err();
        assert_eq!(err, "selection must be a JSON object");
    }

    #[test]
    fn dataset_path_resolves_next_to_the_selection() {
        let dir = std::env::temp_dir().join(format!("trainer-client-sel-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("train.csv"), "1,2\n3,4\n").unwrap();
        let selection_path = dir.join("selection.json");
        std::fs::write(
            &selection_path,
            r#"{ "algorithm": "decisionTreeRegressor", "dataset": "train.csv" }"#,
        )
        .unwrap();

        let selection = load_selection(selection_path.to_str().unwrap()).unwrap();

        assert_eq!(selection.dataset.as_deref(), Some("1,2\n3,4\n"));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_selection("/definitely/not/here.json").unwrap_err();
        assert!(err.starts_with("cannot read '/definitely/not/here.json'"));
    }

    #[test]
    fn builder_style_setters_fill_the_field_map() {
        let selection = Selection::new()
            .with_algorithm("linearRegression")
            .with_cost_function("MeanSquaredError")
            .with_optimizer("GradientDescent")
            .with_field("epochs", "10")
            .with_dataset("1,2");

        assert_eq!(selection.fields["costFunction"], "MeanSquaredError");
        assert_eq!(selection.fields["optimizer"], "GradientDescent");
        assert_eq!(selection.fields["epochs"], "10");
        assert_eq!(selection.dataset.as_deref(), Some("1,2"));
    }
}
