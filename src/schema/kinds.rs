use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::SchemaError;

/// The learning algorithms the remote service can train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Algorithm {
    LinearRegression,
    DecisionTreeRegressor,
    DecisionTreeClassifier,
    RandomForestRegressor,
    RandomForestClassifier,
}

/// The objective a linear regression minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostFunctionKind {
    MeanSquaredError,
    MeanAbsoluteError,
    HuberLoss,
    LogCoshLoss,
}

/// The update rule a linear regression trains with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptimizerKind {
    GradientDescent,
    MiniBatchGradientDescent,
    MomentumOptimizer,
    AdamOptimizer,
    RMSPropOptimizer,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Self::LinearRegression,
        Self::DecisionTreeRegressor,
        Self::DecisionTreeClassifier,
        Self::RandomForestRegressor,
        Self::RandomForestClassifier,
    ];

    /// The name the training service knows this algorithm by.
    pub fn name(self) -> &'static str {
        match self {
            Self::LinearRegression => "linearRegression",
            Self::DecisionTreeRegressor => "decisionTreeRegressor",
            Self::DecisionTreeClassifier => "decisionTreeClassifier",
            Self::RandomForestRegressor => "randomForestRegressor",
            Self::RandomForestClassifier => "randomForestClassifier",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::LinearRegression => "Linear Regression",
            Self::DecisionTreeRegressor => "Decision Tree Regressor",
            Self::DecisionTreeClassifier => "Decision Tree Classifier",
            Self::RandomForestRegressor => "Random Forest Regressor",
            Self::RandomForestClassifier => "Random Forest Classifier",
        }
    }
}

impl CostFunctionKind {
    pub const ALL: [CostFunctionKind; 4] = [
        Self::MeanSquaredError,
        Self::MeanAbsoluteError,
        Self::HuberLoss,
        Self::LogCoshLoss,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::MeanSquaredError => "MeanSquaredError",
            Self::MeanAbsoluteError => "MeanAbsoluteError",
            Self::HuberLoss => "HuberLoss",
            Self::LogCoshLoss => "LogCoshLoss",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MeanSquaredError => "Mean Squared Error",
            Self::MeanAbsoluteError => "Mean Absolute Error",
            Self::HuberLoss => "Huber Loss",
            Self::LogCoshLoss => "Log-Cosh Loss",
        }
    }
}

impl OptimizerKind {
    pub const ALL: [OptimizerKind; 5] = [
        Self::GradientDescent,
        Self::MiniBatchGradientDescent,
        Self::MomentumOptimizer,
        Self::AdamOptimizer,
        Self::RMSPropOptimizer,
    ];

    /// The name the training service knows this optimizer by.
    ///
    /// Plain gradient descent is called `BatchGradientDescent` on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Self::GradientDescent => "BatchGradientDescent",
            Self::MiniBatchGradientDescent => "MiniBatchGradientDescent",
            Self::MomentumOptimizer => "MomentumOptimizer",
            Self::AdamOptimizer => "AdamOptimizer",
            Self::RMSPropOptimizer => "RMSPropOptimizer",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::GradientDescent => "Gradient Descent",
            Self::MiniBatchGradientDescent => "Mini-Batch Gradient Descent",
            Self::MomentumOptimizer => "Momentum",
            Self::AdamOptimizer => "Adam",
            Self::RMSPropOptimizer => "RMSProp",
        }
    }
}

impl FromStr for Algorithm {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| SchemaError::UnknownAlgorithm(s.to_string()))
    }
}

impl FromStr for CostFunctionKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| SchemaError::UnknownCostFunction(s.to_string()))
    }
}

impl FromStr for OptimizerKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "GradientDescent" => Ok(Self::GradientDescent),
            s => Self::ALL
                .into_iter()
                .find(|o| o.name() == s)
                .ok_or_else(|| SchemaError::UnknownOptimizer(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for CostFunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
