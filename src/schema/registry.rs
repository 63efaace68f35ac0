//! Static tables of what each selectable kind needs from the operator.
//!
//! Supporting a new algorithm, cost function or optimizer means adding a kind,
//! its parameter type and an entry here. The request builder walks these
//! tables generically and needs no change.

use std::fmt;

use super::{
    error::Result,
    fields::{Bound, FieldSpec},
    kinds::{Algorithm, CostFunctionKind, OptimizerKind},
};
use crate::{
    request::{self, Resolved},
    specs::{
        AlgorithmParams, CostFunctionSpec, ForestParams, LinearRegressionParams, OptimizerSpec,
        TreeParams,
    },
};

/// Raw field key holding the selected cost function's name.
pub const COST_FUNCTION_KEY: &str = "costFunction";
/// Raw field key holding the selected optimizer's name.
pub const OPTIMIZER_KEY: &str = "optimizer";

/// The fields one algorithm requires and how they become its parameters.
pub struct AlgorithmSchema {
    pub algorithm: Algorithm,
    pub fields: &'static [FieldSpec],
    /// Whether a cost function and an optimizer must be selected as well.
    pub needs_solver: bool,
    pub(crate) assemble: fn(&Resolved) -> request::Result<AlgorithmParams>,
}

pub struct CostFunctionSchema {
    pub kind: CostFunctionKind,
    pub fields: &'static [FieldSpec],
    pub(crate) assemble: fn(&Resolved) -> request::Result<CostFunctionSpec>,
}

pub struct OptimizerSchema {
    pub kind: OptimizerKind,
    pub fields: &'static [FieldSpec],
    pub(crate) assemble: fn(&Resolved) -> request::Result<OptimizerSpec>,
}

impl fmt::Debug for AlgorithmSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmSchema")
            .field("algorithm", &self.algorithm)
            .field("fields", &self.fields)
            .field("needs_solver", &self.needs_solver)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for CostFunctionSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CostFunctionSchema")
            .field("kind", &self.kind)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for OptimizerSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptimizerSchema")
            .field("kind", &self.kind)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

const MAX_DEPTH: FieldSpec =
    FieldSpec::integer("max_depth", "max_depth", "Max Depth", Bound::Positive, 5.0);
const MIN_SAMPLES_SPLIT: FieldSpec = FieldSpec::integer(
    "min_samples_split",
    "min_samples_split",
    "Min Samples Split",
    Bound::AtLeast(2.0),
    2.0,
);
const N_ESTIMATORS: FieldSpec = FieldSpec::integer(
    "n_estimators",
    "n_estimators",
    "Number of Estimators",
    Bound::Positive,
    10.0,
);

static LINEAR_REGRESSION: AlgorithmSchema = AlgorithmSchema {
    algorithm: Algorithm::LinearRegression,
    fields: &[
        FieldSpec::number(
            "learningRate",
            "learningRate",
            "Learning Rate",
            Bound::Positive,
            0.01,
        ),
        FieldSpec::integer("epochs", "epochs", "Epochs", Bound::Positive, 1000.0),
    ],
    needs_solver: true,
    assemble: |r| {
        Ok(AlgorithmParams::LinearRegression(LinearRegressionParams {
            learning_rate: r.number("learningRate")?,
            epochs: r.non_zero("epochs")?,
            cost_function: r.cost_function()?,
            optimizer: r.optimizer()?,
            num_features: r.num_features()?,
        }))
    },
};

static DECISION_TREE_REGRESSOR: AlgorithmSchema = AlgorithmSchema {
    algorithm: Algorithm::DecisionTreeRegressor,
    fields: &[MAX_DEPTH, MIN_SAMPLES_SPLIT],
    needs_solver: false,
    assemble: |r| Ok(AlgorithmParams::DecisionTreeRegressor(tree_params(r)?)),
};

static DECISION_TREE_CLASSIFIER: AlgorithmSchema = AlgorithmSchema {
    algorithm: Algorithm::DecisionTreeClassifier,
    fields: &[MAX_DEPTH, MIN_SAMPLES_SPLIT],
    needs_solver: false,
    assemble: |r| Ok(AlgorithmParams::DecisionTreeClassifier(tree_params(r)?)),
};

static RANDOM_FOREST_REGRESSOR: AlgorithmSchema = AlgorithmSchema {
    algorithm: Algorithm::RandomForestRegressor,
    fields: &[N_ESTIMATORS, MAX_DEPTH, MIN_SAMPLES_SPLIT],
    needs_solver: false,
    assemble: |r| Ok(AlgorithmParams::RandomForestRegressor(forest_params(r)?)),
};

static RANDOM_FOREST_CLASSIFIER: AlgorithmSchema = AlgorithmSchema {
    algorithm: Algorithm::RandomForestClassifier,
    fields: &[N_ESTIMATORS, MAX_DEPTH, MIN_SAMPLES_SPLIT],
    needs_solver: false,
    assemble: |r| Ok(AlgorithmParams::RandomForestClassifier(forest_params(r)?)),
};

static MEAN_SQUARED_ERROR: CostFunctionSchema = CostFunctionSchema {
    kind: CostFunctionKind::MeanSquaredError,
    fields: &[],
    assemble: |_| Ok(CostFunctionSpec::MeanSquaredError {}),
};

static MEAN_ABSOLUTE_ERROR: CostFunctionSchema = CostFunctionSchema {
    kind: CostFunctionKind::MeanAbsoluteError,
    fields: &[],
    assemble: |_| Ok(CostFunctionSpec::MeanAbsoluteError {}),
};

static HUBER_LOSS: CostFunctionSchema = CostFunctionSchema {
    kind: CostFunctionKind::HuberLoss,
    fields: &[FieldSpec::number(
        "huberDelta",
        "delta",
        "Delta",
        Bound::Positive,
        1.0,
    )],
    assemble: |r| {
        Ok(CostFunctionSpec::HuberLoss {
            delta: r.number("delta")?,
        })
    },
};

static LOG_COSH_LOSS: CostFunctionSchema = CostFunctionSchema {
    kind: CostFunctionKind::LogCoshLoss,
    fields: &[],
    assemble: |_| Ok(CostFunctionSpec::LogCoshLoss {}),
};

static GRADIENT_DESCENT: OptimizerSchema = OptimizerSchema {
    kind: OptimizerKind::GradientDescent,
    fields: &[],
    assemble: |_| Ok(OptimizerSpec::GradientDescent {}),
};

static MINI_BATCH_GRADIENT_DESCENT: OptimizerSchema = OptimizerSchema {
    kind: OptimizerKind::MiniBatchGradientDescent,
    fields: &[FieldSpec::integer(
        "batchSize",
        "batchSize",
        "Batch Size",
        Bound::Positive,
        32.0,
    )],
    assemble: |r| {
        Ok(OptimizerSpec::MiniBatchGradientDescent {
            batch_size: r.non_zero("batchSize")?,
        })
    },
};

static MOMENTUM: OptimizerSchema = OptimizerSchema {
    kind: OptimizerKind::MomentumOptimizer,
    fields: &[FieldSpec::number(
        "momentum",
        "momentum",
        "Momentum (beta)",
        Bound::UnitInterval,
        0.9,
    )],
    assemble: |r| {
        Ok(OptimizerSpec::MomentumOptimizer {
            momentum: r.number("momentum")?,
        })
    },
};

static ADAM: OptimizerSchema = OptimizerSchema {
    kind: OptimizerKind::AdamOptimizer,
    fields: &[
        FieldSpec::number("adamBeta1", "beta1", "Beta1", Bound::UnitInterval, 0.9),
        FieldSpec::number("adamBeta2", "beta2", "Beta2", Bound::UnitInterval, 0.999),
        FieldSpec::number("adamEpsilon", "epsilon", "Epsilon", Bound::Positive, 1e-8),
    ],
    assemble: |r| {
        Ok(OptimizerSpec::AdamOptimizer {
            beta1: r.number("beta1")?,
            beta2: r.number("beta2")?,
            epsilon: r.number("epsilon")?,
        })
    },
};

static RMS_PROP: OptimizerSchema = OptimizerSchema {
    kind: OptimizerKind::RMSPropOptimizer,
    fields: &[
        FieldSpec::number("rmsPropBeta", "beta", "Beta", Bound::UnitInterval, 0.9),
        FieldSpec::number("rmsPropEpsilon", "epsilon", "Epsilon", Bound::Positive, 1e-8),
    ],
    assemble: |r| {
        Ok(OptimizerSpec::RMSPropOptimizer {
            beta: r.number("beta")?,
            epsilon: r.number("epsilon")?,
        })
    },
};

fn tree_params(r: &Resolved) -> request::Result<TreeParams> {
    Ok(TreeParams {
        max_depth: r.non_zero("max_depth")?,
        min_samples_split: r.count("min_samples_split")?,
    })
}

fn forest_params(r: &Resolved) -> request::Result<ForestParams> {
    Ok(ForestParams {
        n_estimators: r.non_zero("n_estimators")?,
        max_depth: r.non_zero("max_depth")?,
        min_samples_split: r.count("min_samples_split")?,
    })
}

/// Returns the schema the given algorithm is configured with.
pub fn algorithm(algorithm: Algorithm) -> &'static AlgorithmSchema {
    match algorithm {
        Algorithm::LinearRegression => &LINEAR_REGRESSION,
        Algorithm::DecisionTreeRegressor => &DECISION_TREE_REGRESSOR,
        Algorithm::DecisionTreeClassifier => &DECISION_TREE_CLASSIFIER,
        Algorithm::RandomForestRegressor => &RANDOM_FOREST_REGRESSOR,
        Algorithm::RandomForestClassifier => &RANDOM_FOREST_CLASSIFIER,
    }
}

pub fn cost_function(kind: CostFunctionKind) -> &'static CostFunctionSchema {
    match kind {
        CostFunctionKind::MeanSquaredError => &MEAN_SQUARED_ERROR,
        CostFunctionKind::MeanAbsoluteError => &MEAN_ABSOLUTE_ERROR,
        CostFunctionKind::HuberLoss => &HUBER_LOSS,
        CostFunctionKind::LogCoshLoss => &LOG_COSH_LOSS,
    }
}

pub fn optimizer(kind: OptimizerKind) -> &'static OptimizerSchema {
    match kind {
        OptimizerKind::GradientDescent => &GRADIENT_DESCENT,
        OptimizerKind::MiniBatchGradientDescent => &MINI_BATCH_GRADIENT_DESCENT,
        OptimizerKind::MomentumOptimizer => &MOMENTUM,
        OptimizerKind::AdamOptimizer => &ADAM,
        OptimizerKind::RMSPropOptimizer => &RMS_PROP,
    }
}

/// Looks an algorithm's schema up by its service name.
///
/// # Errors
/// `UnknownAlgorithm` if the name is outside the supported set.
pub fn algorithm_by_name(name: &str) -> Result<&'static AlgorithmSchema> {
    Ok(algorithm(name.parse()?))
}

/// # Errors
/// `UnknownCostFunction` if the name is outside the supported set.
pub fn cost_function_by_name(name: &str) -> Result<&'static CostFunctionSchema> {
    Ok(cost_function(name.parse()?))
}

/// # Errors
/// `UnknownOptimizer` if the name is outside the supported set.
pub fn optimizer_by_name(name: &str) -> Result<&'static OptimizerSchema> {
    Ok(optimizer(name.parse()?))
}
