mod error;
mod fields;
mod kinds;
pub mod registry;

pub use error::{Result, SchemaError};
pub use fields::{Bound, FieldKind, FieldSpec};
pub use kinds::{Algorithm, CostFunctionKind, OptimizerKind};
pub use registry::{
    AlgorithmSchema, COST_FUNCTION_KEY, CostFunctionSchema, OPTIMIZER_KEY, OptimizerSchema,
};
