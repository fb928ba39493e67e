//! Request shapes and the declarative validator behind them.

mod shapes;
mod validation;
pub use shapes::{CreateResource, ResourceIdPayload, UpdateResource};
pub use validation::{FieldRule, FieldViolation, RequestValidator, Rule, Shape};
