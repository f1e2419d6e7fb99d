//! Numeric coercion and overflow detection
//!
//! | source \ target | integral            | floating            |
//! |-----------------|---------------------|---------------------|
//! | integral        | range checked       | always widened      |
//! | floating        | always rejected     | accepted            |
//!
//! Nothing is ever truncated. The same rules apply to scalar fields and to
//! container elements; the validator calls in here for both.

use crate::schema::TypeTag;

use super::errors::{ValueError, ValueResult};
use super::value::Value;

/// Validate and convert `value` against a numeric `target` type.
///
/// # Errors
///
/// - `InvalidArgument` if the target is not numeric, the value is not
///   numeric, or a floating value is supplied for an integral target
/// - `NumericOverflow` if an integral value lies outside the target width, or
///   a finite value lies outside the single precision range
pub fn coerce(value: Value, target: &TypeTag, path: &str) -> ValueResult<Value> {
    if let Some(width) = target.int_width() {
        return match value {
            Value::Int(i) if width.contains(i) => Ok(Value::Int(i)),
            Value::Int(i) => Err(ValueError::overflow(path, width, i)),
            Value::Float(f) => Err(ValueError::invalid_argument(
                path,
                format!(
                    "floating value {:?} is not accepted for {}; integral fields never truncate",
                    f, width
                ),
            )),
            other => Err(ValueError::type_mismatch(path, width, other.kind_name())),
        };
    }

    match target {
        TypeTag::Float64 => match value {
            Value::Int(i) => Ok(Value::Float(i as f64)),
            Value::Float(f) => Ok(Value::Float(f)),
            other => Err(ValueError::type_mismatch(path, target, other.kind_name())),
        },
        TypeTag::Float32 => {
            let wide = match value {
                Value::Int(i) => i as f64,
                Value::Float(f) => f,
                other => return Err(ValueError::type_mismatch(path, target, other.kind_name())),
            };
            narrow_to_f32(wide, path).map(Value::Float)
        }
        _ => Err(ValueError::invalid_argument(
            path,
            format!("{} is not a numeric type", target),
        )),
    }
}

/// Round to single precision, rejecting finite values the format cannot hold.
fn narrow_to_f32(wide: f64, path: &str) -> ValueResult<f64> {
    if wide.is_finite() && wide.abs() > f32::MAX as f64 {
        return Err(ValueError::overflow(path, "float", wide));
    }
    Ok(wide as f32 as f64)
}
