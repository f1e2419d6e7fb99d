//! Field qualifier engine
//!
//! Construct and replace run the same resolution; they differ only in the
//! baseline used for fields the caller did not name:
//!
//! | supplied      | Required              | Optional | Unqualified    |
//! |---------------|-----------------------|----------|----------------|
//! | not named     | baseline              | baseline | baseline       |
//! | absent marker | RequiredFieldMissing  | absent   | schema default |
//! | value         | validated value       | same     | same           |
//!
//! After resolution every Required field must hold a value. Resolution
//! produces fresh storage; the baseline is only read.

use crate::schema::{FieldSpec, Qualifier, StructSchema, UnionSchema};
use crate::value::{make_path, validate, Arg, Args, Supplied, Value, ValueError, ValueResult};

/// Values for fields the caller did not name.
pub(crate) enum Baseline<'a> {
    /// Schema defaults (construction)
    Defaults,
    /// An existing instance's storage (replace)
    Current(&'a [Option<Value>]),
}

/// Bind keyword arguments to declaration positions.
///
/// Rejects positional arguments, unknown names and repeated names.
fn bind(
    type_name: &str,
    field_count: usize,
    position: impl Fn(&str) -> Option<usize>,
    args: Args,
) -> ValueResult<Vec<Option<Supplied>>> {
    let mut bound: Vec<Option<Supplied>> = vec![None; field_count];

    for arg in args {
        match arg {
            Arg::Positional(value) => {
                return Err(ValueError::invalid_argument(
                    type_name,
                    format!(
                        "positional argument {} rejected; fields are keyword-only",
                        value
                    ),
                ));
            }
            Arg::Named { name, value } => {
                let idx = position(&name).ok_or_else(|| {
                    ValueError::invalid_argument(
                        type_name,
                        format!("unknown field '{}'", name),
                    )
                })?;
                if bound[idx].is_some() {
                    return Err(ValueError::invalid_argument(
                        make_path(type_name, &name),
                        "field supplied more than once",
                    ));
                }
                bound[idx] = Some(value);
            }
        }
    }

    Ok(bound)
}

/// Resolve the full storage of a struct instance.
pub(crate) fn resolve_struct(
    schema: &StructSchema,
    baseline: Baseline<'_>,
    args: Args,
) -> ValueResult<Vec<Option<Value>>> {
    let fields = schema.fields();
    let bound = bind(schema.name(), fields.len(), |n| schema.position(n), args)?;

    let mut resolved = Vec::with_capacity(fields.len());
    for (idx, (field, supplied)) in fields.iter().zip(bound).enumerate() {
        let value = match supplied {
            None => match &baseline {
                Baseline::Defaults => field.default().cloned(),
                Baseline::Current(current) => current[idx].clone(),
            },
            Some(Supplied::Absent) => resolve_absent(schema.name(), field)?,
            Some(Supplied::Value(value)) => {
                let path = make_path(schema.name(), field.external_name());
                Some(validate(value, field.ty(), &path)?)
            }
        };
        resolved.push(value);
    }

    for (field, value) in fields.iter().zip(&resolved) {
        if field.qualifier() == Qualifier::Required && value.is_none() {
            return Err(ValueError::required_missing(
                schema.name(),
                field.external_name(),
            ));
        }
    }

    Ok(resolved)
}

fn resolve_absent(type_name: &str, field: &FieldSpec) -> ValueResult<Option<Value>> {
    match field.qualifier() {
        Qualifier::Required => Err(ValueError::required_missing(
            type_name,
            field.external_name(),
        )),
        Qualifier::Optional => Ok(None),
        Qualifier::Unqualified => Ok(field.default().cloned()),
    }
}

/// Resolve the active field of a union instance.
///
/// `baseline` is the currently active `(position, value)`, if any. No
/// supplied field keeps it; one supplied field replaces it. An absent
/// marker for any field yields no active field.
pub(crate) fn resolve_union(
    schema: &UnionSchema,
    baseline: Option<&(usize, Value)>,
    args: Args,
) -> ValueResult<Option<(usize, Value)>> {
    let bound = bind(schema.name(), schema.fields().len(), |n| schema.position(n), args)?;

    let mut supplied = bound
        .into_iter()
        .enumerate()
        .filter_map(|(idx, s)| s.map(|s| (idx, s)));

    let Some((idx, value)) = supplied.next() else {
        return Ok(baseline.cloned());
    };
    if supplied.next().is_some() {
        return Err(ValueError::invalid_argument(
            schema.name(),
            "a union takes exactly one active field, or none",
        ));
    }

    match value {
        Supplied::Absent => Ok(None),
        Supplied::Value(value) => {
            let field = &schema.fields()[idx];
            let path = make_path(schema.name(), field.external_name());
            Ok(Some((idx, validate(value, field.ty(), &path)?)))
        }
    }
}
