//! Reading the query measurements from an interactive prompt

use crate::core::{DenseVector, LogitError, Result};
use crate::data::N_FEATURES;
use std::io::{BufRead, Write};

/// Prompt text and field name for each measurement, in feature order
pub const MEASUREMENT_PROMPTS: [(&str, &str); N_FEATURES] = [
    ("sepal length", "Enter sepal length: "),
    ("sepal width", "Enter sepal width: "),
    ("petal length", "Enter petal length: "),
    ("petal width", "Enter petal width: "),
];

/// How typed measurements are turned into numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputCoercion {
    /// Accept any finite decimal number
    #[default]
    Float,
    /// Accept only whole numbers. Fractional input such as `0.2` is
    /// rejected, so petal widths below 1 cm can only be entered as `0`.
    Integer,
}

/// Parse one typed measurement
pub fn parse_measurement(field: &str, raw: &str, coercion: InputCoercion) -> Result<f64> {
    let token = raw.trim();
    let input_error = |reason: String| LogitError::InputError {
        field: field.to_string(),
        reason,
    };

    if token.is_empty() {
        return Err(input_error("no value entered".to_string()));
    }

    let value = match coercion {
        InputCoercion::Float => token
            .parse::<f64>()
            .map_err(|_| input_error(format!("{token:?} is not a number")))?,
        InputCoercion::Integer => token
            .parse::<i64>()
            .map_err(|_| input_error(format!("{token:?} is not an integer")))?
            as f64,
    };

    if !value.is_finite() {
        return Err(input_error(format!("{token:?} is not a finite number")));
    }
    Ok(value)
}

/// Ask for the four measurements one line at a time.
///
/// Prompts go to `prompt_out`; each answer is read from `input`. Running out
/// of input before all four values are read is an `InputError`.
pub fn prompt_measurements<R: BufRead, W: Write>(
    input: &mut R,
    prompt_out: &mut W,
    coercion: InputCoercion,
) -> Result<DenseVector> {
    let mut values = Vec::with_capacity(N_FEATURES);
    let mut line = String::new();

    for (field, prompt) in MEASUREMENT_PROMPTS {
        write!(prompt_out, "{prompt}")?;
        prompt_out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(LogitError::InputError {
                field: field.to_string(),
                reason: "input ended before a value was entered".to_string(),
            });
        }
        values.push(parse_measurement(field, &line, coercion)?);
    }

    Ok(DenseVector::new(values))
}
