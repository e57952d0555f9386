use nalgebra::Vector3;
use thiserror::Error;

/// Operation selected in the side panel. `Dot` and `Cross` are binary only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operation {
    #[default]
    None,
    Add,
    Subtract,
    Dot,
    Cross,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::None,
        Operation::Add,
        Operation::Subtract,
        Operation::Dot,
        Operation::Cross,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Operation::None => "Select Operation",
            Operation::Add => "Add Vectors",
            Operation::Subtract => "Subtract Vectors",
            Operation::Dot => "Dot Product",
            Operation::Cross => "Cross Product",
        }
    }

    /// Dot and cross are only defined here for exactly two operands.
    pub fn requires_pair(self) -> bool {
        matches!(self, Operation::Dot | Operation::Cross)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalcResult {
    Scalar(f32),
    Vector(Vector3<f32>),
}

impl CalcResult {
    pub fn as_vector(&self) -> Option<&Vector3<f32>> {
        match self {
            CalcResult::Vector(v) => Some(v),
            CalcResult::Scalar(_) => None,
        }
    }
}

impl std::fmt::Display for CalcResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalcResult::Scalar(s) => write!(f, "{:.2}", s),
            CalcResult::Vector(v) => write!(f, "({:.2}, {:.2}, {:.2})", v.x, v.y, v.z),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlgebraError {
    #[error("{op} requires exactly 2 vectors (got {count})")]
    InvalidOperandCount { op: &'static str, count: usize },
}

/// Evaluate `op` over the vector list. Pure: the caller owns storing or
/// clearing the returned result.
pub fn evaluate(
    op: Operation,
    vectors: &[Vector3<f32>],
) -> Result<Option<CalcResult>, AlgebraError> {
    match op {
        Operation::None => Ok(None),
        Operation::Add => {
            let sum = vectors.iter().fold(Vector3::zeros(), |acc, v| acc + v);
            Ok(Some(CalcResult::Vector(sum)))
        }
        Operation::Subtract => {
            // First minus every subsequent vector, strictly left to right.
            let mut iter = vectors.iter();
            let first = iter.next().copied().unwrap_or_else(Vector3::zeros);
            let diff = iter.fold(first, |acc, v| acc - v);
            Ok(Some(CalcResult::Vector(diff)))
        }
        Operation::Dot => {
            let (a, b) = require_pair("Dot product", vectors)?;
            Ok(Some(CalcResult::Scalar(a.dot(&b))))
        }
        Operation::Cross => {
            let (a, b) = require_pair("Cross product", vectors)?;
            Ok(Some(CalcResult::Vector(a.cross(&b))))
        }
    }
}

fn require_pair(
    op: &'static str,
    vectors: &[Vector3<f32>],
) -> Result<(Vector3<f32>, Vector3<f32>), AlgebraError> {
    match vectors {
        [a, b] => Ok((*a, *b)),
        _ => Err(AlgebraError::InvalidOperandCount {
            op,
            count: vectors.len(),
        }),
    }
}

/// Component text inputs coerce anything unparsable (including empty) to 0.
pub fn parse_component(text: &str) -> f32 {
    text.trim().parse::<f32>().unwrap_or(0.0)
}
