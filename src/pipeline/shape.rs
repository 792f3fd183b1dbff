//! Tensor shape encoding for filter element properties.
//!
//! Shapes travel through element configuration as colon-delimited strings
//! (`1:3:224:224`). Multiple tensors are separated by commas on the filter
//! script side (`1:100:1,1:100:4`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DIM_SEPARATOR: char = ':';
const SHAPE_SEPARATOR: char = ',';

/// Errors that can occur while parsing an encoded shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Shape string is empty")]
    Empty,

    #[error("Invalid dimension '{token}' in shape '{shape}'")]
    InvalidDimension { shape: String, token: String },
}

/// Join dimension values with `:`.
///
/// No validation is performed; callers must not pass values containing the
/// separator or spaces.
pub fn encode_shape<I>(dimensions: I) -> String
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    let mut encoded = String::new();
    for (i, dim) in dimensions.into_iter().enumerate() {
        if i > 0 {
            encoded.push(DIM_SEPARATOR);
        }
        encoded.push_str(&dim.to_string());
    }
    encoded
}

/// Parse a comma-separated list of encoded shapes.
pub fn decode_shapes(encoded: &str) -> Result<Vec<TensorShape>, ShapeError> {
    encoded.split(SHAPE_SEPARATOR).map(str::parse).collect()
}

/// Ordered tensor dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TensorShape(Vec<usize>);

impl TensorShape {
    pub fn new(dims: Vec<usize>) -> Self {
        Self(dims)
    }

    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Number of elements described by the shape, `None` on overflow.
    pub fn element_count(&self) -> Option<usize> {
        self.0.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
    }
}

impl From<Vec<usize>> for TensorShape {
    fn from(dims: Vec<usize>) -> Self {
        Self(dims)
    }
}

impl fmt::Display for TensorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_shape(&self.0))
    }
}

impl FromStr for TensorShape {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ShapeError::Empty);
        }

        s.split(DIM_SEPARATOR)
            .map(|token| {
                token
                    .parse::<usize>()
                    .map_err(|_| ShapeError::InvalidDimension {
                        shape: s.to_string(),
                        token: token.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}
