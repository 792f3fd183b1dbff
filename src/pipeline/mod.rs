//! Streaming pipeline integration.
//!
//! This module provides:
//! - Shape encoding for element properties (`shape`)
//! - Tensor element types (`tensor_type`)
//! - Filter element configuration (`filter`)
//! - Raw buffer reductions (`buffer`)

pub mod buffer;
pub mod element;
pub mod filter;
pub mod shape;
pub mod tensor_type;

pub use buffer::{reduce_max, BufferError, BufferReducer, NativeReducer};
pub use element::{Element, PropertyElement, StreamApi};
pub use filter::{build_filter_config, FilterConfig, FilterError};
pub use shape::{decode_shapes, encode_shape, ShapeError, TensorShape};
pub use tensor_type::{TensorType, TensorTypeError};
