//! Reductions over raw tensor buffers.

use thiserror::Error;

use crate::pipeline::tensor_type::TensorType;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Buffer is empty")]
    Empty,

    #[error("Buffer length {len} is not a multiple of the {ty} element size")]
    Misaligned { len: usize, ty: TensorType },
}

/// Numeric reduction capability used by the API facade.
pub trait BufferReducer {
    fn reduce_max(&self, buffer: &[u8], ty: TensorType) -> Result<f64, BufferError>;
}

/// Reducer over little-endian buffers produced by the pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeReducer;

impl BufferReducer for NativeReducer {
    fn reduce_max(&self, buffer: &[u8], ty: TensorType) -> Result<f64, BufferError> {
        reduce_max(buffer, ty)
    }
}

macro_rules! max_of {
    ($buffer:expr, $t:ty) => {
        $buffer
            .chunks_exact(std::mem::size_of::<$t>())
            .map(|chunk| {
                let mut bytes = [0u8; std::mem::size_of::<$t>()];
                bytes.copy_from_slice(chunk);
                <$t>::from_le_bytes(bytes) as f64
            })
            .fold(f64::NAN, f64::max)
    };
}

/// Maximum element of `buffer` interpreted as little-endian `ty` values.
///
/// NaN elements are skipped; a buffer holding only NaN yields NaN. 64-bit
/// integers beyond 2^53 lose precision in the returned value.
pub fn reduce_max(buffer: &[u8], ty: TensorType) -> Result<f64, BufferError> {
    if buffer.is_empty() {
        return Err(BufferError::Empty);
    }
    if buffer.len() % ty.size_in_bytes() != 0 {
        return Err(BufferError::Misaligned {
            len: buffer.len(),
            ty,
        });
    }

    let max = match ty {
        TensorType::Int8 => max_of!(buffer, i8),
        TensorType::Uint8 => max_of!(buffer, u8),
        TensorType::Int16 => max_of!(buffer, i16),
        TensorType::Uint16 => max_of!(buffer, u16),
        TensorType::Int32 => max_of!(buffer, i32),
        TensorType::Uint32 => max_of!(buffer, u32),
        TensorType::Int64 => max_of!(buffer, i64),
        TensorType::Uint64 => max_of!(buffer, u64),
        TensorType::Float32 => max_of!(buffer, f32),
        TensorType::Float64 => max_of!(buffer, f64),
    };
    Ok(max)
}
