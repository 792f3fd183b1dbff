//! ML API facade.
//!
//! Bundles the stream capability, buffer reduction and model resolution
//! behind one handle, the way applications consume them.

use std::fmt;
use std::path::PathBuf;

use crate::error::Result;
use crate::model::ModelResolver;
use crate::pipeline::{build_filter_config, BufferReducer, NativeReducer, StreamApi, TensorType};

pub struct MlApi<S: StreamApi> {
    stream: S,
    reducer: Box<dyn BufferReducer>,
    resolver: ModelResolver,
}

impl<S: StreamApi> MlApi<S> {
    /// Create an API over `stream` with the default reducer and resolver.
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            reducer: Box::new(NativeReducer),
            resolver: ModelResolver::new(),
        }
    }

    pub fn with_resolver(mut self, resolver: ModelResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_reducer(mut self, reducer: impl BufferReducer + 'static) -> Self {
        self.reducer = Box::new(reducer);
        self
    }

    pub fn stream(&self) -> &S {
        &self.stream
    }

    pub fn resolver(&self) -> &ModelResolver {
        &self.resolver
    }

    /// Create a tensor filter element running `model_name`.
    pub fn create_ml_element<I, O>(
        &self,
        model_name: &str,
        input_shape: I,
        input_type: &str,
        output_shape: O,
        output_type: &str,
    ) -> Result<S::Element>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
        O: IntoIterator,
        O::Item: fmt::Display,
    {
        Ok(build_filter_config(
            &self.stream,
            model_name,
            input_shape,
            input_type,
            output_shape,
            output_type,
        )?)
    }

    pub fn max_of_buffer(&self, buffer: &[u8], ty: TensorType) -> Result<f64> {
        Ok(self.reducer.reduce_max(buffer, ty)?)
    }

    /// Download and extract the model at `model_url` if needed.
    pub fn download_model(&self, model_url: &str, overwrite_if_exists: bool) -> Result<PathBuf> {
        Ok(self.resolver.resolve_model(model_url, overwrite_if_exists)?)
    }
}
