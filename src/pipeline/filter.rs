//! Tensor filter element configuration.
//!
//! A filter element runs a model through the python filter script. The model
//! name and tensor metadata are passed both as individual properties and as
//! one space-separated `custom` string, so no token may contain a space.

use std::fmt;

use thiserror::Error;

use crate::defaults::{FILTER_ELEMENT_KIND, FILTER_FRAMEWORK, FILTER_MODEL_SCRIPT};
use crate::pipeline::element::{Element, StreamApi};
use crate::pipeline::shape::encode_shape;

pub const PROP_FRAMEWORK: &str = "framework";
pub const PROP_MODEL: &str = "model";
pub const PROP_INPUT: &str = "input";
pub const PROP_INPUT_TYPE: &str = "inputtype";
pub const PROP_OUTPUT: &str = "output";
pub const PROP_OUTPUT_TYPE: &str = "outputtype";
pub const PROP_CUSTOM: &str = "custom";

/// Errors that can occur while building a filter element.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid {field}: '{value}' contains a space")]
    InvalidArgument { field: &'static str, value: String },

    #[error("Stream API is not initialized")]
    NotInitialized,
}

/// Validated property set for a tensor filter element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    model_name: String,
    input_shape: String,
    input_type: String,
    output_shape: String,
    output_type: String,
}

impl FilterConfig {
    /// Validate the arguments and encode both shapes.
    pub fn new<I, O>(
        model_name: &str,
        input_shape: I,
        input_type: &str,
        output_shape: O,
        output_type: &str,
    ) -> Result<Self, FilterError>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
        O: IntoIterator,
        O::Item: fmt::Display,
    {
        let input_dims = collect_tokens(input_shape);
        let output_dims = collect_tokens(output_shape);

        check_token("modelName", model_name)?;
        for dim in &input_dims {
            check_token("inputShape", dim)?;
        }
        check_token("inputType", input_type)?;
        for dim in &output_dims {
            check_token("outputShape", dim)?;
        }
        check_token("outputType", output_type)?;

        Ok(Self {
            model_name: model_name.to_string(),
            input_shape: encode_shape(&input_dims),
            input_type: input_type.to_string(),
            output_shape: encode_shape(&output_dims),
            output_type: output_type.to_string(),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn input_shape(&self) -> &str {
        &self.input_shape
    }

    pub fn output_shape(&self) -> &str {
        &self.output_shape
    }

    /// Composite argument string consumed by the filter script.
    pub fn custom(&self) -> String {
        [
            self.model_name.as_str(),
            self.input_shape.as_str(),
            self.input_type.as_str(),
            self.output_shape.as_str(),
            self.output_type.as_str(),
        ]
        .join(" ")
    }

    /// Property key/value pairs in the order they are applied.
    pub fn properties(&self) -> Vec<(&'static str, String)> {
        vec![
            (PROP_FRAMEWORK, FILTER_FRAMEWORK.to_string()),
            (PROP_MODEL, FILTER_MODEL_SCRIPT.to_string()),
            (PROP_INPUT, self.input_shape.clone()),
            (PROP_INPUT_TYPE, self.input_type.clone()),
            (PROP_OUTPUT, self.output_shape.clone()),
            (PROP_OUTPUT_TYPE, self.output_type.clone()),
            (PROP_CUSTOM, self.custom()),
        ]
    }

    pub fn apply<E: Element>(&self, element: &mut E) {
        for (key, value) in self.properties() {
            element.set_property(key, &value);
        }
    }
}

/// Create a tensor filter element configured for `model_name`.
pub fn build_filter_config<S, I, O>(
    stream: &S,
    model_name: &str,
    input_shape: I,
    input_type: &str,
    output_shape: O,
    output_type: &str,
) -> Result<S::Element, FilterError>
where
    S: StreamApi,
    I: IntoIterator,
    I::Item: fmt::Display,
    O: IntoIterator,
    O::Item: fmt::Display,
{
    let config = FilterConfig::new(model_name, input_shape, input_type, output_shape, output_type)
        .map_err(|e| {
            log::error!("{}", e);
            e
        })?;

    if !stream.is_initialized() {
        log::error!("Stream API is not initialized");
        return Err(FilterError::NotInitialized);
    }

    let mut element = stream.create_element(FILTER_ELEMENT_KIND);
    config.apply(&mut element);
    log::debug!(
        "Created {} for model {} ({})",
        FILTER_ELEMENT_KIND,
        config.model_name(),
        config.custom()
    );
    Ok(element)
}

fn collect_tokens<I>(dims: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    dims.into_iter().map(|d| d.to_string()).collect()
}

fn check_token(field: &'static str, value: &str) -> Result<(), FilterError> {
    if value.contains(' ') {
        return Err(FilterError::InvalidArgument {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
