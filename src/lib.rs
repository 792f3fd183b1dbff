//! antml - model artifact resolution and tensor filter configuration for
//! streaming inference pipelines.

mod defaults;
pub mod error;

pub mod api;
pub mod config;
pub mod fetch;
pub mod model;
pub mod pipeline;

pub use error::{Error, Result};

pub use api::MlApi;
pub use config::{Environment, ProcessEnvironment, ResolverConfig, StaticEnvironment};

pub use fetch::{
    ArchiveExtractor, Downloader, Extractor, FetchError, FileSystem, HttpDownloader,
    LocalFileSystem,
};

pub use model::{ModelReference, ModelResolutionError, ModelResolver, ResolveOptions, ResolvedModel};

pub use pipeline::{
    build_filter_config, decode_shapes, encode_shape, reduce_max, BufferError, BufferReducer,
    Element, FilterConfig, FilterError, NativeReducer, PropertyElement, ShapeError, StreamApi,
    TensorShape, TensorType, TensorTypeError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
