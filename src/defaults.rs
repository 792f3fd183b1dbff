//! Default values for model resolution and filter configuration.

pub const ROOT_ENV_VAR: &str = "ANT_ROOT";
pub const MODEL_SUBDIR: &str = "ml";

pub const FILTER_ELEMENT_KIND: &str = "tensor_filter";
pub const FILTER_FRAMEWORK: &str = "python3";
pub const FILTER_MODEL_SCRIPT: &str = "./ml/tvm_nnstreamer.py";

pub const DOWNLOAD_TIMEOUT_SECS: u64 = 600;
pub const PARTIAL_DOWNLOAD_EXTENSION: &str = "part";

pub fn root_env_var() -> String { ROOT_ENV_VAR.to_string() }
pub fn model_subdir() -> String { MODEL_SUBDIR.to_string() }
