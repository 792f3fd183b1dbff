use antml::{build_filter_config, FilterError};

use crate::fixture::FakeStream;

const READY: FakeStream = FakeStream { initialized: true };

#[test]
fn test_filter_element_properties() {
    let element = build_filter_config(
        &READY,
        "ssd_mobilenet_v1",
        [1, 300, 300, 3],
        "uint8",
        [1, 100, 4],
        "float32",
    )
    .unwrap();

    assert_eq!(element.kind(), "tensor_filter");
    assert_eq!(element.properties().len(), 7);
    assert_eq!(element.property("framework"), Some("python3"));
    assert_eq!(element.property("model"), Some("./ml/tvm_nnstreamer.py"));
    assert_eq!(element.property("input"), Some("1:300:300:3"));
    assert_eq!(element.property("inputtype"), Some("uint8"));
    assert_eq!(element.property("output"), Some("1:100:4"));
    assert_eq!(element.property("outputtype"), Some("float32"));
    assert_eq!(
        element.property("custom"),
        Some("ssd_mobilenet_v1 1:300:300:3 uint8 1:100:4 float32")
    );
}

#[test]
fn test_space_in_model_name() {
    let err = build_filter_config(&READY, "ssd mobilenet", [1], "uint8", [1], "float32")
        .unwrap_err();
    assert!(matches!(err, FilterError::InvalidArgument { field: "modelName", .. }));
}

#[test]
fn test_space_in_types() {
    let err = build_filter_config(&READY, "m", [1], "uint 8", [1], "float32").unwrap_err();
    assert!(matches!(err, FilterError::InvalidArgument { field: "inputType", .. }));

    let err = build_filter_config(&READY, "m", [1], "uint8", [1], "float 32").unwrap_err();
    assert!(matches!(err, FilterError::InvalidArgument { field: "outputType", .. }));
}

#[test]
fn test_space_in_shape_tokens() {
    let err = build_filter_config(&READY, "m", ["1 "], "uint8", ["1"], "float32").unwrap_err();
    assert!(matches!(err, FilterError::InvalidArgument { field: "inputShape", .. }));

    let err = build_filter_config(&READY, "m", ["1"], "uint8", [" "], "float32").unwrap_err();
    assert!(matches!(err, FilterError::InvalidArgument { field: "outputShape", .. }));
}

#[test]
fn test_uninitialized_stream() {
    let stream = FakeStream { initialized: false };
    let err = build_filter_config(&stream, "m", [1], "uint8", [1], "float32").unwrap_err();
    assert_eq!(err, FilterError::NotInitialized);
}

#[test]
fn test_invalid_argument_reported_before_initialization() {
    let stream = FakeStream { initialized: false };
    let err = build_filter_config(&stream, "a b", [1], "uint8", [1], "float32").unwrap_err();
    assert!(matches!(err, FilterError::InvalidArgument { .. }));
}
