use antml::{BufferError, BufferReducer, Error, MlApi, TensorType};

use crate::fixture::{resolver, FakeStream, RecordingDownloader, RecordingExtractor, MODEL_URL};

#[test]
fn test_create_ml_element() {
    let api = MlApi::new(FakeStream { initialized: true });
    let element = api
        .create_ml_element("yolo", [1, 416, 416, 3], "float32", [1, 10647, 85], "float32")
        .unwrap();
    assert_eq!(element.property("input"), Some("1:416:416:3"));
}

#[test]
fn test_create_ml_element_uninitialized() {
    let api = MlApi::new(FakeStream { initialized: false });
    let err = api
        .create_ml_element("yolo", [1], "float32", [1], "float32")
        .unwrap_err();
    assert!(matches!(err, Error::Filter(antml::FilterError::NotInitialized)));
}

#[test]
fn test_max_of_buffer() {
    let api = MlApi::new(FakeStream { initialized: true });
    let buffer: Vec<u8> = [0.1f32, 0.9, 0.3].iter().flat_map(|v| v.to_le_bytes()).collect();

    let max = api.max_of_buffer(&buffer, TensorType::Float32).unwrap();
    assert!((max - 0.9).abs() < 1e-6);

    let err = api.max_of_buffer(&[], TensorType::Uint8).unwrap_err();
    assert!(matches!(err, Error::Buffer(BufferError::Empty)));
}

struct ConstantReducer(f64);

impl BufferReducer for ConstantReducer {
    fn reduce_max(&self, _buffer: &[u8], _ty: TensorType) -> Result<f64, BufferError> {
        Ok(self.0)
    }
}

#[test]
fn test_custom_reducer() {
    let api = MlApi::new(FakeStream { initialized: true }).with_reducer(ConstantReducer(7.0));
    assert_eq!(api.max_of_buffer(&[1], TensorType::Uint8).unwrap(), 7.0);
}

#[test]
fn test_download_model() {
    let root = tempfile::tempdir().unwrap();
    let downloader = RecordingDownloader::default();
    let extractor = RecordingExtractor::default();
    let api = MlApi::new(FakeStream { initialized: true })
        .with_resolver(resolver(root.path(), &downloader, &extractor));

    let first = api.download_model(MODEL_URL, false).unwrap();
    let second = api.download_model(MODEL_URL, false).unwrap();

    assert_eq!(first, second);
    assert_eq!(downloader.calls().len(), 1);
    assert_eq!(extractor.calls().len(), 1);
}

#[test]
fn test_download_model_failure_is_resolution_error() {
    let root = tempfile::tempdir().unwrap();
    let api = MlApi::new(FakeStream { initialized: true }).with_resolver(resolver(
        root.path(),
        &RecordingDownloader::failing(),
        &RecordingExtractor::default(),
    ));

    let err = api.download_model(MODEL_URL, false).unwrap_err();
    assert!(matches!(
        err,
        Error::ModelResolution(antml::ModelResolutionError::DownloadFailed { .. })
    ));
}
