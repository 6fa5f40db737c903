use approx::assert_abs_diff_eq;
use blob_l1_loss::{Blob, Device, Error, LayerParameter, LayerRegistry, LayerState};
use std::io::Write;

const L1_BLOCK: &str = r#"{
    "name": "loss",
    "type": "L1Loss",
    "bottom": ["fc8", "label"],
    "top": ["loss"],
    "l1loss_param": { "debug": false }
}"#;

#[test]
fn test_create_and_run_from_json() -> Result<(), Error> {
    let param = LayerParameter::from_json_str(L1_BLOCK)?;
    assert_eq!(param.bottom, vec!["fc8", "label"]);

    let registry = LayerRegistry::<f32>::with_defaults();
    let mut layer = registry.create(&param)?;
    assert_eq!(layer.layer_type(), "L1Loss");
    assert_eq!(layer.exact_num_bottom_blobs(), Some(2));
    assert_eq!(layer.exact_num_top_blobs(), Some(1));
    assert_eq!(layer.loss_weight(0), 1.0);

    let mut a = Blob::<f32>::from_vec(vec![0.5, 1.5, -1.0, 2.0], &[2, 2])?;
    let mut b = Blob::<f32>::from_vec(vec![0.0, 1.0, 1.0, 2.0], &[2, 2])?;
    let mut top = Blob::scalar();
    layer.reshape(&[&a, &b], &mut [&mut top])?;
    let loss = layer.forward(&[&a, &b], &mut [&mut top])?;
    assert_abs_diff_eq!(loss, 1.5, epsilon = 1e-6);

    top.seed_loss_gradient(1.0)?;
    layer.backward(&[&top], &[true, true], &mut [&mut a, &mut b])?;
    assert_eq!(a.diff().to_vec(), vec![0.5, 0.5, -0.5, 0.0]);
    assert_eq!(layer.state(), LayerState::Ready);
    Ok(())
}

#[test]
fn test_create_from_config_file() -> Result<(), Error> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(L1_BLOCK.as_bytes())?;
    file.flush()?;

    let param = LayerParameter::from_json_file(file.path())?;
    assert_eq!(param.name, "loss");
    let layer = LayerRegistry::<f64>::with_defaults().create(&param)?;
    assert_eq!(layer.layer_type(), "L1Loss");
    Ok(())
}

#[test]
fn test_missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = LayerParameter::from_json_file(dir.path().join("missing.json"));
    assert!(matches!(result, Err(Error::IoError(_))));
}

#[test]
fn test_unknown_type_is_rejected() {
    let param = LayerParameter::from_json_str(r#"{ "name": "x", "type": "HingeLoss" }"#).unwrap();
    let result = LayerRegistry::<f32>::with_defaults().create(&param);
    assert!(matches!(result, Err(Error::UnknownLayerType(ref t)) if t == "HingeLoss"));
}

#[test]
fn test_gpu_device_builds_stub_layer() -> Result<(), Error> {
    let mut param = LayerParameter::l1_loss("loss_gpu");
    param.device = Device::Gpu;
    let mut layer = LayerRegistry::<f32>::with_defaults().create(&param)?;

    let a = Blob::<f32>::new(&[1, 3]);
    let mut top = Blob::scalar();
    layer.reshape(&[&a, &a], &mut [&mut top])?;
    assert!(matches!(
        layer.forward(&[&a, &a], &mut [&mut top]),
        Err(Error::Unimplemented(_))
    ));
    Ok(())
}

#[test]
fn test_debug_flag_from_config() -> Result<(), Error> {
    let param = LayerParameter::from_json_str(
        r#"{ "type": "L1Loss", "loss_weight": [0.5], "l1loss_param": { "debug": true } }"#,
    )?;
    let layer = blob_l1_loss::L1LossLayer::<f32>::from_layer_parameter(&param)?;
    assert!(layer.param().debug);
    assert_eq!(layer.num_hooks(), 1);
    Ok(())
}
