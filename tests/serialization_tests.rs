#![cfg(feature = "serialization")]

use blob_l1_loss::{Array, Blob};

#[test]
fn test_blob_json_keeps_data_and_diff() {
    let mut blob = Blob::<f32>::from_vec(vec![1.0, -2.0, 3.5, 0.0], &[2, 2]).unwrap();
    blob.diff_mut().fill(0.25);

    let json = serde_json::to_string(&blob).unwrap();
    let restored: Blob<f32> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, blob);
    assert_eq!(restored.shape(), &[2, 2]);
    assert_eq!(restored.diff().to_vec(), vec![0.25; 4]);
}

#[test]
fn test_scalar_array_json() {
    let array = Array::<f64>::from_vec(vec![5.0], &[]).unwrap();
    let json = serde_json::to_string(&array).unwrap();
    let restored: Array<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.shape(), &[] as &[usize]);
    assert_eq!(restored.to_vec(), vec![5.0]);
}
