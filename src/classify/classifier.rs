use image::DynamicImage;
use tract_onnx::prelude::*;
use tracing::debug;

use super::labels::DISH_LABELS;
use super::preprocess::{argmax, mobilenet_tensor, resize_rgb};
use super::{Classification, ClassifyError, DishClassifier};

/// Input resolution of the MobileNetV2-based dish network.
pub const DISH_INPUT_SIDE: u32 = 224;

/// Multiclass dish network: 224×224 RGB in, softmax over the label set out.
pub struct OnnxDishClassifier {
    plan: TypedSimplePlan<TypedModel>,
}

impl OnnxDishClassifier {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let plan = tract_onnx::onnx()
            .model_for_path(path)?
            .with_input_fact(
                0,
                f32::fact([1, DISH_INPUT_SIDE as i64, DISH_INPUT_SIDE as i64, 3]).into(),
            )?
            .into_optimized()?
            .into_runnable()?;
        Ok(Self { plan })
    }
}

impl DishClassifier for OnnxDishClassifier {
    fn classify(&self, image: &DynamicImage) -> Result<Classification, ClassifyError> {
        let input = mobilenet_tensor(&resize_rgb(image, DISH_INPUT_SIDE));
        let output = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| ClassifyError::Inference(e.to_string()))?;
        let scores: Vec<f32> = output[0]
            .to_array_view::<f32>()
            .map_err(|e| ClassifyError::Inference(e.to_string()))?
            .iter()
            .copied()
            .collect();

        let (index, confidence) = argmax(&scores)
            .ok_or_else(|| ClassifyError::Inference("empty classifier output".into()))?;
        let label = DISH_LABELS.get(index).ok_or_else(|| {
            ClassifyError::Inference(format!("class index {index} out of range"))
        })?;

        debug!(label = %label, confidence, "dish classified");
        Ok(Classification {
            label: label.to_string(),
            confidence,
        })
    }
}
