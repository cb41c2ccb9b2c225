use image::DynamicImage;
use tract_onnx::prelude::*;
use tracing::debug;

use super::preprocess::{resize_rgb, unit_tensor};
use super::{ClassifyError, FoodCheck, FoodDetector};

/// Input resolution the food-presence network was trained on.
pub const FOOD_INPUT_SIDE: u32 = 64;

/// Binary food/not-food network: 64×64 RGB in, single sigmoid out.
pub struct OnnxFoodDetector {
    plan: TypedSimplePlan<TypedModel>,
}

impl OnnxFoodDetector {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let plan = tract_onnx::onnx()
            .model_for_path(path)?
            .with_input_fact(
                0,
                f32::fact([1, FOOD_INPUT_SIDE as i64, FOOD_INPUT_SIDE as i64, 3]).into(),
            )?
            .into_optimized()?
            .into_runnable()?;
        Ok(Self { plan })
    }
}

impl FoodDetector for OnnxFoodDetector {
    fn detect(&self, image: &DynamicImage) -> Result<FoodCheck, ClassifyError> {
        let input = unit_tensor(&resize_rgb(image, FOOD_INPUT_SIDE));
        let output = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| ClassifyError::Inference(e.to_string()))?;
        let p = output[0]
            .to_array_view::<f32>()
            .map_err(|e| ClassifyError::Inference(e.to_string()))?
            .iter()
            .copied()
            .next()
            .ok_or_else(|| ClassifyError::Inference("empty detector output".into()))?;

        let is_food = p >= 0.5;
        let confidence = if is_food { p } else { 1.0 - p };
        debug!(probability = p, is_food, "food presence check");
        Ok(FoodCheck {
            is_food,
            confidence,
        })
    }
}
