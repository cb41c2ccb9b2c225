//! Inference wrappers around the pretrained classification networks.
//!
//! The models are loaded once at startup and shared read-only across
//! requests; handlers only ever see the two traits below, so tests can
//! substitute fakes the same way they do for storage.

mod classifier;
mod detector;
pub mod labels;
pub mod preprocess;

pub use classifier::OnnxDishClassifier;
pub use detector::OnnxFoodDetector;

use image::DynamicImage;

#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("invalid image: {0}")]
    InvalidImage(#[from] image::ImageError),
    #[error("model inference failed: {0}")]
    Inference(String),
}

/// Outcome of the binary food-presence check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodCheck {
    pub is_food: bool,
    /// Probability of the winning side, in [0,1].
    pub confidence: f32,
}

/// Arg-max class and probability from the dish classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

pub trait FoodDetector: Send + Sync {
    fn detect(&self, image: &DynamicImage) -> Result<FoodCheck, ClassifyError>;
}

pub trait DishClassifier: Send + Sync {
    fn classify(&self, image: &DynamicImage) -> Result<Classification, ClassifyError>;
}

pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, ClassifyError> {
    Ok(image::load_from_memory(bytes)?)
}

#[cfg(test)]
mod decode_tests {
    use super::*;

    #[test]
    fn rejects_non_image_bytes() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ClassifyError::InvalidImage(_)));
    }

    #[test]
    fn decodes_png_bytes() {
        let mut buf = std::io::Cursor::new(Vec::new());
        let img = image::RgbImage::from_pixel(8, 8, image::Rgb([200, 10, 10]));
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .expect("encode png");
        let decoded = decode_image(buf.get_ref()).expect("decode png");
        assert_eq!(decoded.width(), 8);
        assert_eq!(decoded.height(), 8);
    }
}
