//! Input preparation for the two networks. Kept as free functions so the
//! exact pixel scaling stays testable without model files on disk.

use image::{imageops::FilterType, DynamicImage, RgbImage};
use tract_onnx::prelude::*;

pub fn resize_rgb(image: &DynamicImage, side: u32) -> RgbImage {
    image::imageops::resize(&image.to_rgb8(), side, side, FilterType::Triangle)
}

/// NHWC tensor with pixels scaled to [0,1].
pub fn unit_tensor(img: &RgbImage) -> Tensor {
    let (w, h) = img.dimensions();
    tract_ndarray::Array4::from_shape_fn((1, h as usize, w as usize, 3), |(_, y, x, c)| {
        img[(x as u32, y as u32)][c] as f32 / 255.0
    })
    .into()
}

/// NHWC tensor with MobileNetV2 input scaling: [0,255] → [−1,1].
pub fn mobilenet_tensor(img: &RgbImage) -> Tensor {
    let (w, h) = img.dimensions();
    tract_ndarray::Array4::from_shape_fn((1, h as usize, w as usize, 3), |(_, y, x, c)| {
        img[(x as u32, y as u32)][c] as f32 / 127.5 - 1.0
    })
    .into()
}

/// Index and value of the highest score, if any.
pub fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
    scores
        .iter()
        .copied()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn resize_produces_requested_side() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 7, Rgb([10, 20, 30])));
        let resized = resize_rgb(&img, 64);
        assert_eq!(resized.dimensions(), (64, 64));
    }

    #[test]
    fn unit_tensor_scales_into_zero_one() {
        let img = RgbImage::from_pixel(4, 4, Rgb([0, 128, 255]));
        let tensor = unit_tensor(&img);
        assert_eq!(tensor.shape(), &[1, 4, 4, 3]);
        let view = tensor.to_array_view::<f32>().expect("f32 view");
        assert!(view.iter().all(|v| (0.0..=1.0).contains(v)));
        assert!((view[[0, 0, 0, 0]] - 0.0).abs() < 1e-6);
        assert!((view[[0, 0, 0, 2]] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn mobilenet_tensor_scales_into_minus_one_one() {
        let img = RgbImage::from_pixel(2, 2, Rgb([0, 128, 255]));
        let tensor = mobilenet_tensor(&img);
        assert_eq!(tensor.shape(), &[1, 2, 2, 3]);
        let view = tensor.to_array_view::<f32>().expect("f32 view");
        assert!(view.iter().all(|v| (-1.0..=1.0).contains(v)));
        assert!((view[[0, 0, 0, 0]] + 1.0).abs() < 1e-6);
        assert!((view[[0, 0, 0, 2]] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn argmax_picks_highest_score() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), Some((1, 0.7)));
        assert_eq!(argmax(&[0.4]), Some((0, 0.4)));
        assert_eq!(argmax(&[]), None);
    }
}
