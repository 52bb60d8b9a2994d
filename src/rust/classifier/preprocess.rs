use image::imageops::{self, FilterType};
use image::RgbImage;
use ndarray::Array4;

use super::error::ClassifierError;

/// Side length of the square input the network was trained on.
pub const INPUT_SIZE: u32 = 224;
/// Per-channel (R, G, B) mean subtracted after scaling to [0, 1].
pub const CHANNEL_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
/// Per-channel (R, G, B) standard deviation divided out after the mean.
pub const CHANNEL_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Fixed preprocessing applied to every image before inference.
///
/// The resize is direct: images are stretched to `width x height` without
/// preserving their aspect ratio, matching how the network was trained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreprocessConfig {
    pub width: u32,
    pub height: u32,
    pub mean: [f32; 3],
    pub std: [f32; 3],
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            width: INPUT_SIZE,
            height: INPUT_SIZE,
            mean: CHANNEL_MEAN,
            std: CHANNEL_STD,
        }
    }
}

impl PreprocessConfig {
    /// Shape of the single-sample NCHW batch fed to the model.
    pub fn input_shape(&self) -> [usize; 4] {
        [1, 3, self.height as usize, self.width as usize]
    }
}

/// Decodes encoded image bytes and forces a 3-channel RGB representation.
///
/// The format is sniffed from the bytes, so a PNG declared as JPEG still
/// decodes. Anything the decoder rejects is reported as `Decode`.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, ClassifierError> {
    if bytes.is_empty() {
        return Err(ClassifierError::Decode("Image data is empty".into()));
    }
    let image = image::load_from_memory(bytes)?;
    Ok(image.to_rgb8())
}

/// Converts an RGB image into a normalized `(1, 3, height, width)` tensor.
///
/// Steps:
/// 1. Resize to exactly `width x height` with a bilinear (triangle) filter
/// 2. Scale each channel value to [0, 1]
/// 3. Normalize each channel as `(value - mean[c]) / std[c]`
pub fn to_input_tensor(
    image: &RgbImage,
    config: &PreprocessConfig,
) -> Result<Array4<f32>, ClassifierError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(ClassifierError::Preprocess(format!(
            "Image has invalid dimensions {}x{}",
            image.width(),
            image.height()
        )));
    }

    let resized = imageops::resize(image, config.width, config.height, FilterType::Triangle);

    let mut tensor = Array4::<f32>::zeros(config.input_shape());
    for (x, y, pixel) in resized.enumerate_pixels() {
        for channel in 0..3 {
            let value = f32::from(pixel[channel]) / 255.0;
            tensor[[0, channel, y as usize, x as usize]] =
                (value - config.mean[channel]) / config.std[channel];
        }
    }

    Ok(tensor)
}

/// Decodes and preprocesses in one go.
pub fn preprocess(bytes: &[u8], config: &PreprocessConfig) -> Result<Array4<f32>, ClassifierError> {
    let image = decode_image(bytes)?;
    to_input_tensor(&image, config)
}
