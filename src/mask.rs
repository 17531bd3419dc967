use std::any::TypeId;

use anyhow::{anyhow, ensure, Result};
use image::{GrayImage, ImageBuffer, Luma, Pixel, Primitive, Rgb, Rgba};
use ndarray::Array2;
use num_traits::{AsPrimitive, Bounded, NumCast};

pub fn is_floating_point<T: 'static>() -> bool {
    TypeId::of::<T>() == TypeId::of::<f32>()
}

pub fn get_max_value<T: Bounded + NumCast + 'static>() -> T {
    if is_floating_point::<T>() {
        T::from(1.0).unwrap()
    } else {
        T::max_value()
    }
}

/// Convert a boolean background grid into a binary alpha plane: 0 where the
/// grid is true (background), opaque everywhere else. No intermediate values.
pub fn binary_alpha_plane(background: &Array2<bool>) -> GrayImage {
    let (height, width) = background.dim();
    GrayImage::from_fn(width as u32, height as u32, |x, y| {
        Luma([if background[[y as usize, x as usize]] {
            0
        } else {
            u8::MAX
        }])
    })
}

pub trait AlphaMaskApplicable<SI>
where
    SI: Primitive + AsPrimitive<f32> + 'static,
{
    fn apply_alpha_mask<SM>(
        self,
        mask: &ImageBuffer<Luma<SM>, Vec<SM>>,
    ) -> Result<ImageBuffer<Rgba<SI>, Vec<SI>>>
    where
        Rgba<SI>: Pixel<Subpixel = SI>,
        SM: Primitive + AsPrimitive<f32> + 'static,
        f32: AsPrimitive<SM>;
}

impl<SI> AlphaMaskApplicable<SI> for ImageBuffer<Rgb<SI>, Vec<SI>>
where
    Rgb<SI>: Pixel<Subpixel = SI>,
    SI: Primitive + AsPrimitive<f32> + 'static,
    f32: AsPrimitive<SI>,
{
    fn apply_alpha_mask<SM>(
        self,
        mask: &ImageBuffer<Luma<SM>, Vec<SM>>,
    ) -> Result<ImageBuffer<Rgba<SI>, Vec<SI>>>
    where
        Rgba<SI>: Pixel<Subpixel = SI>,
        SM: Primitive + AsPrimitive<f32> + 'static,
        f32: AsPrimitive<SM>,
    {
        ensure!(
            self.dimensions() == mask.dimensions(),
            "Image and mask dimensions do not match"
        );

        let si_max = get_max_value::<SI>().as_();
        let sm_max = get_max_value::<SM>().as_();

        let processed_pixels = self
            .pixels()
            .zip(mask.pixels())
            .flat_map(|(&image_pixel, &mask_pixel)| {
                let Rgb([red, green, blue]) = image_pixel;
                let Luma([alpha]) = mask_pixel;
                let alpha = (alpha.as_() / sm_max * si_max).as_();
                vec![red, green, blue, alpha]
            })
            .collect::<Vec<SI>>();

        ImageBuffer::from_raw(self.width(), self.height(), processed_pixels)
            .ok_or_else(|| anyhow!("Failed to create ImageBuffer from processed pixels"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use ndarray::array;

    #[test]
    fn test_binary_alpha_plane_values() {
        let background = array![[true, false], [false, true]];

        let plane = binary_alpha_plane(&background);

        assert_eq!(plane.dimensions(), (2, 2));
        assert_eq!(plane.get_pixel(0, 0).0, [0]);
        assert_eq!(plane.get_pixel(1, 0).0, [255]);
        assert_eq!(plane.get_pixel(0, 1).0, [255]);
        assert_eq!(plane.get_pixel(1, 1).0, [0]);
    }

    #[test]
    fn test_apply_alpha_mask_keeps_color_channels() {
        let image = RgbImage::from_pixel(2, 1, Rgb([10, 20, 30]));
        let mut mask = GrayImage::from_pixel(2, 1, Luma([255]));
        mask.put_pixel(1, 0, Luma([0]));

        let rgba = image.apply_alpha_mask(&mask).unwrap();

        assert_eq!(rgba.get_pixel(0, 0).0, [10, 20, 30, 255]);
        assert_eq!(rgba.get_pixel(1, 0).0, [10, 20, 30, 0]);
    }

    #[test]
    fn test_apply_alpha_mask_rejects_dimension_mismatch() {
        let image = RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]));
        let mask = GrayImage::from_pixel(3, 3, Luma([255]));

        assert!(image.apply_alpha_mask(&mask).is_err());
    }
}
