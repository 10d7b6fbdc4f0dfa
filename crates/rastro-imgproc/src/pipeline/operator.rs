use rastro_image::{AnyImage, Image, ImageError, ImageSize};

use crate::color::{adjust_hsv, gray_from_rgb_u8, sepia};
use crate::core::{logical_combine, LogicalOp};
use crate::enhance::{adjust_brightness_contrast, blend};
use crate::filter::{filter2d, median_blur, Kernel};
use crate::flip::{flip, FlipAxis};
use crate::interpolation::InterpolationMode;
use crate::resize::resize_native;
use crate::warp::{rotate, translate, warp_affine, warp_quad, QuadPoints};

use super::effects::{cartoon, watercolor};

/// An image operator together with its parameters.
///
/// Every operator is a pure function of its inputs: [`Operator::apply`] never
/// modifies the given images and returns a new one. Geometric operators sample
/// bilinearly.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "name", rename_all = "snake_case")
)]
pub enum Operator {
    /// Convert a color image to gray. Gray images pass through.
    Grayscale,
    /// Apply the sepia tone to a color image.
    Sepia,
    /// Shift hue, saturation and value of a color image.
    HsvAdjust {
        /// Hue offset in two-degree steps, wraps around.
        hue: i32,
        /// Saturation offset, clamped.
        sat: i32,
        /// Value offset, clamped.
        val: i32,
    },
    /// Scale samples by `(contrast + 100) / 100` and add `brightness`.
    BrightnessContrast {
        /// Offset added to every sample.
        brightness: f32,
        /// Contrast in percent, greater than -100.
        contrast: f32,
    },
    /// Combine the primary and the secondary image bitwise.
    LogicalCombine {
        /// The bitwise operation.
        op: LogicalOp,
    },
    /// Resize to an explicit width and height.
    Scale {
        /// Output width in pixels.
        width: i64,
        /// Output height in pixels.
        height: i64,
    },
    /// Move the content by `(dx, dy)` pixels.
    Translate {
        /// Horizontal offset.
        dx: f32,
        /// Vertical offset.
        dy: f32,
    },
    /// Rotate counter-clockwise about a pivot.
    Rotate {
        /// Angle in degrees.
        angle: f32,
        /// Pivot column.
        center_x: f32,
        /// Pivot row.
        center_y: f32,
    },
    /// Mirror the image.
    Flip {
        /// The mirror axis.
        axis: FlipAxis,
    },
    /// Project the image corners onto a quadrilateral of a new canvas.
    ProjectiveWarp {
        /// Destination corners: top-left, top-right, bottom-right, bottom-left.
        points: QuadPoints,
        /// Canvas width in pixels.
        out_width: i64,
        /// Canvas height in pixels.
        out_height: i64,
    },
    /// Median filter with a square window.
    MedianBlur {
        /// Odd window side.
        kernel_size: usize,
    },
    /// Linear filter with an arbitrary kernel.
    Convolve {
        /// The filter kernel, applied without normalization.
        kernel: Kernel,
    },
    /// Brightness/contrast on the primary image blended over the secondary one.
    Watercolor {
        /// Offset added to the primary image.
        brightness: f32,
        /// Contrast of the primary image in percent.
        contrast: f32,
        /// Weight of the primary image in `[0, 1]`.
        alpha: f32,
    },
    /// Flat colors outlined by adaptive threshold edges.
    Cartoon {
        /// Constant subtracted from the local mean when extracting edges.
        threshold: f32,
    },
    /// Warp with a 2x3 affine matrix, keeping the canvas size.
    AffineWarp {
        /// Row-major 2x3 matrix mapping source to destination.
        matrix: [f32; 6],
    },
    /// Weighted blend of the primary and the secondary image.
    Blend {
        /// Weight of the primary image in `[0, 1]`.
        alpha: f32,
    },
    /// Extract one channel as a gray image.
    Channel {
        /// Channel index.
        index: usize,
    },
}

// run the same generic expression on the gray or the color image
macro_rules! map_any {
    ($image:expr, |$img:ident| $body:expr) => {
        match $image {
            AnyImage::Gray($img) => AnyImage::Gray($body?),
            AnyImage::Rgb($img) => AnyImage::Rgb($body?),
        }
    };
}

// widest per-pixel buffer a canvas allocates: one f32 per sampling grid axis
const MAX_BYTES_PER_PIXEL: usize = std::mem::size_of::<f32>();

fn canvas_size(width: i64, height: i64) -> Result<ImageSize, ImageError> {
    let invalid = ImageError::InvalidImageDimensions(width, height);
    if width <= 0 || height <= 0 {
        return Err(invalid);
    }

    let (Ok(w), Ok(h)) = (usize::try_from(width), usize::try_from(height)) else {
        return Err(invalid);
    };

    // every buffer must stay addressable
    let bytes = w
        .checked_mul(h)
        .and_then(|pixels| pixels.checked_mul(MAX_BYTES_PER_PIXEL));
    match bytes {
        Some(bytes) if bytes <= isize::MAX as usize => Ok(ImageSize {
            width: w,
            height: h,
        }),
        _ => Err(invalid),
    }
}

fn color_only<'a>(name: &'static str, image: &'a AnyImage) -> Result<&'a Image<u8, 3>, ImageError> {
    match image {
        AnyImage::Rgb(img) => Ok(img),
        AnyImage::Gray(_) => Err(ImageError::UnsupportedChannelCount(name, 1)),
    }
}

impl Operator {
    /// The snake case name of the operator.
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Grayscale => "grayscale",
            Operator::Sepia => "sepia",
            Operator::HsvAdjust { .. } => "hsv_adjust",
            Operator::BrightnessContrast { .. } => "brightness_contrast",
            Operator::LogicalCombine { .. } => "logical_combine",
            Operator::Scale { .. } => "scale",
            Operator::Translate { .. } => "translate",
            Operator::Rotate { .. } => "rotate",
            Operator::Flip { .. } => "flip",
            Operator::ProjectiveWarp { .. } => "projective_warp",
            Operator::MedianBlur { .. } => "median_blur",
            Operator::Convolve { .. } => "convolve",
            Operator::Watercolor { .. } => "watercolor",
            Operator::Cartoon { .. } => "cartoon",
            Operator::AffineWarp { .. } => "affine_warp",
            Operator::Blend { .. } => "blend",
            Operator::Channel { .. } => "channel",
        }
    }

    /// Whether [`Operator::apply`] reads a secondary image.
    pub fn needs_secondary(&self) -> bool {
        match self {
            Operator::LogicalCombine { op } => op.is_binary(),
            Operator::Watercolor { .. } | Operator::Blend { .. } => true,
            _ => false,
        }
    }

    /// Apply the operator.
    ///
    /// # Arguments
    ///
    /// * `primary` - The image to transform.
    /// * `secondary` - The second operand of binary operators, ignored otherwise.
    ///
    /// # Errors
    ///
    /// * [`ImageError::MissingOperand`] if a binary operator gets no secondary image.
    /// * [`ImageError::ChannelCountMismatch`] or [`ImageError::InvalidImageSize`]
    ///   if the two operands differ in shape.
    /// * [`ImageError::UnsupportedChannelCount`] for color-only operators on gray images.
    /// * Any error of the underlying operation.
    pub fn apply(
        &self,
        primary: &AnyImage,
        secondary: Option<&AnyImage>,
    ) -> Result<AnyImage, ImageError> {
        let size = primary.size();
        log::debug!(
            "applying {} to {}x{}x{} image",
            self.name(),
            size.width,
            size.height,
            primary.num_channels()
        );

        let mode = InterpolationMode::Bilinear;

        let out = match self {
            Operator::Grayscale => match primary {
                AnyImage::Gray(img) => AnyImage::Gray(img.clone()),
                AnyImage::Rgb(img) => AnyImage::Gray(gray_from_rgb_u8(img)?),
            },
            Operator::Sepia => AnyImage::Rgb(sepia(color_only(self.name(), primary)?)?),
            Operator::HsvAdjust { hue, sat, val } => AnyImage::Rgb(adjust_hsv(
                color_only(self.name(), primary)?,
                *hue,
                *sat,
                *val,
            )?),
            Operator::BrightnessContrast {
                brightness,
                contrast,
            } => map_any!(primary, |img| adjust_brightness_contrast(
                img,
                *brightness,
                *contrast
            )),
            Operator::LogicalCombine { op } => {
                let other = if op.is_binary() {
                    self.secondary_operand(primary, secondary)?
                } else {
                    primary
                };
                match (primary, other) {
                    (AnyImage::Gray(a), AnyImage::Gray(b)) => {
                        AnyImage::Gray(logical_combine(a, b, *op)?)
                    }
                    (AnyImage::Rgb(a), AnyImage::Rgb(b)) => {
                        AnyImage::Rgb(logical_combine(a, b, *op)?)
                    }
                    (a, b) => {
                        return Err(ImageError::ChannelCountMismatch(
                            a.num_channels(),
                            b.num_channels(),
                        ))
                    }
                }
            }
            Operator::Scale { width, height } => {
                let new_size = canvas_size(*width, *height)?;
                map_any!(primary, |img| resize_native(img, new_size, mode))
            }
            Operator::Translate { dx, dy } => {
                map_any!(primary, |img| translate(img, *dx, *dy, mode))
            }
            Operator::Rotate {
                angle,
                center_x,
                center_y,
            } => map_any!(primary, |img| rotate(
                img,
                *angle,
                (*center_x, *center_y),
                mode
            )),
            Operator::Flip { axis } => map_any!(primary, |img| flip(img, *axis)),
            Operator::ProjectiveWarp {
                points,
                out_width,
                out_height,
            } => {
                let new_size = canvas_size(*out_width, *out_height)?;
                map_any!(primary, |img| warp_quad(img, points, new_size, mode))
            }
            Operator::MedianBlur { kernel_size } => {
                map_any!(primary, |img| median_blur(img, *kernel_size))
            }
            Operator::Convolve { kernel } => map_any!(primary, |img| filter2d(img, kernel)),
            Operator::Watercolor {
                brightness,
                contrast,
                alpha,
            } => match (primary, self.secondary_operand(primary, secondary)?) {
                (AnyImage::Gray(a), AnyImage::Gray(b)) => {
                    AnyImage::Gray(watercolor(a, b, *brightness, *contrast, *alpha)?)
                }
                (AnyImage::Rgb(a), AnyImage::Rgb(b)) => {
                    AnyImage::Rgb(watercolor(a, b, *brightness, *contrast, *alpha)?)
                }
                (a, b) => {
                    return Err(ImageError::ChannelCountMismatch(
                        a.num_channels(),
                        b.num_channels(),
                    ))
                }
            },
            Operator::Cartoon { threshold } => {
                AnyImage::Rgb(cartoon(color_only(self.name(), primary)?, *threshold)?)
            }
            Operator::AffineWarp { matrix } => {
                map_any!(primary, |img| warp_affine(img, matrix, img.size(), mode))
            }
            Operator::Blend { alpha } => {
                match (primary, self.secondary_operand(primary, secondary)?) {
                    (AnyImage::Gray(a), AnyImage::Gray(b)) => AnyImage::Gray(blend(a, b, *alpha)?),
                    (AnyImage::Rgb(a), AnyImage::Rgb(b)) => AnyImage::Rgb(blend(a, b, *alpha)?),
                    (a, b) => {
                        return Err(ImageError::ChannelCountMismatch(
                            a.num_channels(),
                            b.num_channels(),
                        ))
                    }
                }
            }
            Operator::Channel { index } => match primary {
                AnyImage::Gray(img) => AnyImage::Gray(img.channel(*index)?),
                AnyImage::Rgb(img) => AnyImage::Gray(img.channel(*index)?),
            },
        };

        Ok(out)
    }

    fn secondary_operand<'a>(
        &self,
        primary: &AnyImage,
        secondary: Option<&'a AnyImage>,
    ) -> Result<&'a AnyImage, ImageError> {
        let other = secondary.ok_or(ImageError::MissingOperand(self.name()))?;
        if primary.num_channels() != other.num_channels() {
            return Err(ImageError::ChannelCountMismatch(
                primary.num_channels(),
                other.num_channels(),
            ));
        }
        Ok(other)
    }
}

#[cfg(test)]
mod tests {
    use rastro_image::{AnyImage, ErrorKind, Image, ImageError};

    use super::Operator;
    use crate::core::LogicalOp;
    use crate::filter::Kernel;
    use crate::flip::FlipAxis;

    fn rgb() -> Result<AnyImage, ImageError> {
        let img = Image::<u8, 3>::from_size_fn([6, 4].into(), |x, y, c| (x * 40 + y * 10 + c * 3) as u8)?;
        Ok(AnyImage::from(img))
    }

    fn gray() -> Result<AnyImage, ImageError> {
        let img = Image::<u8, 1>::from_size_fn([6, 4].into(), |x, y, _| (x * 40 + y * 10) as u8)?;
        Ok(AnyImage::from(img))
    }

    #[test]
    fn apply_does_not_mutate_input() -> Result<(), ImageError> {
        let image = rgb()?;
        let before = image.clone();
        let _ = Operator::Sepia.apply(&image, None)?;
        let _ = Operator::Flip {
            axis: FlipAxis::Horizontal,
        }
        .apply(&image, None)?;
        assert_eq!(image, before);
        Ok(())
    }

    #[test]
    fn grayscale_changes_channel_count() -> Result<(), ImageError> {
        let out = Operator::Grayscale.apply(&rgb()?, None)?;
        assert_eq!(out.num_channels(), 1);
        assert_eq!(out.size(), rgb()?.size());

        let g = gray()?;
        assert_eq!(Operator::Grayscale.apply(&g, None)?, g);
        Ok(())
    }

    #[test]
    fn color_only_operators_reject_gray() -> Result<(), ImageError> {
        let g = gray()?;
        for op in [
            Operator::Sepia,
            Operator::HsvAdjust {
                hue: 1,
                sat: 0,
                val: 0,
            },
            Operator::Cartoon { threshold: 2.0 },
        ] {
            let err = op.apply(&g, None).err();
            assert_eq!(err, Some(ImageError::UnsupportedChannelCount(op.name(), 1)));
        }
        Ok(())
    }

    #[test]
    fn binary_operators_need_secondary() -> Result<(), ImageError> {
        let image = rgb()?;
        let op = Operator::LogicalCombine { op: LogicalOp::And };
        assert_eq!(
            op.apply(&image, None),
            Err(ImageError::MissingOperand("logical_combine"))
        );
        assert!(op.needs_secondary());

        let not = Operator::LogicalCombine { op: LogicalOp::Not };
        assert!(!not.needs_secondary());
        assert_eq!(not.apply(&image, None)?.num_channels(), 3);

        let blend = Operator::Blend { alpha: 0.5 };
        assert_eq!(
            blend.apply(&image, None).map_err(|e| e.kind()),
            Err(ErrorKind::ShapeMismatch)
        );
        Ok(())
    }

    #[test]
    fn binary_operators_check_channels() -> Result<(), ImageError> {
        let op = Operator::Watercolor {
            brightness: 0.0,
            contrast: 0.0,
            alpha: 0.5,
        };
        assert_eq!(
            op.apply(&rgb()?, Some(&gray()?)),
            Err(ImageError::ChannelCountMismatch(3, 1))
        );
        Ok(())
    }

    #[test]
    fn logical_combine_size_mismatch() -> Result<(), ImageError> {
        let a = AnyImage::from(Image::<u8, 3>::from_size_val([10, 10].into(), 1)?);
        let b = AnyImage::from(Image::<u8, 3>::from_size_val([5, 5].into(), 1)?);
        let err = Operator::LogicalCombine { op: LogicalOp::Or }
            .apply(&a, Some(&b))
            .map_err(|e| e.kind());
        assert_eq!(err, Err(ErrorKind::ShapeMismatch));
        Ok(())
    }

    #[test]
    fn scale_rejects_non_positive() -> Result<(), ImageError> {
        let image = rgb()?;
        assert_eq!(
            Operator::Scale {
                width: -4,
                height: 3
            }
            .apply(&image, None),
            Err(ImageError::InvalidImageDimensions(-4, 3))
        );

        let out = Operator::Scale {
            width: 12,
            height: 2,
        }
        .apply(&image, None)?;
        assert_eq!(out.size(), [12, 2].into());
        Ok(())
    }

    #[test]
    fn scale_rejects_unaddressable_canvas() -> Result<(), ImageError> {
        let image = gray()?;
        let huge = 1i64 << 40;
        assert_eq!(
            Operator::Scale {
                width: huge,
                height: huge
            }
            .apply(&image, None),
            Err(ImageError::InvalidImageDimensions(huge, huge))
        );
        assert_eq!(
            Operator::ProjectiveWarp {
                points: [[0, 0], [10, 0], [10, 10], [0, 10]],
                out_width: i64::MAX,
                out_height: 2,
            }
            .apply(&image, None),
            Err(ImageError::InvalidImageDimensions(i64::MAX, 2))
        );
        Ok(())
    }

    #[test]
    fn every_operator_handles_zero_width() -> Result<(), ImageError> {
        let rgb = AnyImage::from(Image::<u8, 3>::new([0, 5].into(), vec![])?);
        let gray = AnyImage::from(Image::<u8, 1>::new([0, 5].into(), vec![])?);

        let catalog = [
            Operator::Grayscale,
            Operator::Sepia,
            Operator::HsvAdjust {
                hue: 10,
                sat: 5,
                val: -5,
            },
            Operator::BrightnessContrast {
                brightness: 1.0,
                contrast: 0.0,
            },
            Operator::LogicalCombine { op: LogicalOp::Xor },
            Operator::LogicalCombine { op: LogicalOp::Not },
            Operator::Translate { dx: 1.0, dy: 2.0 },
            Operator::Rotate {
                angle: 30.0,
                center_x: 0.0,
                center_y: 2.0,
            },
            Operator::Flip {
                axis: FlipAxis::Horizontal,
            },
            Operator::Flip {
                axis: FlipAxis::Vertical,
            },
            Operator::MedianBlur { kernel_size: 5 },
            Operator::Convolve {
                kernel: Kernel::box_filter(3)?,
            },
            Operator::Watercolor {
                brightness: 10.0,
                contrast: 20.0,
                alpha: 0.5,
            },
            Operator::Cartoon { threshold: 2.0 },
            Operator::AffineWarp {
                matrix: [1.0, 0.0, 1.0, 0.0, 1.0, 1.0],
            },
            Operator::Blend { alpha: 0.3 },
        ];

        for op in &catalog {
            let out = op.apply(&rgb, Some(&rgb))?;
            assert_eq!(out.size(), rgb.size(), "{}", op.name());
        }

        let out = Operator::Channel { index: 2 }.apply(&rgb, None)?;
        assert_eq!(out.size(), [0, 5].into());
        assert_eq!(
            Operator::BrightnessContrast {
                brightness: 1.0,
                contrast: 0.0
            }
            .apply(&gray, None)?,
            gray
        );

        // an empty source has nothing to resample
        let scale = Operator::Scale {
            width: 4,
            height: 4,
        };
        assert_eq!(
            scale.apply(&rgb, None),
            Err(ImageError::InvalidImageDimensions(0, 5))
        );
        let warp = Operator::ProjectiveWarp {
            points: [[0, 0], [10, 0], [10, 10], [0, 10]],
            out_width: 16,
            out_height: 16,
        };
        assert_eq!(
            warp.apply(&rgb, None),
            Err(ImageError::InvalidImageDimensions(0, 5))
        );
        Ok(())
    }

    #[test]
    fn affine_singular_matrix() -> Result<(), ImageError> {
        let err = Operator::AffineWarp {
            matrix: [1.0, 2.0, 0.0, 2.0, 4.0, 0.0],
        }
        .apply(&gray()?, None);
        assert_eq!(err, Err(ImageError::CannotComputeDeterminant));
        assert_eq!(
            err.map_err(|e| e.kind()),
            Err(ErrorKind::InvalidParameter)
        );
        Ok(())
    }

    #[test]
    fn projective_warp_collinear() -> Result<(), ImageError> {
        let op = Operator::ProjectiveWarp {
            points: [[0, 0], [5, 5], [10, 10], [20, 20]],
            out_width: 32,
            out_height: 32,
        };
        assert_eq!(op.apply(&rgb()?, None), Err(ImageError::DegenerateQuad));
        Ok(())
    }

    #[test]
    fn median_blur_even_kernel() -> Result<(), ImageError> {
        let err = Operator::MedianBlur { kernel_size: 4 }
            .apply(&gray()?, None)
            .map_err(|e| e.kind());
        assert_eq!(err, Err(ErrorKind::InvalidParameter));
        Ok(())
    }

    #[test]
    fn convolve_identity_and_channel() -> Result<(), ImageError> {
        let image = rgb()?;
        let out = Operator::Convolve {
            kernel: Kernel::identity(),
        }
        .apply(&image, None)?;
        assert_eq!(out, image);

        let green = Operator::Channel { index: 1 }.apply(&image, None)?;
        assert_eq!(green.num_channels(), 1);
        assert_eq!(green.get(2, 1, 0)?, image.get(2, 1, 1)?);

        let err = Operator::Channel { index: 3 }
            .apply(&image, None)
            .map_err(|e| e.kind());
        assert_eq!(err, Err(ErrorKind::OutOfBounds));
        Ok(())
    }

    #[test]
    fn affine_identity() -> Result<(), ImageError> {
        let image = gray()?;
        let out = Operator::AffineWarp {
            matrix: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        }
        .apply(&image, None)?;
        assert_eq!(out, image);
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn operator_serde() -> Result<(), Box<dyn std::error::Error>> {
        let op = Operator::Rotate {
            angle: 30.0,
            center_x: 4.0,
            center_y: 2.5,
        };
        let json = serde_json::to_string(&op)?;
        assert_eq!(
            json,
            r#"{"name":"rotate","angle":30.0,"center_x":4.0,"center_y":2.5}"#
        );
        assert_eq!(serde_json::from_str::<Operator>(&json)?, op);

        let combine = Operator::LogicalCombine { op: LogicalOp::Xor };
        let json = serde_json::to_string(&combine)?;
        assert_eq!(json, r#"{"name":"logical_combine","op":"Xor"}"#);
        assert_eq!(serde_json::from_str::<Operator>(&json)?, combine);

        let flip: Operator = serde_json::from_str(r#"{"name":"flip","axis":"Vertical"}"#)?;
        assert_eq!(
            flip,
            Operator::Flip {
                axis: FlipAxis::Vertical
            }
        );

        let warp: Operator = serde_json::from_str(
            r#"{"name":"projective_warp","points":[[0,0],[10,0],[10,10],[0,10]],"out_width":16,"out_height":16}"#,
        )?;
        assert_eq!(warp.name(), "projective_warp");
        Ok(())
    }
}
