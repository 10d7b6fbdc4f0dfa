use argh::FromArgs;
use std::path::PathBuf;

use rastro::image::{AnyImage, Image, ImageSize};
use rastro::imgproc::{self, pipeline::Operator};

#[derive(FromArgs)]
/// Apply one catalog operator to a synthetic image and log its statistics
struct Args {
    /// the operator as JSON, e.g. '{"name":"rotate","angle":30,"center_x":64,"center_y":48}'
    #[argh(option, short = 'o')]
    op: Option<String>,

    /// path to a JSON file holding the operator
    #[argh(option, short = 'f')]
    op_file: Option<PathBuf>,

    /// width of the synthetic image
    #[argh(option, default = "128")]
    width: usize,

    /// height of the synthetic image
    #[argh(option, default = "96")]
    height: usize,

    /// use a gray instead of a color image
    #[argh(switch)]
    gray: bool,
}

// horizontal red ramp, vertical green ramp and a blue checkerboard
fn gradient(size: ImageSize) -> Result<Image<u8, 3>, rastro::image::ImageError> {
    Image::from_size_fn(size, |x, y, c| match c {
        0 => (x * 255 / (size.width.max(2) - 1)) as u8,
        1 => (y * 255 / (size.height.max(2) - 1)) as u8,
        _ => {
            if (x / 16 + y / 16) % 2 == 0 {
                200
            } else {
                40
            }
        }
    })
}

fn log_stats(label: &str, image: &AnyImage) {
    match image {
        AnyImage::Gray(img) => {
            let (std, mean) = imgproc::core::std_mean(img);
            log::info!("{label}: {} gray, mean {mean:?}, std {std:?}", img.size());
        }
        AnyImage::Rgb(img) => {
            let (std, mean) = imgproc::core::std_mean(img);
            log::info!("{label}: {} rgb, mean {mean:?}, std {std:?}", img.size());
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let op: Operator = match (args.op, args.op_file) {
        (Some(json), _) => serde_json::from_str(&json)?,
        (None, Some(path)) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        (None, None) => Operator::Grayscale,
    };

    let size = ImageSize {
        width: args.width,
        height: args.height,
    };

    let color = gradient(size)?;
    let primary = if args.gray {
        AnyImage::Gray(imgproc::color::gray_from_rgb_u8(&color)?)
    } else {
        AnyImage::Rgb(color)
    };

    // binary operators combine the image with its mirror
    let secondary = if op.needs_secondary() {
        Some(
            Operator::Flip {
                axis: imgproc::flip::FlipAxis::Horizontal,
            }
            .apply(&primary, None)?,
        )
    } else {
        None
    };

    log_stats("input", &primary);

    let output = op.apply(&primary, secondary.as_ref())?;

    log_stats(op.name(), &output);

    println!("{}", serde_json::to_string(&op)?);

    Ok(())
}
