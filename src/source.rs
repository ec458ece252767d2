use std::io;
use std::path::Path;
use std::path::PathBuf;

use image::DynamicImage;
use image::GenericImageView;
use image::GrayImage;
use image::ImageError;
use image::Luma;
use image::Rgb;
use image::RgbImage;
use image::RgbaImage;
use image::imageops;
use image::imageops::FilterType;

use crate::error::PResult;
use crate::error::PhantomError;


/// A source picture reduced to a single intensity channel.
pub struct SourceImage {
    path: PathBuf,
    original: (u32, u32),
    image: GrayImage,
}

impl SourceImage {

    pub fn load(path: &Path, size: u32, filter: FilterType) -> PResult<Self> {
        if !path.exists() {
            return Err(PhantomError::InputNotFound(path.to_path_buf()));
        }
        let image = image::open(path).map_err(|e| match e {
            ImageError::IoError(err) if err.kind() == io::ErrorKind::NotFound => {
                PhantomError::InputNotFound(path.to_path_buf())
            },
            e => PhantomError::Decode { path: path.to_path_buf(), source: e }
        })?;
        let source = Self::from_dynamic(path.to_path_buf(), image, size, filter);
        log::info!("loaded {} ({}x{} -> {}x{})",
            path.display(),
            source.original.0, source.original.1,
            source.image.width(), source.image.height()
        );
        Ok(source)
    }

    pub fn from_dynamic(path: PathBuf, image: DynamicImage, size: u32, filter: FilterType) -> Self {
        let original = (image.width(), image.height());
        let rgb = if image.color().has_alpha() {
            flatten_on_white(&image.to_rgba8())
        } else {
            image.to_rgb8()
        };
        let gray = to_luma(&rgb);
        SourceImage {
            path,
            original,
            image: shrink(gray, size, filter),
        }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }
}


/// Blend every pixel over opaque white.
pub fn flatten_on_white(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let p = image.get_pixel(x, y);
        let a = p[3] as u32;
        let ia = 255 - a;
        let mix = |c: u8| ((c as u32 * a + 255 * ia + 127) / 255) as u8;
        Rgb::from([mix(p[0]), mix(p[1]), mix(p[2])])
    })
}

/// ITU-R 601-2 luma: `(r*299 + g*587 + b*114) / 1000`, rounded.
pub fn to_luma(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let p = image.get_pixel(x, y);
        let l = p[0] as u32 * 299 + p[1] as u32 * 587 + p[2] as u32 * 114;
        Luma([((l + 500) / 1000) as u8])
    })
}

/// Target size with the longer edge limited to `size`; `None` when the
/// image already fits.
pub fn fit_within(width: u32, height: u32, size: u32) -> Option<(u32, u32)> {
    let long = std::cmp::max(width, height);
    if long <= size {
        return None;
    }
    let scale = |edge: u32| {
        let v = (edge as f64 * size as f64 / long as f64).round() as u32;
        std::cmp::max(v, 1)
    };
    if width >= height {
        Some((size, scale(height)))
    } else {
        Some((scale(width), size))
    }
}

pub fn shrink(image: GrayImage, size: u32, filter: FilterType) -> GrayImage {
    match fit_within(image.width(), image.height(), size) {
        Some((w, h)) => imageops::resize(&image, w, h, filter),
        None => image
    }
}
