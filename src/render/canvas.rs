use image::GrayImage;
use image::Luma;
use image::imageops;


/// Two grayscale layers of equal size: image1 over black and image2 over white.
pub struct CompositeCanvas {
    front: GrayImage,
    back: GrayImage,
}

impl CompositeCanvas {

    pub fn new(image1: &GrayImage, image2: &GrayImage) -> Self {
        let width = std::cmp::max(image1.width(), image2.width());
        let height = std::cmp::max(image1.height(), image2.height());
        CompositeCanvas {
            front: place(image1, width, height, 0),
            back: place(image2, width, height, 255),
        }
    }

    /// Centering offset along one axis, half away from zero.
    pub fn offset(canvas_dim: u32, img_dim: u32) -> u32 {
        ((canvas_dim - img_dim) as f64 / 2.0).round() as u32
    }

    pub fn width(&self) -> u32 {
        self.front.width()
    }

    pub fn height(&self) -> u32 {
        self.front.height()
    }

    pub fn front(&self) -> &GrayImage {
        &self.front
    }

    pub fn back(&self) -> &GrayImage {
        &self.back
    }
}

fn place(image: &GrayImage, width: u32, height: u32, fill: u8) -> GrayImage {
    let mut base = GrayImage::from_pixel(width, height, Luma([fill]));
    let ox = CompositeCanvas::offset(width, image.width());
    let oy = CompositeCanvas::offset(height, image.height());
    imageops::replace(&mut base, image, ox, oy);
    base
}
