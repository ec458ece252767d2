pub mod canvas;


use image::Rgb;
use image::Rgba;
use image::RgbaImage;
use image::imageops;

use crate::color::calculate::composite_pixel;
use crate::error::PResult;
use crate::error::PhantomError;
use canvas::CompositeCanvas;


pub const MAX_THREAD: usize = 16;

pub struct RenderOptions {
    color1: Rgb<u8>,
    color2: Rgb<u8>,
    thread_num: usize,
}

impl Default for RenderOptions {

    fn default() -> Self {
        RenderOptions {
            color1: Rgb::from([0, 0, 0]),
            color2: Rgb::from([255, 255, 255]),
            thread_num: 1,
        }
    }
}

impl RenderOptions {

    pub fn set_colors(&mut self, color1: Rgb<u8>, color2: Rgb<u8>) {
        self.color1 = color1;
        self.color2 = color2;
    }

    /// Accepts `1 ..= MAX_THREAD`.
    pub fn set_thread_num(&mut self, thread_num: usize) -> PResult<()> {
        if thread_num == 0 || thread_num > MAX_THREAD {
            return Err(PhantomError::InvalidArgument { name: "thread", value: thread_num.to_string() });
        }
        self.thread_num = thread_num;
        Ok(())
    }

    pub fn colors(&self) -> (&Rgb<u8>, &Rgb<u8>) {
        (&self.color1, &self.color2)
    }

    pub fn thread_num(&self) -> usize {
        self.thread_num
    }
}


/// Composite every pixel of the canvas.
pub fn render(canvas: &CompositeCanvas, options: &RenderOptions) -> RgbaImage {
    let (width, height) = (canvas.width(), canvas.height());
    let mut panel = RgbaImage::new(width, height);
    if width == 0 || height == 0 {
        return panel;
    }
    let thread_num = std::cmp::min(options.thread_num, height as usize).max(1);
    let rows = (height as usize + thread_num - 1) / thread_num;
    let stride = width as usize * 4;

    if thread_num == 1 {
        render_band(canvas, options, 0, &mut panel);
        return panel;
    }

    let result = crossbeam::thread::scope(|s| {
        for (i, band) in panel.chunks_mut(rows * stride).enumerate() {
            let y0 = (i * rows) as u32;
            s.spawn(move |_| {
                log::debug!("band {} rows {}..{}", i, y0, y0 as usize + band.len() / stride);
                render_band(canvas, options, y0, band);
            });
        }
    });
    if let Err(e) = result {
        std::panic::resume_unwind(e);
    }
    panel
}

/// Fill `band`, a run of whole RGBA rows starting at canvas row `y0`.
fn render_band(canvas: &CompositeCanvas, options: &RenderOptions, y0: u32, band: &mut [u8]) {
    let (bc1, bc2) = options.colors();
    let front = canvas.front();
    let back = canvas.back();
    let width = canvas.width();
    for (i, out) in band.chunks_exact_mut(4).enumerate() {
        let x = i as u32 % width;
        let y = y0 + i as u32 / width;
        let p = composite_pixel(front.get_pixel(x, y)[0], back.get_pixel(x, y)[0], bc1, bc2);
        out.copy_from_slice(&p.0);
    }
}

/// Surround the image with a one pixel fully transparent ring.
pub fn pad_border(image: &RgbaImage) -> RgbaImage {
    let mut bordered = RgbaImage::from_pixel(image.width() + 2, image.height() + 2, Rgba::from([0, 0, 0, 0]));
    imageops::replace(&mut bordered, image, 1, 1);
    bordered
}
