use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use image::RgbaImage;
use image::imageops::FilterType;

use super::error::PResult;
use super::error::PhantomError;
use super::render;
use super::render::RenderOptions;
use super::render::canvas::CompositeCanvas;
use super::source::SourceImage;


pub const DEFAULT_OUTPUT: &'static str = "result.png";
pub const DEFAULT_SIZE: u32 = 320;

pub struct AppOptions {
    render_options: RenderOptions,
    image1: PathBuf,
    image2: PathBuf,
    output: PathBuf,
    size: u32,
    filter: FilterType,
}

impl Default for AppOptions {
    fn default() -> Self {
        AppOptions {
            render_options: Default::default(),
            image1: Default::default(),
            image2: Default::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            size: DEFAULT_SIZE,
            filter: FilterType::CatmullRom,
        }
    }
}

impl AppOptions {

    pub fn render_option_mut(&mut self) -> &mut RenderOptions {
        &mut self.render_options
    }

    pub fn set_inputs<P: Into<PathBuf>>(&mut self, image1: P, image2: P) {
        self.image1 = image1.into();
        self.image2 = image2.into();
    }

    pub fn set_output<P: Into<PathBuf>>(&mut self, output: P) {
        self.output = output.into();
    }

    pub fn set_size(&mut self, size: u32) -> PResult<()> {
        if size == 0 {
            return Err(PhantomError::InvalidArgument { name: "size", value: size.to_string() });
        }
        self.size = size;
        Ok(())
    }

    pub fn set_filter(&mut self, filter: &str) -> PResult<()> {
        self.filter = match filter {
            "nearest" => FilterType::Nearest,
            "triangle" => FilterType::Triangle,
            "gaussian" => FilterType::Gaussian,
            "catmullrom" => FilterType::CatmullRom,
            "lanczos3" => FilterType::Lanczos3,
            _ => return Err(PhantomError::InvalidArgument { name: "filter", value: filter.to_string() })
        };
        Ok(())
    }

    pub fn output(&self) -> &Path {
        self.output.as_path()
    }

    pub fn ensure_output_folder(&self) -> PResult<()> {
        match self.output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                fs::create_dir_all(parent).map_err(|e| PhantomError::Io { path: parent.to_path_buf(), source: e })
            },
            _ => Ok(())
        }
    }
}

pub struct Application {
    options: AppOptions,
}

impl Application {

    pub fn new(options: AppOptions) -> Self {
        Application {
            options
        }
    }

    pub fn output(&self) -> &Path {
        self.options.output()
    }

    pub fn compose(&self) -> PResult<RgbaImage> {
        let options = &self.options;

        log::info!("loading image 1: {}", options.image1.display());
        let img1 = SourceImage::load(&options.image1, options.size, options.filter)?;
        log::info!("loading image 2: {}", options.image2.display());
        let img2 = SourceImage::load(&options.image2, options.size, options.filter)?;

        let (bc1, bc2) = options.render_options.colors();
        log::info!("background color 1: {:?}", bc1.0);
        log::info!("background color 2: {:?}", bc2.0);

        let canvas = CompositeCanvas::new(img1.image(), img2.image());
        log::info!("canvas {}x{} from {} and {}", canvas.width(), canvas.height(), img1.path().display(), img2.path().display());

        log::info!("compositing with {} thread(s)", options.render_options.thread_num());
        let panel = render::render(&canvas, &options.render_options);
        Ok(render::pad_border(&panel))
    }

    pub fn run(&self) -> PResult<()> {
        let time = Instant::now();
        let bordered = self.compose()?;
        let output = self.options.output();
        log::info!("saving {}", output.display());
        self.options.ensure_output_folder()?;
        bordered.save(output).map_err(|e| PhantomError::Encode { path: output.to_path_buf(), source: e })?;
        log::info!("> used {}ms", time.elapsed().as_millis());
        Ok(())
    }
}
