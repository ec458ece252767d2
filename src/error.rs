use std::io;
use std::path::PathBuf;

use image::ImageError;


pub type PResult<T> = Result<T, PhantomError>;

#[derive(thiserror::Error, Debug)]
pub enum PhantomError {

    #[error("file not found '{}'", .0.display())]
    InputNotFound(PathBuf),

    #[error("cannot open image '{}': {source}", path.display())]
    Decode { path: PathBuf, source: ImageError },

    #[error("invalid color string '{0}', use #RRGGBB or #RGB format")]
    InvalidColor(String),

    #[error("cannot save image '{}': {source}", path.display())]
    Encode { path: PathBuf, source: ImageError },

    #[error("invalid value `{value}` for {name}")]
    InvalidArgument { name: &'static str, value: String },

    #[error("io error @{}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}
