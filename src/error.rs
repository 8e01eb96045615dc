// One error type for the whole demo.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    WindowInit(String),       // Creating the window failed
    WindowUpdate(String),     // Pushing the framebuffer to the window failed
    AssetLoad(String),        // Decoding an image file failed
    InvalidAnimation(String), // Frames/durations/loops don't make an animation
    InvalidImage(String),     // A raw pixel buffer doesn't match its dimensions
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::AssetLoad(s) => write!(f, "Asset load error: {s}"),
            Error::InvalidAnimation(s) => write!(f, "Invalid animation: {s}"),
            Error::InvalidImage(s) => write!(f, "Invalid image: {s}"),
        }
    }
}

impl std::error::Error for Error {}
