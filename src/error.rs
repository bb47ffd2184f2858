// Error types shared by the CLI, style and image loading modules

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum BannerError {
    #[error("Invalid color `{0}`: expected #rrggbb")]
    InvalidColor(String),

    #[error("Invalid delay `{0}`: expected milliseconds")]
    InvalidDelay(String),

    #[error("Delay must be between {min} and {max} milliseconds, got {value}")]
    DelayOutOfRange { value: u64, min: u64, max: u64 },

    #[error("No pages could be loaded")]
    NoPages,
}
