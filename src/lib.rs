// rbanner - A rotating image banner for Wayland
// The carousel controller is toolkit independent; the Wayland module hosts it

pub mod animation;
pub mod autoplay;
pub mod carousel;
pub mod cli;
pub mod error;
pub mod image_loader;
pub mod layout;
pub mod render;
pub mod style;
pub mod wayland;
