pub mod renderer;

pub use renderer::{Renderer, ViewStatus, path_glyph};
