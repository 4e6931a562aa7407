pub mod confidence;
pub mod effectiveness;
pub mod guidance;
pub mod locale;
pub mod pixel;
pub mod pixel_grid;
pub mod severity;
pub mod treatment;
pub mod utils;
