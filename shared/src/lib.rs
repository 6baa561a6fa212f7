mod config;
pub use config::*;

mod dimensions;
pub use dimensions::*;

mod field;
pub use field::*;

mod headless;
pub use headless::*;

mod host;
pub use host::*;

mod particle;
pub use particle::*;

mod render;
pub use render::*;

mod signal;
pub use signal::*;

mod sparkles;
pub use sparkles::*;

mod surface;
pub use surface::*;
