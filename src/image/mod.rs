pub mod f64;
pub mod io;
pub mod traits;

pub use self::f64::{GridError, PixelGrid};
pub use self::traits::{ImageView, Rows};
