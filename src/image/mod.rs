pub mod f32;
pub mod traits;
pub mod u16;
pub mod u8;

pub use self::f32::DepthF32;
pub use self::traits::{PixelView, Rows};
pub use self::u16::DepthU16;
pub use self::u8::MaskU8;
