pub mod bitstream;
pub mod codec;
pub mod ec;
pub mod iter;
pub mod mask;
pub mod metadata;

pub use bitstream::*;
pub use codec::*;
pub use iter::*;
pub use mask::*;
pub use metadata::*;
