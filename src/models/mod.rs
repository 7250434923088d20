mod account;
mod media;
mod tag;

pub use account::*;
pub use media::*;
pub use tag::*;
