mod cell;
mod contact;
mod phone_number;
mod prefix;

pub use cell::*;
pub use contact::*;
pub use phone_number::*;
pub use prefix::*;
