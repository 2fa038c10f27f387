pub mod clock;
pub mod pii;

pub use pii::Masked;
