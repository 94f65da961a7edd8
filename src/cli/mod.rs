pub mod format;
pub mod shared;
pub mod trace;
