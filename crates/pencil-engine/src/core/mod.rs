pub mod cancel;
pub mod time;
