pub mod letter;
pub mod pencil;
pub mod sequence;
pub mod signature;
pub mod spacing;
