mod move_gen;
mod moves;
mod notation;
mod piece;
mod position;
mod square;

#[cfg(test)]
mod tests;

pub use moves::*;
pub use notation::*;
pub use piece::*;
pub use position::*;
pub use square::*;
