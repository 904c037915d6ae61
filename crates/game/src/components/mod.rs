mod input_script;
mod pawn;
mod terrain;

pub use input_script::*;
pub use pawn::*;
pub use terrain::*;
