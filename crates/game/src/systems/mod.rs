mod input_script;
mod pawn;
mod report;
mod terrain;

pub use input_script::*;
pub use pawn::*;
pub use report::*;
pub use terrain::*;
