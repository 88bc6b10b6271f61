pub mod assignment;
pub mod doctor;
pub mod exam;
pub mod grid;
pub mod room;
pub mod slot;

pub use assignment::*;
pub use doctor::*;
pub use exam::*;
pub use grid::*;
pub use room::*;
pub use slot::*;
