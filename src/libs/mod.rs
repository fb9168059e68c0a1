pub mod delta;
pub mod diff;
pub mod io;
