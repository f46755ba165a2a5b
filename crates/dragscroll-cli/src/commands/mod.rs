pub mod breakpoint;
pub mod play;
pub mod simulate;
