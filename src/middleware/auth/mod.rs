pub mod credential;
pub mod gate;
