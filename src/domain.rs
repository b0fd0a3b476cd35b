pub mod time;
pub mod weather;
