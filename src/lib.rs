pub mod config;
pub mod input;
pub mod model;
pub mod play;
pub mod replay;
pub mod script;
pub mod util;

#[cfg(test)]
mod test_utils;
