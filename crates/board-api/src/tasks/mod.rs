//! Background tasks

mod reaper;

pub use reaper::spawn_reaper;
