//! Task commands

mod add;
mod mv;
mod remove;
mod tag;
mod track;
mod update;

pub use add::AddTask;
pub use mv::MoveTask;
pub use remove::RemoveTask;
pub use tag::{TagTask, UntagTask};
pub use track::RecordTime;
pub use update::UpdateTask;
