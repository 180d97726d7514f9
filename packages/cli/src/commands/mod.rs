pub mod autosave;
pub mod format;
pub mod init;
pub mod prop;
pub mod sample;
pub mod validate;
#[cfg(feature = "watch")]
pub mod watch;

pub use autosave::{autosave, AutosaveCommand};
pub use format::{format, FormatArgs};
pub use init::{init, InitArgs};
pub use prop::{prop, PropArgs};
pub use sample::{sample, SampleArgs};
pub use validate::{validate, ValidateArgs};
#[cfg(feature = "watch")]
pub use watch::{watch, WatchArgs};
