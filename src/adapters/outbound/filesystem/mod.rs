/// Filesystem adapters: CF CLI session config and report output
mod cf_config_reader;
mod file_writer;

pub use cf_config_reader::{CfConfigReader, CfSession};
pub use file_writer::{FileSystemWriter, StdoutPresenter};
