/// Process adapters for running external build tools
mod system_command_runner;

pub use system_command_runner::{install_hint, SystemCommandRunner};
