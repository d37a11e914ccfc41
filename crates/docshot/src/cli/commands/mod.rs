//! CLI commands

mod capture;
mod publish;

pub use capture::CaptureCommand;
pub use publish::PublishCommand;

/// Build the single-threaded runtime each command runs on
fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}
