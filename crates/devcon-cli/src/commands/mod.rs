pub mod files;
pub mod rebuild;
pub mod status;
pub mod utils;

/// Output switches shared by every subcommand.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    pub json: bool,
}
