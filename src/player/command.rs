use std::ffi::OsString;
use std::path::PathBuf;

/// Discrete commands of the player's command-line protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCmd {
    /// Empty the player's queue.
    Clear,
    /// Append the given files to the player's queue.
    Append(Vec<PathBuf>),
    Play,
    Pause,
    Resume,
    Stop,
    Next,
    Previous,
}

impl PlayerCmd {
    /// Argument list passed to the player binary.
    pub fn to_args(&self) -> Vec<OsString> {
        match self {
            PlayerCmd::Clear => vec!["--clear".into()],
            PlayerCmd::Append(paths) => {
                let mut args: Vec<OsString> = vec!["--append".into()];
                args.extend(paths.iter().map(|p| p.clone().into_os_string()));
                args
            }
            PlayerCmd::Play => vec!["--play".into()],
            PlayerCmd::Pause => vec!["--pause".into()],
            PlayerCmd::Resume => vec!["--unpause".into()],
            PlayerCmd::Stop => vec!["--stop".into()],
            PlayerCmd::Next => vec!["--next".into()],
            PlayerCmd::Previous => vec!["--previous".into()],
        }
    }
}
