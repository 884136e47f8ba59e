use crate::lobby::LobbyError;
use crate::prefs::PrefsError;
use crate::tasks::TaskError;
use std::{error, fmt};

#[derive(Debug)]
pub enum MusterError {
    Lobby(LobbyError),
    Prefs(PrefsError),
    Task(TaskError),
}

impl From<LobbyError> for MusterError {
    fn from(value: LobbyError) -> Self {
        Self::Lobby(value)
    }
}

impl From<PrefsError> for MusterError {
    fn from(value: PrefsError) -> Self {
        Self::Prefs(value)
    }
}

impl From<TaskError> for MusterError {
    fn from(value: TaskError) -> Self {
        Self::Task(value)
    }
}

impl fmt::Display for MusterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MusterError::Lobby(err) => err.fmt(f),
            MusterError::Prefs(err) => err.fmt(f),
            MusterError::Task(err) => err.fmt(f),
        }
    }
}

impl error::Error for MusterError {}
