//! Headless replay of recorded UI actions.

use crate::app::{AppError, SketchpadApp};
use crate::ui::UiAction;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Action {index} ({action:?}) failed: {source}")]
    Action {
        index: usize,
        action: UiAction,
        #[source]
        source: AppError,
    },
}

/// A sequence of actions to replay against one app.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub actions: Vec<UiAction>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        let actions: Vec<UiAction> = serde_json::from_str(json)?;
        Ok(Self { actions })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let script = Self::from_json(&json)?;
        log::debug!("Loaded {} actions from {}", script.actions.len(), path.display());
        Ok(script)
    }

    /// Dispatch every action in order, stopping at the first failure.
    pub fn replay(&self, app: &mut SketchpadApp) -> Result<(), ScriptError> {
        for (index, action) in self.actions.iter().enumerate() {
            log::trace!("Action {}: {:?}", index, action);
            app.handle_action(action.clone())
                .map_err(|source| ScriptError::Action {
                    index,
                    action: action.clone(),
                    source,
                })?;
        }
        Ok(())
    }
}
