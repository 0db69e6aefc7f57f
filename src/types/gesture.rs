//! User gestures that arm or disarm auto-loop

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    /// Activating again after the first activation; arms only
    SecondActivation,
    /// Double activation; disarms only
    DoubleAction,
    /// Long press; flips the flag
    LongPress,
}

impl Gesture {
    /// Flag value after applying this gesture to `armed`
    pub fn apply(&self, armed: bool) -> bool {
        match self {
            Gesture::SecondActivation => true,
            Gesture::DoubleAction => false,
            Gesture::LongPress => !armed,
        }
    }
}
