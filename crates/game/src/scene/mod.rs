mod controller;
mod menu;
mod timer;

pub use controller::{
    Connector, Mode, STATUS_ALREADY_CONNECTING, STATUS_CONNECT_ERROR, STATUS_CONNECTING,
    STATUS_CONNECTION_LOST, STATUS_DISCONNECTED, STATUS_OPPONENT_LEFT, STATUS_ROLE_MISSING,
    STATUS_SELECT_MODE, STATUS_WAITING, Scene, SceneController,
};
pub use menu::{Menu, MenuOption};
pub use timer::DelayedTransition;
