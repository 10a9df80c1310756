pub mod config;
pub mod net;
pub mod physics;
pub mod player;
pub mod scene;
pub mod simulation;
pub mod sync;
pub mod world;

pub use config::{ArenaConfig, ClientConfig, DEFAULT_SERVER_URL, DEFAULT_TICK_RATE};
pub use net::{
    ClientMessage, Connection, ConnectionState, DecodeError, NetworkStats, ProtocolSequenceError,
    ServerMessage, Session, SessionError, SessionEvent, Transport, TransportError,
};
pub use physics::{LocalPhysicsEngine, PhysicsEvent};
pub use player::{PaddleInput, PredictiveInputController};
pub use scene::{DelayedTransition, MenuOption, Mode, Scene, SceneController};
pub use simulation::FixedTimestep;
pub use sync::{Reconciled, StateReconciler};
pub use world::{Ball, MatchConfig, MatchState, Paddle, Role, Score};
