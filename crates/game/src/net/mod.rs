mod connection;
mod memory;
mod protocol;
mod session;
mod stats;
mod transport;

pub use connection::{Connection, ConnectionState, SessionError, SessionEvent};
pub use memory::{MemoryPeer, MemoryTransport, memory_pair};
pub use protocol::{
    BallState, ClientMessage, DecodeError, EncodeError, GameStart, GameState, MatchSettings,
    PaddleState, PlayerAssignment, Point, ResetBall, ScoreState, ScoreUpdate, ServerMessage,
};
pub use session::{ProtocolSequenceError, Session};
pub use stats::NetworkStats;
pub use transport::{Transport, TransportError, TransportEvent, WsTransport};
