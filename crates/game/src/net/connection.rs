use std::collections::VecDeque;

use super::protocol::{ClientMessage, ServerMessage};
use super::stats::NetworkStats;
use super::transport::{Transport, TransportEvent, WsTransport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("could not connect: {0}")]
    Connect(String),
    #[error("connection error: {0}")]
    Transport(String),
    #[error("connection closed unexpectedly")]
    UnexpectedClose,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Open,
    Message(ServerMessage),
    Error(SessionError),
    Close,
}

/// One attempt at talking to the authority.
pub struct Connection {
    address: String,
    transport: Box<dyn Transport>,
    state: ConnectionState,
    open_reported: bool,
    error_reported: bool,
    close_reported: bool,
    pending: VecDeque<SessionEvent>,
    stats: NetworkStats,
}

impl Connection {
    pub fn open(address: &str) -> Self {
        Self::with_transport(address, Box::new(WsTransport::connect(address)))
    }

    pub fn with_transport(address: impl Into<String>, transport: Box<dyn Transport>) -> Self {
        let address = address.into();
        log::info!("Connecting to {}", address);

        Self {
            address,
            transport,
            state: ConnectionState::Connecting,
            open_reported: false,
            error_reported: false,
            close_reported: false,
            pending: VecDeque::new(),
            stats: NetworkStats::default(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    pub fn stats(&self) -> &NetworkStats {
        &self.stats
    }

    pub fn send(&mut self, message: &ClientMessage) {
        if self.state != ConnectionState::Connected {
            log::trace!("Dropping {:?} while {:?}", message, self.state);
            self.stats.messages_dropped += 1;
            return;
        }

        let text = match message.encode() {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Could not encode {:?}: {}", message, e);
                self.stats.messages_dropped += 1;
                return;
            }
        };

        let len = text.len() as u64;
        match self.transport.send_text(text) {
            Ok(()) => {
                log::trace!("Sent {} ({} bytes)", message.kind(), len);
                self.stats.messages_sent += 1;
                self.stats.bytes_sent += len;
            }
            Err(e) => {
                log::debug!("Dropping {:?}: {}", message, e);
                self.stats.messages_dropped += 1;
            }
        }
    }

    pub fn close(&mut self) {
        if self.state == ConnectionState::Disconnected {
            return;
        }

        log::info!("Closing connection to {}", self.address);
        self.transport.close();
        self.state = ConnectionState::Disconnected;
        self.report_close();
    }

    pub fn poll(&mut self) -> Vec<SessionEvent> {
        while self.state != ConnectionState::Disconnected {
            let Some(event) = self.transport.poll_event() else {
                break;
            };
            self.handle_transport_event(event);
        }

        self.pending.drain(..).collect()
    }

    fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Opened => {
                if self.state == ConnectionState::Connecting && !self.open_reported {
                    log::info!("Connected to {}", self.address);
                    self.state = ConnectionState::Connected;
                    self.open_reported = true;
                    self.pending.push_back(SessionEvent::Open);
                }
            }
            TransportEvent::Text(text) => {
                if self.state != ConnectionState::Connected {
                    log::debug!("Ignoring message received while {:?}", self.state);
                    return;
                }

                self.stats.bytes_received += text.len() as u64;
                match ServerMessage::decode(&text) {
                    Ok(message) => {
                        self.stats.messages_received += 1;
                        self.pending.push_back(SessionEvent::Message(message));
                    }
                    Err(e) => {
                        log::warn!("Discarding undecodable message: {}", e);
                        self.stats.decode_errors += 1;
                    }
                }
            }
            TransportEvent::Error(cause) => {
                if self.error_reported {
                    return;
                }
                self.error_reported = true;

                let error = if self.open_reported {
                    SessionError::Transport(cause)
                } else {
                    SessionError::Connect(cause)
                };
                log::warn!("{}: {}", self.address, error);
                self.pending.push_back(SessionEvent::Error(error));
            }
            TransportEvent::Closed => {
                log::info!("Connection to {} closed", self.address);
                self.transport.close();
                self.state = ConnectionState::Disconnected;
                self.report_close();
            }
        }
    }

    fn report_close(&mut self) {
        if !self.close_reported {
            self.close_reported = true;
            self.pending.push_back(SessionEvent::Close);
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if self.state != ConnectionState::Disconnected {
            self.transport.close();
        }
    }
}
