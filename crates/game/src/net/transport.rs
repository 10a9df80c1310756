use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;

#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    Opened,
    Text(String),
    Error(String),
    Closed,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("transport is closed")]
    Closed,
}

/// A duplex text channel. Implementations never block the caller.
pub trait Transport {
    fn send_text(&mut self, text: String) -> Result<(), TransportError>;

    fn poll_event(&mut self) -> Option<TransportEvent>;

    fn close(&mut self);
}

enum Outgoing {
    Text(String),
    Close,
}

/// WebSocket transport. The socket lives on its own thread running a
/// current-thread tokio runtime; the game thread only touches channels.
pub struct WsTransport {
    outgoing: UnboundedSender<Outgoing>,
    incoming: Receiver<TransportEvent>,
    _io_thread: Option<JoinHandle<()>>,
    closed: bool,
}

impl WsTransport {
    pub fn connect(url: &str) -> Self {
        let (out_tx, out_rx) = unbounded_channel();
        let (in_tx, in_rx) = mpsc::channel();

        let url = url.to_string();
        let thread_events = in_tx.clone();
        let io_thread = thread::Builder::new()
            .name("volley-ws".to_string())
            .spawn(move || run_io_thread(url, out_rx, thread_events));

        let io_thread = match io_thread {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::error!("Failed to spawn socket thread: {}", e);
                let _ = in_tx.send(TransportEvent::Error(e.to_string()));
                let _ = in_tx.send(TransportEvent::Closed);
                None
            }
        };

        Self {
            outgoing: out_tx,
            incoming: in_rx,
            _io_thread: io_thread,
            closed: false,
        }
    }
}

impl Transport for WsTransport {
    fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        self.outgoing
            .send(Outgoing::Text(text))
            .map_err(|_| TransportError::Closed)
    }

    fn poll_event(&mut self) -> Option<TransportEvent> {
        match self.incoming.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        // The I/O thread winds down on its own once it sees this.
        let _ = self.outgoing.send(Outgoing::Close);
    }
}

impl Drop for WsTransport {
    fn drop(&mut self) {
        self.close();
    }
}

fn run_io_thread(
    url: String,
    outgoing: UnboundedReceiver<Outgoing>,
    events: Sender<TransportEvent>,
) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            let _ = events.send(TransportEvent::Error(e.to_string()));
            let _ = events.send(TransportEvent::Closed);
            return;
        }
    };

    runtime.block_on(pump(url, outgoing, &events));
    let _ = events.send(TransportEvent::Closed);
}

async fn pump(
    url: String,
    mut outgoing: UnboundedReceiver<Outgoing>,
    events: &Sender<TransportEvent>,
) {
    let socket = tokio::select! {
        result = connect_async(url.as_str()) => match result {
            Ok((socket, _response)) => socket,
            Err(e) => {
                log::warn!("WebSocket connect to {} failed: {}", url, e);
                let _ = events.send(TransportEvent::Error(e.to_string()));
                return;
            }
        },
        _ = wait_for_close(&mut outgoing) => {
            log::debug!("Connect to {} abandoned", url);
            return;
        }
    };

    log::debug!("WebSocket open to {}", url);
    let _ = events.send(TransportEvent::Opened);

    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            next = outgoing.recv() => match next {
                Some(Outgoing::Text(text)) => {
                    if let Err(e) = sink.send(WsMessage::text(text)).await {
                        let _ = events.send(TransportEvent::Error(e.to_string()));
                        break;
                    }
                }
                Some(Outgoing::Close) | None => {
                    let _ = sink.close().await;
                    break;
                }
            },
            incoming = stream.next() => match incoming {
                Some(Ok(WsMessage::Text(text))) => {
                    let _ = events.send(TransportEvent::Text(text.as_str().to_owned()));
                }
                Some(Ok(WsMessage::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    let _ = events.send(TransportEvent::Error(e.to_string()));
                    break;
                }
            },
        }
    }
}

async fn wait_for_close(outgoing: &mut UnboundedReceiver<Outgoing>) {
    loop {
        match outgoing.recv().await {
            Some(Outgoing::Close) | None => return,
            // Nothing is sent before the socket opens.
            Some(Outgoing::Text(_)) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    #[test]
    fn unreachable_server_reports_error_then_close() {
        // Port 1 on loopback refuses connections on any sane test machine.
        let mut transport = WsTransport::connect("ws://127.0.0.1:1/pong");

        let mut events = Vec::new();
        let start = Instant::now();
        while start.elapsed() < Duration::from_secs(5) {
            if let Some(event) = transport.poll_event() {
                let done = event == TransportEvent::Closed;
                events.push(event);
                if done {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(5));
            }
        }

        assert!(matches!(events.first(), Some(TransportEvent::Error(_))));
        assert_eq!(events.last(), Some(&TransportEvent::Closed));
        assert!(!events.contains(&TransportEvent::Opened));
    }

    #[test]
    fn send_after_close_is_rejected() {
        let mut transport = WsTransport::connect("ws://127.0.0.1:1/pong");
        transport.close();
        assert!(transport.send_text("{}".to_string()).is_err());
    }
}
