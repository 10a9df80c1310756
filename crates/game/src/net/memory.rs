// In-process transport pair. The `MemoryPeer` end plays the authority: it
// decides when the channel opens, what arrives, and when it fails or closes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use super::protocol::{ClientMessage, ServerMessage};
use super::transport::{Transport, TransportError, TransportEvent};

pub struct MemoryTransport {
    events: Receiver<TransportEvent>,
    outbound: Sender<String>,
    closed_by_client: Arc<AtomicBool>,
}

pub struct MemoryPeer {
    events: Sender<TransportEvent>,
    inbound: Receiver<String>,
    closed_by_client: Arc<AtomicBool>,
}

pub fn memory_pair() -> (MemoryTransport, MemoryPeer) {
    let (event_tx, event_rx) = mpsc::channel();
    let (out_tx, out_rx) = mpsc::channel();
    let closed = Arc::new(AtomicBool::new(false));

    let transport = MemoryTransport {
        events: event_rx,
        outbound: out_tx,
        closed_by_client: Arc::clone(&closed),
    };
    let peer = MemoryPeer {
        events: event_tx,
        inbound: out_rx,
        closed_by_client: closed,
    };

    (transport, peer)
}

impl Transport for MemoryTransport {
    fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        if self.closed_by_client.load(Ordering::SeqCst) {
            return Err(TransportError::Closed);
        }
        self.outbound.send(text).map_err(|_| TransportError::Closed)
    }

    fn poll_event(&mut self) -> Option<TransportEvent> {
        self.events.try_recv().ok()
    }

    fn close(&mut self) {
        self.closed_by_client.store(true, Ordering::SeqCst);
    }
}

impl MemoryPeer {
    pub fn open(&self) {
        let _ = self.events.send(TransportEvent::Opened);
    }

    pub fn send(&self, message: &ServerMessage) {
        if let Ok(text) = message.encode() {
            self.send_raw(text);
        }
    }

    pub fn send_raw(&self, text: impl Into<String>) {
        let _ = self.events.send(TransportEvent::Text(text.into()));
    }

    pub fn fail(&self, cause: impl Into<String>) {
        let _ = self.events.send(TransportEvent::Error(cause.into()));
    }

    pub fn close(&self) {
        let _ = self.events.send(TransportEvent::Closed);
    }

    pub fn received(&self) -> Vec<ClientMessage> {
        self.inbound
            .try_iter()
            .filter_map(|text| ClientMessage::decode(&text).ok())
            .collect()
    }

    pub fn closed_by_client(&self) -> bool {
        self.closed_by_client.load(Ordering::SeqCst)
    }
}
