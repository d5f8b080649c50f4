use std::collections::HashMap;

use relay::{ConnectionId, ServerEvent};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::Sender;

use crate::connection::ConnectionEvent;

pub type ConnectionTx = Sender<ConnectionEvent>;

/// Outbound channels of all live connections, keyed by connection id.
///
/// Delivery is fire-and-forget per recipient: a saturated or closed channel
/// drops that one event and never blocks or fails delivery to anyone else.
/// Strokes are near-real-time data, so dropping the newest event on a slow
/// viewer is acceptable.
pub struct ConnectionTxStorage {
    connections: HashMap<ConnectionId, ConnectionTx>,
}

impl ConnectionTxStorage {
    pub fn new() -> Self {
        Self {
            connections: HashMap::new(),
        }
    }

    pub fn insert(&mut self, connection_id: ConnectionId, tx: ConnectionTx) {
        self.connections.insert(connection_id, tx);
    }

    pub fn remove(&mut self, connection_id: &ConnectionId) -> Option<ConnectionTx> {
        self.connections.remove(connection_id)
    }

    pub fn send(&mut self, to: &ConnectionId, event: ConnectionEvent) {
        if let Some(tx) = self.connections.get_mut(to) {
            match tx.try_send(event) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    log::warn!("Outbound queue of connection {} is full, dropping event", to);
                }
                Err(TrySendError::Closed(_)) => {
                    log::debug!("Connection {} is already gone, dropping event", to);
                }
            }
        }
    }

    /// Fans `event` out to every recipient except `without` (the sender).
    pub fn broadcast(
        &mut self,
        recipients: &[ConnectionId],
        without: Option<ConnectionId>,
        event: &ServerEvent,
    ) {
        for connection_id in recipients {
            if Some(*connection_id) == without {
                continue;
            }
            self.send(connection_id, ConnectionEvent::Protocol(event.clone()));
        }
    }
}
