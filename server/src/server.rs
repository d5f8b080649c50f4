use std::collections::HashMap;
use std::num::Wrapping;

use tokio::sync::mpsc::{channel, Sender};

use relay::{ClientEvent, ConnectionId, ServerEvent, SessionRegistry};

use crate::connection::{ConnectionCommand, ConnectionEvent};
use crate::connection_tx_storage::ConnectionTxStorage;
use crate::identity::Identity;

pub type ServerTx = Sender<ConnectionCommand>;

/// Owns all mutable relay state. Exactly one task runs it, draining one
/// command queue, so registry mutations are serialized without a lock and
/// never interleave with outbound delivery of a stale snapshot.
struct Server {
    registry: SessionRegistry,
    connections: ConnectionTxStorage,
    identities: HashMap<ConnectionId, Identity>,
    connection_id_source: Wrapping<ConnectionId>,
}

impl Server {
    fn new() -> Self {
        Self {
            registry: SessionRegistry::new(),
            connections: ConnectionTxStorage::new(),
            identities: HashMap::new(),
            connection_id_source: Wrapping(0),
        }
    }

    fn handle_connection_command(&mut self, command: ConnectionCommand) {
        match command {
            ConnectionCommand::Connect { tx, identity } => {
                let connection_id = self.new_connection_id();
                self.connections.insert(connection_id, tx);
                log::info!(
                    "Connection {} established for user {} ({:?})",
                    connection_id,
                    identity.user_id,
                    identity.role
                );
                self.identities.insert(connection_id, identity);
                self.connections
                    .send(&connection_id, ConnectionEvent::Connected { connection_id });
            }
            ConnectionCommand::Disconnect { from } => {
                self.registry.remove_connection(from);
                self.identities.remove(&from);
                if self.connections.remove(&from).is_some() {
                    log::info!("Connection {} closed", from);
                }
            }
            ConnectionCommand::ClientEvent { from, event } => {
                self.handle_client_event(from, event);
            }
        }
    }

    fn handle_client_event(&mut self, from: ConnectionId, event: ClientEvent) {
        match event {
            ClientEvent::StartSession { presenter_id } => {
                self.note_presenter_mismatch(from, &presenter_id);
                self.registry.open_session(&presenter_id, from);
            }
            ClientEvent::Draw { presenter_id, path } => {
                if let Some(viewers) = self.registry.viewers_of(&presenter_id) {
                    self.connections
                        .broadcast(&viewers, Some(from), &ServerEvent::DrawPath { path });
                } else {
                    log::debug!("Dropping draw for {}: no live session", presenter_id);
                }
            }
            ClientEvent::EndSession { presenter_id } => {
                self.registry.close_session(&presenter_id);
            }
            ClientEvent::Join { presenter_id } => {
                self.registry.join(&presenter_id, from);
            }
            ClientEvent::Leave { presenter_id } => {
                self.registry.leave(&presenter_id, from);
            }
        }
    }

    // The relay trusts the presenter id carried in events; a mismatch with
    // the handshake identity is only surfaced in the log.
    fn note_presenter_mismatch(&self, from: ConnectionId, presenter_id: &str) {
        if let Some(identity) = self.identities.get(&from) {
            if identity.user_id != presenter_id {
                log::warn!(
                    "Connection {} identified as {} opened a session for {}",
                    from,
                    identity.user_id,
                    presenter_id
                );
            }
        }
    }

    fn new_connection_id(&mut self) -> ConnectionId {
        self.connection_id_source += Wrapping(1);
        self.connection_id_source.0
    }
}

pub fn spawn_server() -> ServerTx {
    let (srv_tx, mut srv_rx) = channel::<ConnectionCommand>(16);

    tokio::spawn(async move {
        let mut server = Server::new();

        while let Some(command) = srv_rx.recv().await {
            server.handle_connection_command(command);
        }
    });

    srv_tx
}
