use actix::{Actor, ActorContext, AsyncContext, Handler, Message, Running, StreamHandler};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use actix_web_actors::ws::{CloseCode, CloseReason};

use relay::{serde_json, ClientEvent, ConnectionId, ServerEvent};

use crate::connection_tx_storage::ConnectionTx;
use crate::identity::{Identity, SharedIdentityProvider};
use crate::server::ServerTx;

#[derive(Debug)]
pub enum ConnectionCommand {
    Connect {
        tx: ConnectionTx,
        identity: Identity,
    },
    Disconnect {
        from: ConnectionId,
    },
    ClientEvent {
        from: ConnectionId,
        event: ClientEvent,
    },
}

#[derive(Debug)]
pub enum ConnectionEvent {
    Connected { connection_id: ConnectionId },
    Protocol(ServerEvent),
}

#[derive(Message)]
#[rtype(result = "()")]
struct ConnectionActorMessage(ConnectionEvent);

enum ConnectionState {
    Idle,
    Connected(ConnectionId),
}

struct ConnectionActor {
    state: ConnectionState,
    srv_tx: ServerTx,
    identity: Identity,
}

impl Actor for ConnectionActor {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let (tx, mut rx) = tokio::sync::mpsc::channel::<ConnectionEvent>(32);

        if let Err(err) = self.srv_tx.try_send(ConnectionCommand::Connect {
            tx,
            identity: self.identity.clone(),
        }) {
            log::error!("Could not register connection with the relay: {}", err);
            ctx.stop();
            return;
        }

        let addr = ctx.address().recipient();

        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                if addr.try_send(ConnectionActorMessage(event)).is_err() {
                    break;
                }
            }
        });
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        // Runs on every shutdown path, graceful or not, so registry cleanup
        // is triggered exactly once per connection.
        if let ConnectionState::Connected(id) = self.state {
            let _ = self.srv_tx.try_send(ConnectionCommand::Disconnect { from: id });
        }

        Running::Stop
    }
}

/// Ingress
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ConnectionActor {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Text(text)) => {
                if let ConnectionState::Connected(from) = self.state {
                    match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => {
                            log::debug!("Ingress from {}: {:?}", from, event);
                            if self
                                .srv_tx
                                .try_send(ConnectionCommand::ClientEvent { from, event })
                                .is_err()
                            {
                                log::warn!("Relay queue is full, dropping event from {}", from);
                            }
                        }
                        Err(err) => {
                            log::warn!("Malformed event from {}: {}", from, err);
                            ctx.close(Some(CloseReason {
                                code: CloseCode::Invalid,
                                description: None,
                            }));
                            ctx.stop();
                        }
                    }
                }
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            _ => (),
        }
    }
}

/// Egress
impl Handler<ConnectionActorMessage> for ConnectionActor {
    type Result = ();

    fn handle(
        &mut self,
        msg: ConnectionActorMessage,
        ctx: &mut ws::WebsocketContext<Self>,
    ) -> Self::Result {
        match msg.0 {
            ConnectionEvent::Connected { connection_id } => {
                self.state = ConnectionState::Connected(connection_id);
            }
            ConnectionEvent::Protocol(event) => {
                log::debug!("Egress {:?}", event);
                match serde_json::to_string(&event) {
                    Ok(serialized) => ctx.text(serialized),
                    Err(err) => log::error!("Could not serialize event: {}", err),
                }
            }
        }
    }
}

pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    srv_tx: web::Data<ServerTx>,
    identity_provider: web::Data<SharedIdentityProvider>,
) -> Result<HttpResponse, Error> {
    let credential = req.match_info().get("user").unwrap_or_default();
    let identity = match identity_provider.identify(credential) {
        Some(identity) => identity,
        None => {
            log::info!("Rejecting websocket handshake: unknown credential");
            return Ok(HttpResponse::Unauthorized().finish());
        }
    };

    ws::start(
        ConnectionActor {
            state: ConnectionState::Idle,
            srv_tx: srv_tx.get_ref().clone(),
            identity,
        },
        &req,
        stream,
    )
}
