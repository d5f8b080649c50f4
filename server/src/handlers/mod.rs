use crate::connection::ws_index;
use crate::handlers::users::configure_user_handlers;
use actix_web::web;

mod users;

pub fn root(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ws/{user}").route(web::get().to(ws_index)));

    configure_user_handlers(cfg);
}
