use rocket::fairing::Info;
use rocket::{Orbit, Rocket};
use std::sync::Mutex;
use tokio::sync::oneshot;

/// A fairing/handle pair: the fairing reports the port rocket actually
/// bound (useful when the configuration asks for port 0), the handle
/// resolves it on first use and caches it.
pub fn create_pair() -> (PortSaver, Port) {
    let (tx, rx) = oneshot::channel();
    (PortSaver::new(tx), Port::new(rx))
}

enum PortState {
    Waiting(oneshot::Receiver<u16>),
    Resolving,
    Known(u16),
}

pub struct Port {
    state: Mutex<PortState>,
}

impl Port {
    fn new(rx: oneshot::Receiver<u16>) -> Port {
        Port {
            state: Mutex::new(PortState::Waiting(rx)),
        }
    }

    pub async fn get(&self) -> u16 {
        let rx = {
            let mut state = self.state.lock().unwrap();
            match std::mem::replace(&mut *state, PortState::Resolving) {
                PortState::Known(port) => {
                    *state = PortState::Known(port);
                    return port;
                }
                PortState::Waiting(rx) => rx,
                PortState::Resolving => panic!("The port is already being resolved."),
            }
        };
        let port = rx
            .await
            .expect("The server shut down before publishing its port.");
        *self.state.lock().unwrap() = PortState::Known(port);
        port
    }
}

pub struct PortSaver {
    sender: Mutex<Option<oneshot::Sender<u16>>>,
}

impl PortSaver {
    fn new(sender: oneshot::Sender<u16>) -> PortSaver {
        PortSaver {
            sender: Mutex::new(Some(sender)),
        }
    }
}

#[rocket::async_trait]
impl rocket::fairing::Fairing for PortSaver {
    fn info(&self) -> Info {
        Info {
            name: "Port Saver",
            kind: rocket::fairing::Kind::Liftoff,
        }
    }

    async fn on_liftoff(&self, rocket: &Rocket<Orbit>) {
        if let Some(sender) = self.sender.lock().unwrap().take() {
            let _ = sender.send(rocket.config().port);
        }
    }
}
