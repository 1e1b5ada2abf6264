#[macro_use]
extern crate rocket;

pub mod campaign;
pub mod catchers;
pub mod configuration;
pub mod domain;
pub mod email;
pub mod guards;
pub mod history;
pub mod port_saver;
pub mod render;
pub mod routes;
pub mod startup;
pub mod storage;
pub mod telemetry;
