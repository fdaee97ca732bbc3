//! Interactive playground for simulated machine-learning scenarios.
//!
//! The simulation core (`sim`, `pacing`, `presentation`, `controller`) is
//! headless and talks to the screen only through [`port::UiPort`]; the egui
//! front end lives in `app`, `state` and `ui`.

pub mod app;
pub mod color;
pub mod config;
pub mod controller;
pub mod pacing;
pub mod port;
pub mod presentation;
pub mod sim;
pub mod state;
pub mod ui;
