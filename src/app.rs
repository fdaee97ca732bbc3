use std::time::{Duration, Instant};

use eframe::egui;

use crate::config::DemoConfig;
use crate::controller::Controller;
use crate::state::ScreenState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PlaygroundApp {
    pub controller: Controller<ScreenState>,
    last_frame: Option<Instant>,
}

impl PlaygroundApp {
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            controller: Controller::new(ScreenState::new(config), config),
            last_frame: None,
        }
    }
}

impl Default for PlaygroundApp {
    fn default() -> Self {
        Self::new(&DemoConfig::default())
    }
}

impl eframe::App for PlaygroundApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Pace in-flight jobs by the time since the last frame ----
        let now = Instant::now();
        let elapsed = self
            .last_frame
            .map(|prev| now.duration_since(prev))
            .unwrap_or(Duration::ZERO);
        self.last_frame = Some(now);
        self.controller.advance(elapsed);

        let mut events = Vec::new();
        let state = self.controller.port_mut();

        // ---- Top panel: tabs and status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, state, &mut events);
        });

        // ---- Left side panel: parameters ----
        egui::SidePanel::left("parameter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, state, &mut events);
            });

        // ---- Central panel: results ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::results_panel(ui, state);
        });

        for event in events {
            self.controller.handle(event);
        }

        if let Some(due) = self.controller.next_due() {
            ctx.request_repaint_after(due);
        }
    }
}
