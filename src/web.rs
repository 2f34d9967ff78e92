//! Browser binding
//!
//! The page owns drawing, DOM events and the frame/interval scheduling. It
//! forwards key events and elapsed time here and draws the snapshot JSON that
//! comes back.

use std::time::Duration;

use wasm_bindgen::prelude::*;

use crate::audio::WebAudio;
use crate::input::KeyAction;
use crate::platform::{Renderer, Session};
use crate::settings::Settings;
use crate::sim::{Command, RoundController, Snapshot};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Brickfall starting...");
}

/// Keeps the latest snapshot as JSON until the page collects it
#[derive(Default)]
struct JsonRenderer {
    pending: Option<String>,
}

impl Renderer for JsonRenderer {
    fn render(&mut self, snapshot: &Snapshot) {
        match serde_json::to_string(snapshot) {
            Ok(json) => self.pending = Some(json),
            Err(e) => log::error!("Snapshot serialization failed: {}", e),
        }
    }
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session<JsonRenderer, WebAudio>,
}

#[wasm_bindgen]
impl WebGame {
    /// Build a game from optional settings JSON. Bad settings abort startup.
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>) -> Result<WebGame, JsValue> {
        let settings = match settings_json {
            Some(json) => {
                Settings::from_json(&json).map_err(|e| JsValue::from_str(&format!("{e:#}")))?
            }
            None => Settings::default(),
        };
        if web_sys::window().is_none() {
            return Err(JsValue::from_str("no window: not running in a browser page"));
        }

        let controller = RoundController::new()
            .with_paddle_cadence(settings.paddle_step, settings.paddle_interval());
        let audio = WebAudio::new(settings.effective_volume());
        let session = Session::new(controller, JsonRenderer::default(), audio, settings.keys);
        log::info!("Game initialized");
        Ok(WebGame { session })
    }

    /// Run one animation frame. Returns snapshot JSON when something changed.
    pub fn frame(&mut self, dt_ms: f64) -> Option<String> {
        let dt = Duration::from_secs_f64(dt_ms.max(0.0) / 1000.0);
        self.session.frame(dt);
        self.session.renderer_mut().pending.take()
    }

    /// Latest full snapshot as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.controller().snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        self.session.key(key, KeyAction::Down)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.session.key(key, KeyAction::Up)
    }

    pub fn key_press(&mut self, key: &str) -> bool {
        self.session.key(key, KeyAction::Press)
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.session.audio_mut().set_volume(volume);
    }

    /// Play button click
    pub fn play(&mut self) {
        self.session.audio().resume();
        self.session.send(Command::Play);
    }
}
