//! Browser host binding
//!
//! The page owns `requestAnimationFrame`, key listeners and the renderer. It
//! drives one [`WebGame::tick`] per frame and reads back JSON snapshots.

use wasm_bindgen::prelude::*;

use crate::audio::WebAudioSink;
use crate::sim::{Command, Game, SceneArena, SceneEntity, TickInput};
use crate::{Settings, Tuning};

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    game: Game<SceneArena, WebAudioSink>,
    input: TickInput,
}

#[wasm_bindgen]
impl WebGame {
    /// Build a game in the menu. Either JSON document may be omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(
        seed: f64,
        tuning_json: Option<String>,
        settings_json: Option<String>,
    ) -> Result<WebGame, JsValue> {
        crate::platform::init_logging();

        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(js_error)?,
            None => Tuning::default(),
        };
        let settings = match settings_json {
            Some(json) => Settings::from_json(&json).map_err(js_error)?,
            None => Settings::default(),
        };

        log::info!("Neon Bike starting (seed {})", seed as u64);
        Ok(WebGame {
            game: Game::new(
                tuning,
                settings,
                SceneArena::new(),
                WebAudioSink::new(),
                seed as u64,
            ),
            input: TickInput::default(),
        })
    }

    /// Update a held control: "forward", "backward", "left" or "right"
    pub fn set_control(&mut self, name: &str, held: bool) {
        match name {
            "forward" => self.input.forward = held,
            "backward" => self.input.backward = held,
            "left" => self.input.left = held,
            "right" => self.input.right = held,
            _ => log::warn!("Unknown control {name:?}"),
        }
    }

    /// Queue a jump for the next tick
    pub fn jump(&mut self) {
        self.input.jump = true;
    }

    /// Queue a pause toggle for the next tick
    pub fn toggle_pause(&mut self) {
        self.input.pause_toggle = true;
    }

    /// Advance one frame; `dt` is the frame interval in seconds
    pub fn tick(&mut self, dt: f32) {
        self.game.tick(&self.input, dt);
        // One-shot inputs only apply to the tick that saw them
        self.input.jump = false;
        self.input.pause_toggle = false;
    }

    /// Apply a named lifecycle command; returns whether it was accepted
    pub fn command(&mut self, name: &str) -> Result<bool, JsValue> {
        let command: Command = name.parse().map_err(js_error)?;
        // Any UI command counts as the gesture that unlocks audio
        self.game.resume_audio();
        Ok(self.game.command(command))
    }

    pub fn set_settings(&mut self, settings_json: &str) -> Result<(), JsValue> {
        let settings = Settings::from_json(settings_json).map_err(js_error)?;
        self.game.set_settings(settings);
        Ok(())
    }

    pub fn lifecycle(&self) -> String {
        format!("{:?}", self.game.lifecycle())
    }

    pub fn instructions_open(&self) -> bool {
        self.game.instructions_open()
    }

    pub fn hud_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.hud()).map_err(js_error)
    }

    /// Vehicle pose, camera, light level and every live entity for the renderer
    pub fn scene_json(&self) -> Result<String, JsValue> {
        let scene = self.game.scene();
        let entities: Vec<&SceneEntity> = scene.iter().collect();
        let snapshot = serde_json::json!({
            "vehicle": scene.vehicle,
            "camera": scene.camera,
            "ambient": scene.ambient,
            "entities": entities,
        });
        serde_json::to_string(&snapshot).map_err(js_error)
    }

    /// Names of events since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<String> {
        self.game
            .drain_events()
            .into_iter()
            .map(|e| format!("{e:?}"))
            .collect()
    }
}
