//! Canvas 2D drawing (wasm only)

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::layout::{self, Rect};
use crate::platform::ActiveGame;
use crate::sim::{HunterState, SnakeState};

const BACKGROUND: &str = "#1e293b";
const GRID_LINE: &str = "rgba(51, 65, 85, 0.35)";
const SNAKE_HEAD: &str = "#60A5FA";
const SNAKE_BODY: &str = "#3B82F6";
const REWARD: &str = "#22C55E";
const WORD_FILL: &str = "rgba(37, 99, 235, 0.85)";
const TEXT: &str = "#ffffff";
const OVERLAY: &str = "rgba(15, 23, 42, 0.8)";

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Attach to the canvas with `id`
    pub fn new(document: &Document, id: &str) -> Option<Self> {
        let canvas = document
            .get_element_by_id(id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    fn resize(&self, w: f32, h: f32) {
        if self.canvas.width() != w as u32 || self.canvas.height() != h as u32 {
            self.canvas.set_width(w as u32);
            self.canvas.set_height(h as u32);
        }
    }

    fn fill_rect(&self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn clear(&self, w: f32, h: f32, grid_step: f32) {
        self.fill_rect(Rect { x: 0.0, y: 0.0, w, h }, BACKGROUND);
        self.ctx.set_fill_style_str(GRID_LINE);
        let mut x = 0.0;
        while x < w {
            self.ctx.fill_rect(x as f64, 0.0, 1.0, h as f64);
            x += grid_step;
        }
        let mut y = 0.0;
        while y < h {
            self.ctx.fill_rect(0.0, y as f64, w as f64, 1.0);
            y += grid_step;
        }
    }

    fn overlay(&self, w: f32, h: f32, text: &str) {
        self.fill_rect(Rect { x: 0.0, y: 0.0, w, h }, OVERLAY);
        self.ctx.set_fill_style_str(TEXT);
        self.ctx.set_font("bold 22px monospace");
        self.ctx.set_text_align("center");
        let _ = self.ctx.fill_text(text, (w / 2.0) as f64, (h / 2.0) as f64);
    }

    pub fn render(&self, game: &ActiveGame) {
        match game {
            ActiveGame::Snake(s) => self.draw_snake(&s.state),
            ActiveGame::Hunter(h) => self.draw_hunter(&h.state),
        }
    }

    fn draw_snake(&self, state: &SnakeState) {
        let side = layout::board_size(state.tuning.grid_size);
        self.resize(side, side);
        self.clear(side, side, crate::consts::CELL_SIZE);

        self.fill_rect(layout::reward_rect(state.reward), REWARD);
        for (i, cell) in state.body.iter().enumerate() {
            let color = if i == 0 { SNAKE_HEAD } else { SNAKE_BODY };
            self.fill_rect(layout::segment_rect(*cell), color);
        }

        if let Some(text) = layout::snake_overlay(state) {
            self.overlay(side, side, &text);
        }
    }

    fn draw_hunter(&self, state: &HunterState) {
        let w = state.tuning.viewport_width;
        let h = state.tuning.viewport_height;
        self.resize(w, h);
        self.clear(w, h, 40.0);

        self.ctx.set_font("bold 14px sans-serif");
        self.ctx.set_text_align("left");
        for word in state.words_by_age() {
            let width = (word.text.len() as f32 * 10.0 + 24.0).min(state.tuning.word_width);
            self.fill_rect(
                Rect {
                    x: word.x,
                    y: word.y,
                    w: width,
                    h: 26.0,
                },
                WORD_FILL,
            );
            self.ctx.set_fill_style_str(TEXT);
            let _ = self
                .ctx
                .fill_text(&word.text, (word.x + 12.0) as f64, (word.y + 18.0) as f64);
        }

        if let Some(text) = layout::hunter_overlay(state) {
            self.overlay(w, h, &text);
        }
    }
}

/// Write the HUD fields for the open game
pub fn update_hud(document: &Document, game: &ActiveGame) {
    let set = |id: &str, text: &str| {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    };
    match game {
        ActiveGame::Snake(s) => {
            set("hud-score", &s.state.score.to_string());
            set("hud-high", &s.high_score().to_string());
            set("hud-lives", "");
            set("hud-level", "");
        }
        ActiveGame::Hunter(h) => {
            set("hud-score", &h.state.score.to_string());
            set("hud-high", "");
            set(
                "hud-lives",
                &layout::lives_pips(h.state.lives, h.state.tuning.start_lives),
            );
            set("hud-level", &h.state.level.to_string());
        }
    }
}
