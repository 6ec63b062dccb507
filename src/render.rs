//! Canvas 2D render sink (wasm32 only)
//!
//! Strictly read-only over the world: draws one full frame per call and
//! never mutates simulation state. All coordinates are layout units; the
//! device-pixel transform is applied once per frame from the viewport's dpr.

use wasm_bindgen::JsValue;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use crate::consts::*;
use crate::sim::{Obstacle, WorldState};

const STRIPE_WIDTH: f32 = 6.0;
const EDGE_LINE_WIDTH: f64 = 4.0;

/// Draw a complete frame of the world onto the context
pub fn render(ctx: &CanvasRenderingContext2d, world: &WorldState) -> Result<(), JsValue> {
    let w = world.viewport.width as f64;
    let h = world.viewport.height as f64;
    let dpr = world.viewport.dpr as f64;

    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;

    draw_background(ctx, w, h)?;
    draw_track(ctx, world, h);
    draw_stripes(ctx, world);
    for obstacle in &world.obstacles {
        draw_rival(ctx, obstacle)?;
    }
    draw_player(ctx, world)?;
    draw_flash(ctx, world, w, h);

    Ok(())
}

fn draw_background(ctx: &CanvasRenderingContext2d, w: f64, h: f64) -> Result<(), JsValue> {
    let sky: CanvasGradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
    sky.add_color_stop(0.0, "#06061e")?;
    sky.add_color_stop(0.55, "#0b0d25")?;
    sky.add_color_stop(1.0, "#02010d")?;
    ctx.set_fill_style_canvas_gradient(&sky);
    ctx.fill_rect(0.0, 0.0, w, h);
    Ok(())
}

fn draw_track(ctx: &CanvasRenderingContext2d, world: &WorldState, h: f64) {
    let track = &world.track;
    ctx.set_fill_style_str("#11132b");
    ctx.fill_rect(track.left as f64, 0.0, track.width as f64, h);

    // Glowing track edges
    ctx.set_stroke_style_str("rgba(110, 231, 255, 0.5)");
    ctx.set_line_width(EDGE_LINE_WIDTH);
    for x in [track.left as f64, track.right as f64] {
        ctx.begin_path();
        ctx.move_to(x, 0.0);
        ctx.line_to(x, h);
        ctx.stroke();
    }
}

/// Lane-divider markers: one short dash per stripe on every interior lane
/// boundary, scrolling with the world
fn draw_stripes(ctx: &CanvasRenderingContext2d, world: &WorldState) {
    let track = &world.track;
    let spacing = track.lane_width * STRIPE_SPACING_RATIO;
    let length = spacing * STRIPE_LENGTH_RATIO;

    ctx.set_fill_style_str("rgba(148, 163, 255, 0.35)");
    for lane in 1..track.lane_count {
        let x = track.left + track.lane_width * lane as f32 - STRIPE_WIDTH / 2.0;
        for stripe in &world.stripes {
            ctx.fill_rect(
                x as f64,
                (stripe.y - length) as f64,
                STRIPE_WIDTH as f64,
                length as f64,
            );
        }
    }
}

fn draw_rival(ctx: &CanvasRenderingContext2d, obstacle: &Obstacle) -> Result<(), JsValue> {
    let (x, y) = (obstacle.pos.x as f64, obstacle.pos.y as f64);
    let (w, h) = (obstacle.size.x as f64, obstacle.size.y as f64);
    let hue = obstacle.hue;

    let body: CanvasGradient = ctx.create_linear_gradient(x, y, x, y + h);
    body.add_color_stop(0.0, &format!("hsla({hue}, 90%, 62%, 0.95)"))?;
    body.add_color_stop(1.0, &format!("hsla({}, 90%, 45%, 0.9)", hue + 40.0))?;
    ctx.set_fill_style_canvas_gradient(&body);
    ctx.fill_rect(x, y, w, h);

    // Windshield strip near the rear (rivals face down-track)
    ctx.set_fill_style_str("rgba(12, 16, 40, 0.8)");
    ctx.fill_rect(x + w * 0.16, y + h * 0.6, w * 0.68, h * 0.2);
    Ok(())
}

fn draw_player(ctx: &CanvasRenderingContext2d, world: &WorldState) -> Result<(), JsValue> {
    let vehicle = &world.vehicle;
    let (x, y) = (vehicle.pos.x as f64, vehicle.pos.y as f64);
    let (w, h) = (vehicle.size.x as f64, vehicle.size.y as f64);

    if world.boost.active {
        ctx.set_fill_style_str("rgba(110, 231, 255, 0.35)");
        ctx.fill_rect(x - w * 0.2, y - h * 0.15, w * 1.4, h * 1.3);
    }

    let body: CanvasGradient = ctx.create_linear_gradient(x, y, x, y + h);
    body.add_color_stop(0.0, "#6ee7ff")?;
    body.add_color_stop(1.0, "#2563eb")?;
    ctx.set_fill_style_canvas_gradient(&body);
    ctx.fill_rect(x, y, w, h);

    // Cockpit
    ctx.set_fill_style_str("rgba(8, 12, 36, 0.85)");
    ctx.fill_rect(x + w * 0.18, y + h * 0.18, w * 0.64, h * 0.26);
    Ok(())
}

/// Crash flash overlay; alpha decays with the world's raw-ms flash timer
fn draw_flash(ctx: &CanvasRenderingContext2d, world: &WorldState, w: f64, h: f64) {
    if world.flash_timer <= 0.0 {
        return;
    }
    let alpha = (world.flash_timer / 120.0).min(0.7);
    ctx.set_fill_style_str(&format!("rgba(255, 70, 90, {alpha})"));
    ctx.fill_rect(0.0, 0.0, w, h);
}
