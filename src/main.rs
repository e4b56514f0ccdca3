// What you SEE:
// • The front of the jersey, each layer tinted to the design file's colors.
// • The decal on top: drag it to move, drag an edge or corner to resize.
// • R reloads the design file (new colors/assets re-render in the background).
// • ESC quits.

mod cli;
mod color;
mod compositor;
mod design;
mod draw;
mod error;
mod gesture;
mod overlay;
mod recolor;
mod types;
mod worker;

use std::path::Path;
use std::time::{Duration, Instant};

use clap::Parser;

use cli::CliArgs;
use design::Design;
use draw::{draw_outline, draw_text_5x7, Decal, Drawer};
use error::Error;
use gesture::DragTracker;
use overlay::{Bounds, OverlayController, OverlayRect};
use types::{FrameBuffer, SURFACE_HEIGHT, SURFACE_WIDTH};
use worker::RenderWorker;

const BACKGROUND: u32 = 0x00_F4_F4_F4;
const OUTLINE: u32 = 0x00_33_99_FF;
const HUD_TEXT: u32 = 0x00_FF_FF_FF;
const HUD_ERROR: u32 = 0x00_FF_44_44;

/// What the surface area of the window currently holds.
enum Frame {
    Loading,
    Ready(FrameBuffer),
    Failed,
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = CliArgs::parse();
    log::info!("Starting jersey-customizer v{}", env!("CARGO_PKG_VERSION"));

    let mut design = Design::load(&args.design)?;
    let scale = args.scale as usize;
    let mut drawer = Drawer::new(
        "Jersey Customizer",
        SURFACE_WIDTH as usize,
        SURFACE_HEIGHT as usize,
        scale,
    )?;

    /* --- Compositor runs off-thread; UI keeps handling drags meanwhile --- */
    let mut worker = RenderWorker::spawn();
    worker.request(design.selection(), design.palette())?;
    let mut shown_generation = 0;
    let mut frame = Frame::Loading;

    /* --- Decal + its transform --- */
    let decal_path = args.decal.clone().or_else(|| design.decal.clone());
    let mut decal = decal_path.as_deref().and_then(load_decal);
    let mut overlay = OverlayController::new(
        OverlayRect::INITIAL,
        Bounds { width: SURFACE_WIDTH as f32, height: SURFACE_HEIGHT as f32 },
    );
    let mut drag = DragTracker::default();

    let mut screen = FrameBuffer::new(SURFACE_WIDTH as usize * scale, SURFACE_HEIGHT as usize * scale, BACKGROUND);
    let mut last_stats = Instant::now();
    let mut frames_this_second: u32 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Finished renders replace the surface wholesale. */
        if let Some(res) = worker.poll() {
            shown_generation = res.generation;
            frame = match res.surface {
                Ok(surface) => {
                    log::info!("Composite #{} ready", res.generation);
                    Frame::Ready(FrameBuffer::from_rgba(&surface, BACKGROUND, scale))
                }
                Err(e) => {
                    log::error!("Composite #{} aborted: {e}", res.generation);
                    Frame::Failed
                }
            };
        }

        /* 2) Inputs */
        if drawer.r_pressed_once() {
            match Design::load(&args.design) {
                Ok(d) => {
                    design = d;
                    if args.decal.is_none() {
                        decal = design.decal.as_deref().and_then(load_decal);
                    }
                    worker.request(design.selection(), design.palette())?;
                }
                Err(e) => log::error!("Reload failed, keeping previous design: {e}"),
            }
        }

        if decal.is_some() {
            drag.update(&mut overlay, drawer.mouse_pos(), drawer.left_mouse_down());
        }

        /* 3) Base image */
        match &frame {
            Frame::Ready(fb) => screen.pixels.copy_from_slice(&fb.pixels),
            Frame::Loading | Frame::Failed => screen.pixels.fill(BACKGROUND),
        }

        /* 4) Decal on top */
        if let Some(decal) = decal.as_mut() {
            let rect = overlay.rect();
            decal.draw(&mut screen, &rect, scale);
            if drag.active().is_some() {
                draw_outline(&mut screen, &rect, scale, OUTLINE);
            }
        }

        /* 5) Status line */
        let (status, color) = match &frame {
            _ if worker.is_pending(shown_generation) => ("LOADING...", HUD_TEXT),
            Frame::Failed => ("LOAD FAILED - SEE LOG", HUD_ERROR),
            _ => ("R: RELOAD  ESC: QUIT", HUD_TEXT),
        };
        draw_text_5x7(&mut screen, 8, (SURFACE_HEIGHT as usize * scale) as i32 - 16, status, color);

        drawer.present(&screen)?;

        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_stats) >= Duration::from_secs(1) {
            let fps = frames_this_second as f32 / now.duration_since(last_stats).as_secs_f32();
            log::debug!("FPS: {:.1}, overlay {:?}", fps, overlay.rect());
            frames_this_second = 0;
            last_stats = now;
        }
    }

    log::info!("Exiting");
    Ok(())
}

/// A missing or broken decal is logged and skipped; the jersey still shows.
fn load_decal(path: &Path) -> Option<Decal> {
    match compositor::load_image(path) {
        Ok(img) => Some(Decal::new(img)),
        Err(e) => {
            log::error!("{e}");
            None
        }
    }
}
