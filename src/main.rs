// What you SEE:
// • A still donut button (center) that swaps to its hover look when the cursor
//   is over a non-transparent pixel of it.
// • An animated donut button (top-left) that does the same with a second animation.
// • A flat yellow silhouette of the still donut.
// ESC or closing the window quits. RUST_LOG=debug shows hover changes.

use pet_cafe::clock::{FpsCounter, IntervalScheduler};
use pet_cafe::config::Config;
use pet_cafe::draw::{Drawer, MouseTracker};
use pet_cafe::error::Error;
use pet_cafe::scene::Scene;
use pet_cafe::types::FrameBuffer;
use std::time::Instant;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    log::info!(
        "{} starting: {}x{}, {} ticks/s, resources in {}",
        config.title,
        config.width,
        config.height,
        config.tick_rate,
        config.resource_dir.display()
    );

    /* --- Assets are decoded before the window opens --- */
    let mut scene = Scene::load(&config)?;

    let mut drawer = Drawer::new(&config.title, config.width, config.height, config.tick_rate as usize)?;
    let mut screen = FrameBuffer::new(config.width, config.height);
    let mut mouse = MouseTracker::default();

    let start = Instant::now();
    let mut ticker = IntervalScheduler::with_rate(config.tick_rate, start);
    let mut fps = FpsCounter::new(start);

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        // 1) Fixed-rate update with the real elapsed time
        if let Some(dt) = ticker.poll(now) {
            scene.update(dt);
            scene.drain_events();
        }

        // 2) Mouse moves re-evaluate hover
        if let Some(motion) = mouse.poll(drawer.mouse_pos()) {
            log::trace!("mouse at ({}, {}) moved by ({}, {})", motion.x, motion.y, motion.dx, motion.dy);
            scene.handle_mouse_motion(motion.x, motion.y);
        }

        // 3) Clear, draw, present
        screen.clear(config.background);
        scene.draw(&mut screen);
        drawer.present(&screen)?;

        if let Some(rate) = fps.frame(now) {
            log::info!("FPS: {rate:.1}");
        }
    }

    log::info!("window closed after {:.1}s", start.elapsed().as_secs_f32());
    Ok(())
}
