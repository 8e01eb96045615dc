// Demo settings. Everything has a default; two knobs can be overridden from the
// environment:
//   PET_CAFE_RESOURCES  directory holding donut.png etc. (default "resources")
//   PET_CAFE_TICK_RATE  update ticks per second (default 120)

use crate::types::Rgb;
use std::path::PathBuf;

pub const RESOURCES_ENV: &str = "PET_CAFE_RESOURCES";
pub const TICK_RATE_ENV: &str = "PET_CAFE_TICK_RATE";

#[derive(Debug, Clone)]
pub struct Config {
    pub title: String,
    pub width: usize,
    pub height: usize,
    pub tick_rate: u32,
    pub background: Rgb,

    pub resource_dir: PathBuf,
    pub animation_frames: usize,
    pub animation_frame_time: f64,

    pub button_pos: (i32, i32),
    pub animated_button_pos: (i32, i32),
    pub silhouette_pos: (i32, i32),
    pub silhouette_color: Rgb,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Pet Cafe".into(),
            width: 800,
            height: 600,
            tick_rate: 120,
            background: Rgb::new(0, 0, 0),
            resource_dir: PathBuf::from("resources"),
            animation_frames: 40,
            animation_frame_time: 1.0 / 24.0,
            button_pos: (400, 300),
            animated_button_pos: (100, 100),
            silhouette_pos: (500, 100),
            silhouette_color: Rgb::new(255, 255, 150),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`; bad values are logged and skipped.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(RESOURCES_ENV).filter(|d| !d.is_empty()) {
            self.resource_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(TICK_RATE_ENV) {
            match raw.trim().parse::<u32>() {
                Ok(rate) if rate > 0 => self.tick_rate = rate,
                _ => log::warn!("ignoring {TICK_RATE_ENV}={raw:?}: expected a positive integer"),
            }
        }
        self
    }

    pub fn static_image(&self, name: &str) -> PathBuf {
        self.resource_dir.join(name)
    }

    /// `<dir>/<folder>/trans-donut0001.png`, ... for frame numbers starting at 1.
    pub fn animation_frame(&self, folder: &str, number: usize) -> PathBuf {
        self.resource_dir.join(folder).join(format!("trans-donut{number:04}.png"))
    }

    pub fn animation_durations(&self) -> Vec<f64> {
        vec![self.animation_frame_time; self.animation_frames]
    }
}
