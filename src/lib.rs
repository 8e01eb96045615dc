//! Sprite demo building blocks: a drift-correcting animation clock, per-pixel
//! hover buttons and alpha-preserving silhouettes, drawn into a minifb window.

pub mod animation;
pub mod assets;
pub mod button;
pub mod clock;
pub mod config;
pub mod draw;
pub mod error;
pub mod scene;
pub mod silhouette;
pub mod sprite;
pub mod texture;
pub mod types;
