// Frame-accurate animation clock.
// Each tick adds dt to the time spent on the current frame; once that time
// reaches the frame's duration we move on and carry the overshoot into the
// next frame, so the total run time tracks the wall clock instead of
// accumulating per-frame rounding.

use crate::assets;
use crate::draw::blit_texture;
use crate::error::Error;
use crate::texture::Texture;
use crate::types::FrameBuffer;
use std::path::Path;

/// Two frame times closer than this count as equal.
pub const FRAME_EPSILON: f64 = 1e-9;

#[inline]
pub fn floats_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= FRAME_EPSILON
}

/// One still image plus how long to show it.
/// `duration: None` is a terminal frame: once reached it is held forever.
#[derive(Clone, Debug)]
pub struct Frame {
    pub image: Texture,
    pub duration: Option<f64>,
}

impl Frame {
    pub fn new(image: Texture, duration: Option<f64>) -> Self {
        Self { image, duration }
    }

    #[inline]
    fn display_time(&self) -> f64 {
        self.duration.unwrap_or(f64::INFINITY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loops {
    Finite(u32),
    Infinite,
}

/// Notifications queued by `update`/`finish`; the host drains them with `take_events`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    FrameChanged { index: usize },
    AnimationEnded,
}

#[derive(Clone, Debug)]
pub struct Animation {
    frames: Vec<Frame>,
    current: usize,

    delay: f64,
    loops: Loops,
    current_loop: u32,
    wrapped: bool,

    elapsed_time: f64,
    // time spent on the current frame, and how long this frame should last
    frame_time: f64,
    frame_duration: f64,

    finished: bool,
    events: Vec<AnimationEvent>,
}

impl Animation {
    /// `delay` (seconds) extends only the first showing of frame 0.
    pub fn new(frames: Vec<Frame>, loops: Loops, delay: f64) -> Result<Self, Error> {
        let Some(first) = frames.first() else {
            return Err(Error::InvalidAnimation("no frames".into()));
        };
        if loops == Loops::Finite(0) {
            return Err(Error::InvalidAnimation("loop count must be at least 1".into()));
        }
        if delay.is_nan() || delay < 0.0 {
            return Err(Error::InvalidAnimation(format!("delay {delay} is negative")));
        }
        if let Some((i, d)) = frames
            .iter()
            .enumerate()
            .find_map(|(i, f)| f.duration.filter(|d| d.is_nan() || *d < 0.0).map(|d| (i, d)))
        {
            return Err(Error::InvalidAnimation(format!("frame {i} has negative duration {d}")));
        }

        let frame_duration = first.display_time() + delay;
        Ok(Self {
            frames,
            current: 0,
            delay,
            loops,
            current_loop: 1,
            wrapped: false,
            elapsed_time: 0.0,
            frame_time: 0.0,
            frame_duration,
            finished: false,
            events: Vec::new(),
        })
    }

    /// Pair each image with the duration at the same position.
    pub fn from_image_sequence(
        images: Vec<Texture>,
        durations: &[f64],
        loops: Loops,
        delay: f64,
    ) -> Result<Self, Error> {
        if images.len() != durations.len() {
            return Err(Error::InvalidAnimation(format!(
                "{} images but {} durations",
                images.len(),
                durations.len()
            )));
        }
        let frames = images
            .into_iter()
            .zip(durations)
            .map(|(image, &d)| Frame::new(image, Some(d)))
            .collect();
        Self::new(frames, loops, delay)
    }

    /// Slice a sprite sheet into `rows x cols` equal cells.
    /// Frame order is row-major starting from the top-left cell.
    pub fn from_grid(
        sheet: &Texture,
        rows: u32,
        cols: u32,
        durations: &[f64],
        loops: Loops,
        delay: f64,
    ) -> Result<Self, Error> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidAnimation(format!("{rows}x{cols} grid")));
        }
        let (cell_w, cell_h) = (sheet.width() / cols, sheet.height() / rows);
        if cell_w == 0 || cell_h == 0 {
            return Err(Error::InvalidAnimation(format!(
                "{}x{} image is too small for a {rows}x{cols} grid",
                sheet.width(),
                sheet.height()
            )));
        }

        let mut images = Vec::with_capacity((rows * cols) as usize);
        for row in 0..rows {
            for col in 0..cols {
                let cell = sheet
                    .region(col * cell_w, row * cell_h, cell_w, cell_h)
                    .ok_or_else(|| Error::InvalidAnimation(format!("grid cell ({row},{col}) out of bounds")))?;
                images.push(cell);
            }
        }
        Self::from_image_sequence(images, durations, loops, delay)
    }

    /// Load every file as a frame image.
    pub fn from_files<P: AsRef<Path>>(
        paths: &[P],
        durations: &[f64],
        loops: Loops,
        delay: f64,
    ) -> Result<Self, Error> {
        let images = paths
            .iter()
            .map(|p| assets::load_texture(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_image_sequence(images, durations, loops, delay)
    }

    /// Advance the clock by `dt` seconds. Negative dt counts as zero.
    /// At most one frame transition happens per call.
    pub fn update(&mut self, dt: f64) {
        if self.finished {
            return;
        }
        let dt = dt.max(0.0);

        self.elapsed_time += dt;
        self.frame_time += dt;

        if self.frame_time > self.frame_duration || floats_equal(self.frame_time, self.frame_duration) {
            match self.next_frame_index() {
                None => self.finish(),
                Some(next) => {
                    let time_error = self.frame_time - self.frame_duration;
                    self.frame_duration = self.frames[next].display_time() - time_error;
                    self.frame_time = 0.0;
                    self.change_frame(next);
                }
            }
        }
    }

    /// Stop animating for good and queue `AnimationEnded`.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.events.push(AnimationEvent::AnimationEnded);
        log::debug!("animation ended after {:.3}s on loop {}", self.elapsed_time, self.current_loop);
    }

    fn change_frame(&mut self, index: usize) {
        // `<=` so a one-frame animation still counts its wraps
        if index <= self.current {
            self.wrapped = true;
            if !self.is_infinite() {
                self.current_loop += 1;
            }
        }
        self.current = index;
        self.events.push(AnimationEvent::FrameChanged { index });
    }

    fn next_frame_index(&self) -> Option<usize> {
        let next = self.current + 1;
        if next < self.frames.len() {
            return Some(next);
        }
        match self.loops {
            Loops::Finite(total) if self.current_loop >= total => None,
            _ => Some(0),
        }
    }

    /// The frame shown before the current one, or None on frame 0 before any wrap.
    pub fn previous_frame_index(&self) -> Option<usize> {
        match self.current.checked_sub(1) {
            Some(prev) => Some(prev),
            None if self.wrapped => Some(self.frames.len() - 1),
            None => None,
        }
    }

    /// Drain the notifications queued since the last call.
    pub fn take_events(&mut self) -> Vec<AnimationEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn blit(&self, fb: &mut FrameBuffer, x: i32, y: i32) {
        blit_texture(fb, self.image(), x, y);
    }

    pub fn image(&self) -> &Texture {
        &self.current_frame().image
    }

    pub fn current_frame(&self) -> &Frame {
        &self.frames[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_infinite(&self) -> bool {
        self.loops == Loops::Infinite
    }

    pub fn loops(&self) -> Loops {
        self.loops
    }

    pub fn total_loops(&self) -> Option<u32> {
        match self.loops {
            Loops::Finite(n) => Some(n),
            Loops::Infinite => None,
        }
    }

    pub fn current_loop(&self) -> u32 {
        self.current_loop
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    /// How long the current frame lasts after drift correction.
    pub fn frame_duration(&self) -> f64 {
        self.frame_duration
    }

    /// `delay + loops * sum(durations)`; None when infinite or a frame is terminal.
    pub fn total_duration(&self) -> Option<f64> {
        let Loops::Finite(n) = self.loops else {
            return None;
        };
        let sum: Option<f64> = self.frames.iter().map(|f| f.duration).sum();
        sum.map(|s| self.delay + n as f64 * s)
    }
}
