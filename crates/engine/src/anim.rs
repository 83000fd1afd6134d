use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SpriteError {
    #[error("sprite animation requires at least one frame")]
    EmptyFrameList,
    #[error("sprite frame rate must be finite and non-negative, got {0}")]
    InvalidFrameRate(f32),
}

/// Continuous-counter frame selector for discrete image-frame animation.
///
/// The counter accumulates `dt * frames_per_second`; the active frame is the
/// rounded counter. On loop wrap the counter keeps its fractional remainder
/// so repeated full cycles land back on frame zero with no drift.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlayback {
    frames: Vec<String>,
    frames_per_second: f32,
    looping: bool,
    frame_counter: f32,
    frame_index: usize,
}

impl FramePlayback {
    pub fn new(
        frames: Vec<String>,
        frames_per_second: f32,
        looping: bool,
    ) -> Result<Self, SpriteError> {
        if frames.is_empty() {
            return Err(SpriteError::EmptyFrameList);
        }
        if !frames_per_second.is_finite() || frames_per_second < 0.0 {
            return Err(SpriteError::InvalidFrameRate(frames_per_second));
        }
        Ok(Self {
            frames,
            frames_per_second,
            looping,
            frame_counter: 0.0,
            frame_index: 0,
        })
    }

    pub fn advance(&mut self, dt: f32) {
        if !dt.is_finite() {
            return;
        }
        self.frame_counter += dt * self.frames_per_second;
        let len = self.frames.len();
        let mut index = self.frame_counter.round().max(0.0) as usize;
        if index >= len {
            if self.looping {
                // Subtract whole cycles instead of resetting to zero so the
                // fractional remainder carries across the loop boundary.
                while self.frame_counter.round().max(0.0) as usize >= len {
                    self.frame_counter -= len as f32;
                }
                index = self.frame_counter.round().max(0.0) as usize;
            } else {
                index = len - 1;
            }
        }
        self.frame_index = index;
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn current_image(&self) -> &str {
        &self.frames[self.frame_index]
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn looping(&self) -> bool {
        self.looping
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SheetGeometryError {
    #[error("tile size must be non-zero, got {width}x{height}")]
    ZeroTileSize { width: u32, height: u32 },
    #[error(
        "tile size {tile_width}x{tile_height} does not evenly divide \
         sheet size {sheet_width}x{sheet_height}"
    )]
    TileSizeMismatch {
        sheet_width: u32,
        sheet_height: u32,
        tile_width: u32,
        tile_height: u32,
    },
    #[error("frame duration must be finite and positive, got {0}")]
    InvalidDuration(f32),
    #[error("start index {start_index} out of range for {tile_count} tiles")]
    StartIndexOutOfRange {
        start_index: usize,
        tile_count: usize,
    },
}

/// One tile of a sheet animation: pixel offset into the sheet, how long to
/// show it, and which tile plays next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub offset_x: u32,
    pub offset_y: u32,
    pub duration: f32,
    pub next_index: usize,
}

/// Cyclic linked frame sequence over a sprite sheet subdivided into equal
/// tiles, row-major. The last tile of each row wraps back to the first tile
/// of that same row — a row-local cycle, never crossing into the next row.
#[derive(Debug, Clone, PartialEq)]
pub struct TileCycle {
    sheet: String,
    tile_width: u32,
    tile_height: u32,
    frames: Vec<AnimationFrame>,
    current_index: usize,
    elapsed_in_frame: f32,
}

impl TileCycle {
    pub fn new(
        sheet: impl Into<String>,
        sheet_size: (u32, u32),
        tile_size: (u32, u32),
        frame_duration: f32,
        start_index: usize,
    ) -> Result<Self, SheetGeometryError> {
        let (sheet_width, sheet_height) = sheet_size;
        let (tile_width, tile_height) = tile_size;

        if tile_width == 0 || tile_height == 0 {
            return Err(SheetGeometryError::ZeroTileSize {
                width: tile_width,
                height: tile_height,
            });
        }
        if sheet_width % tile_width != 0 || sheet_height % tile_height != 0 {
            return Err(SheetGeometryError::TileSizeMismatch {
                sheet_width,
                sheet_height,
                tile_width,
                tile_height,
            });
        }
        if !frame_duration.is_finite() || frame_duration <= 0.0 {
            return Err(SheetGeometryError::InvalidDuration(frame_duration));
        }

        let columns = (sheet_width / tile_width) as usize;
        let rows = (sheet_height / tile_height) as usize;
        let tile_count = columns * rows;
        if start_index >= tile_count {
            return Err(SheetGeometryError::StartIndexOutOfRange {
                start_index,
                tile_count,
            });
        }

        let mut frames = Vec::with_capacity(tile_count);
        for row in 0..rows {
            for column in 0..columns {
                let index = row * columns + column;
                let next_index = if column + 1 == columns {
                    row * columns
                } else {
                    index + 1
                };
                frames.push(AnimationFrame {
                    offset_x: column as u32 * tile_width,
                    offset_y: row as u32 * tile_height,
                    duration: frame_duration,
                    next_index,
                });
            }
        }

        Ok(Self {
            sheet: sheet.into(),
            tile_width,
            tile_height,
            frames,
            current_index: start_index,
            elapsed_in_frame: 0.0,
        })
    }

    /// Advances the duration state machine, consuming as many whole frame
    /// durations as the elapsed time covers. Looping here (rather than a
    /// single step) keeps playback correct under large dt.
    pub fn advance(&mut self, dt: f32) {
        // An infinite delta would never drop below the frame duration.
        if !dt.is_finite() {
            return;
        }
        self.elapsed_in_frame += dt;
        while self.elapsed_in_frame >= self.frames[self.current_index].duration {
            self.elapsed_in_frame -= self.frames[self.current_index].duration;
            self.current_index = self.frames[self.current_index].next_index;
        }
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_frame(&self) -> &AnimationFrame {
        &self.frames[self.current_index]
    }

    pub fn frames(&self) -> &[AnimationFrame] {
        &self.frames
    }
}
