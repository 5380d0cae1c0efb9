use sdl2::pixels::PixelFormatEnum;
use sdl2::render::TextureValueError;
use sdl2::video::WindowBuildError;
use sdl2::IntegerOrSdlError;
use thiserror::Error;

use emu8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use emu8_core::FrameBuffer;

/// Bytes per pixel of an RGB24 texture.
const RGB: usize = 3;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("sdl2: {0}")]
    Sdl(String),
    #[error("unable to open window: {0}")]
    Window(#[from] WindowBuildError),
    #[error("unable to create canvas: {0}")]
    Canvas(#[from] IntegerOrSdlError),
    #[error("unable to create texture: {0}")]
    Texture(#[from] TextureValueError),
}

/// # Display
/// Renders the Chip-8 FrameBuffer to an SDL2 window, one lit pixel per
/// `scale` x `scale` block of white.
///
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, DisplayError> {
        let video_subsystem = sdl.video().map_err(DisplayError::Sdl)?;
        let window = video_subsystem
            .window(
                "Emu-8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()?;
        let canvas = window.into_canvas().build()?;

        Ok(Display { canvas })
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 RGB24 texture is a 1D array of bytes that represent concatenated rows of
    /// RGB pixels, so every pixel becomes three equal bytes: 255 when lit, 0 otherwise.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn frame_to_rgb24(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .rows()
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|on| std::iter::repeat(if *on { 0xFF } else { 0x00 }).take(RGB))
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            DISPLAY_WIDTH as u32,
            DISPLAY_HEIGHT as u32,
        )?;

        let pixels = Display::frame_to_rgb24(frame);
        texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| {
                // Rows may be padded out past DISPLAY_WIDTH * RGB bytes
                for (row, line) in pixels.chunks(DISPLAY_WIDTH * RGB).enumerate() {
                    buffer[row * pitch..row * pitch + line.len()].copy_from_slice(line);
                }
            })
            .map_err(DisplayError::Sdl)?;

        self.canvas
            .copy(&texture, None, None)
            .map_err(DisplayError::Sdl)?;
        self.canvas.present();
        Ok(())
    }
}
