// src/display.rs

//! The presentation seam between the compositor and the display hardware.
//!
//! [`DisplayBackend`] is the write side: the compositor hands it a pixel
//! rectangle to show and polls it for input. [`HeadlessBackend`] is the
//! in-crate implementation, an in-memory sink that records every presented
//! rectangle so tests can assert exactly what would have reached a screen.

use anyhow::Result;

use crate::surface::PixelSurface;

/// An input event reported by a display backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendEvent {
    /// A raw key byte.
    Key(u8),
    /// The backend wants the application to exit.
    Quit,
}

/// A rectangle handed to [`DisplayBackend::present`], in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentedRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Interface to whatever puts pixels on a screen.
pub trait DisplayBackend {
    /// Copies the given surface rectangle to the display.
    fn present(
        &mut self,
        surface: &PixelSurface,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<()>;

    /// Returns the next pending input event, if any.
    fn poll_input(&mut self) -> Option<BackendEvent>;
}

/// A backend with no display attached.
///
/// Presents are recorded instead of shown; input events are whatever the
/// test queued.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    queued: Vec<BackendEvent>,
    presented: Vec<PresentedRect>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an input event for a later [`poll_input`](DisplayBackend::poll_input).
    pub fn push_input(&mut self, event: BackendEvent) {
        self.queued.push(event);
    }

    /// Every rectangle presented so far, in call order.
    pub fn presented(&self) -> &[PresentedRect] {
        &self.presented
    }

    /// Forgets recorded presents.
    pub fn clear_presented(&mut self) {
        self.presented.clear();
    }
}

impl DisplayBackend for HeadlessBackend {
    fn present(
        &mut self,
        _surface: &PixelSurface,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<()> {
        self.presented.push(PresentedRect {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn poll_input(&mut self) -> Option<BackendEvent> {
        if self.queued.is_empty() {
            None
        } else {
            Some(self.queued.remove(0))
        }
    }
}
