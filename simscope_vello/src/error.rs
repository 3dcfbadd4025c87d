// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use winit::error::{EventLoopError, OsError};

/// Errors that end a [`crate::Viewer::run`].
#[derive(Debug)]
pub enum ViewerError {
    /// The event loop could not be created or failed while running.
    EventLoop(EventLoopError),
    /// The window could not be created.
    CreateWindow(OsError),
    /// No GPU surface could be created for the window.
    CreateSurface(vello::Error),
    /// The Vello renderer could not be created.
    CreateRenderer(vello::Error),
    /// Rendering a frame failed.
    Render(vello::Error),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventLoop(_) => f.write_str("event loop failed"),
            Self::CreateWindow(_) => f.write_str("failed to create window"),
            Self::CreateSurface(_) => f.write_str("failed to create render surface"),
            Self::CreateRenderer(_) => f.write_str("failed to create vello renderer"),
            Self::Render(_) => f.write_str("failed to render frame"),
        }
    }
}

impl core::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::EventLoop(e) => Some(e),
            Self::CreateWindow(e) => Some(e),
            Self::CreateSurface(e) | Self::CreateRenderer(e) | Self::Render(e) => Some(e),
        }
    }
}

impl From<EventLoopError> for ViewerError {
    fn from(value: EventLoopError) -> Self {
        Self::EventLoop(value)
    }
}

#[cfg(test)]
mod tests {
    use core::error::Error as _;

    use super::*;

    #[test]
    fn display_names_the_stage_and_source_is_kept() {
        let err = ViewerError::Render(vello::Error::NoCompatibleDevice);
        assert_eq!(err.to_string(), "failed to render frame");
        assert!(err.source().is_some(), "the vello error is the source");
    }
}
