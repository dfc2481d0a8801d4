use std::sync::Arc;

use anyhow::{Context, Result};
use winit::event_loop::ActiveEventLoop;
use winit::window::Window as WinitWindow;

use crate::config::WindowConfig;
use crate::traits::{WindowContext, WindowDimensions};

/// Wrapper around the winit window the viewer draws into
pub struct Window {
    inner: Arc<WinitWindow>,
}

impl Window {
    pub fn new(window: Arc<WinitWindow>) -> Self {
        Self { inner: window }
    }

    pub fn create(event_loop: &ActiveEventLoop, config: &WindowConfig) -> Result<Self> {
        let window = event_loop
            .create_window(
                WinitWindow::default_attributes()
                    .with_title(config.title.as_str())
                    .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height)),
            )
            .context("Failed to create window")?;
        Ok(Self::new(Arc::new(window)))
    }

    pub fn inner(&self) -> &Arc<WinitWindow> {
        &self.inner
    }
}

impl WindowContext for Window {
    fn dimensions(&self) -> WindowDimensions {
        self.inner.inner_size().into()
    }

    fn request_redraw(&self) {
        self.inner.request_redraw();
    }
}
