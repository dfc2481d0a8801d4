//! Glue between user interface events and the viewer.

use crate::config::ViewerConfig;
use crate::shape::{DisplayMode, ShapeType};
use crate::traits::{SceneRenderer, WindowDimensions};
use crate::viewer::Viewer;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    ShapeSelected(ShapeType),
    ModeSelected(DisplayMode),
    StartClicked,
    Resized(WindowDimensions),
}

/// What the overlay shows
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub title_visible: bool,
    pub selected_shape: ShapeType,
    pub mode: DisplayMode,
}

#[derive(Debug)]
pub struct UiBridge {
    state: UiState,
}

impl UiBridge {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            state: UiState {
                title_visible: true,
                selected_shape: config.initial_shape,
                mode: config.initial_mode,
            },
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn dispatch<R: SceneRenderer + ?Sized>(
        &mut self,
        event: UiEvent,
        viewer: &mut Viewer,
        renderer: &mut R,
    ) {
        match event {
            UiEvent::ShapeSelected(shape) => {
                self.state.selected_shape = shape;
                viewer.controller.change_shape(shape);
            }
            UiEvent::ModeSelected(mode) => {
                self.state.mode = mode;
                // the controller's shape tracks the dropdown, so this rebuilds the selected shape
                viewer.controller.set_mode(mode);
            }
            UiEvent::StartClicked => {
                self.state.title_visible = false;
                viewer.controller.change_shape(self.state.selected_shape);
                viewer.animation.start();
            }
            UiEvent::Resized(dimensions) => viewer.resize(dimensions, renderer),
        }
    }
}
