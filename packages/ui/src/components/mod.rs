//! Small form and display primitives shared by every view.

mod badge;
mod button;
mod input;

pub use badge::{Badge, BadgeVariant};
pub use button::{Button, ButtonVariant};
pub use input::{Input, Label};
