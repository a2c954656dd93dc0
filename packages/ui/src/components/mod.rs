//! Small building blocks shared by every view.

mod button;
mod card;
mod input;
mod photo_picker;

pub use button::{Button, ButtonVariant};
pub use card::{Card, EmptyState, Loading};
pub use input::{Field, Input, Label, TextArea};
pub use photo_picker::PhotoPicker;
