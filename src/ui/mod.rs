//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the app state and turns it into cells on the terminal.
//! No file or audio I/O happens here.

pub mod button;
pub mod indicator;
pub mod layout;
pub mod page_widget;
pub mod theme;
