//! Minimal terminal runtime: an event loop multiplexing terminal input, render
//! frames and a single app-controlled tick deadline.

pub use self::{app::App, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
