pub mod app;
pub mod canvas;
pub mod menu;
