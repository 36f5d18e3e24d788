//! Desktop shell around the map

pub mod app;
pub mod cell_info;
pub mod map_view;
