pub mod engine;
pub mod grid;
pub mod handler;
pub mod render;

pub use crate::domain::model::{Cell, Grid, Row};
pub use crate::domain::ports::{ConfigProvider, MessageSource};
pub use crate::utils::error::Result;
