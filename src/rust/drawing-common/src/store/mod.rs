//! 描画ストア抽象化とインメモリ実装

pub mod traits;
pub mod memory;

pub use traits::{Drawing, DrawingStore};
pub use memory::MemoryDrawingStore;
