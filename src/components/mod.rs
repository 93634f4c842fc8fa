// src/components/mod.rs

// ドラッグ＆ドロップで使うデータ型たち！整理整頓！🧹✨
pub mod item;
pub mod drop_zone;
pub mod position;
pub mod dragging_info;

pub use item::{DraggableItem, ItemId};
pub use drop_zone::{AcceptedType, DropZone, ZoneId, ANY_TYPE};
pub use position::{Position, Rect, Size};
pub use dragging_info::DragGesture;
