mod arena;
mod handle;
mod node;
mod raw_avl_map;
mod size;

pub(crate) use handle::Handle;
pub(crate) use raw_avl_map::{MAX_DEPTH, RawAvlMap};
