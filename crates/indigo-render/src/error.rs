use std::any::Any;

use indigo_geom::BlockPos;
use indigo_lighting::Block;
use thiserror::Error;

/// A panic raised while a block model emitted or its quads were tessellated.
#[derive(Debug, Error)]
#[error("tessellating block {block:?} at ({}, {}, {}) failed: {message}", pos.x, pos.y, pos.z)]
pub struct RenderCrash {
    pub pos: BlockPos,
    pub block: Block,
    pub message: String,
}

pub(crate) fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
