mod interaction;
mod tool_settings;

pub use interaction::{CropDrag, InteractionMode};
pub use tool_settings::ToolSettings;
