// Purpose - external interfaces: key layout and sample-clip loading

pub mod keymap;
pub mod samples;

pub use keymap::{Control, Key};
pub use samples::{SampleClip, SampleLibrary, SampleSlot};
