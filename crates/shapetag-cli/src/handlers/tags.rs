//! Tags command handler

use crate::error::Result;
use crate::output::OutputWriter;
use shapetag_core::{Registry, TypeTag};

/// Handle the tags command
pub fn handle_tags(output: &mut OutputWriter) -> Result<()> {
    let tags: Vec<TypeTag> = Registry::global().iter().map(|entry| entry.tag).collect();
    output.tags(&tags)
}
