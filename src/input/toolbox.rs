//! Per-tool drawing options.

use super::tool::Tool;
use crate::config::ToolboxConfig;
use crate::draw::{Color, ElementStyle};
use log::debug;
use std::collections::HashMap;

/// Current stroke, fill and size for each drawing tool.
///
/// The board reads the active tool's style at pointer-down, so changes apply to
/// the next element only.
#[derive(Debug, Clone, PartialEq)]
pub struct Toolbox {
    styles: HashMap<Tool, ElementStyle>,
}

impl Default for Toolbox {
    fn default() -> Self {
        Self::from_config(&ToolboxConfig::default())
    }
}

impl Toolbox {
    pub fn from_config(config: &ToolboxConfig) -> Self {
        let styles = Tool::ALL
            .into_iter()
            .filter_map(|tool| config.get(tool).map(|section| (tool, section.to_style())))
            .collect();
        Self { styles }
    }

    /// Style for `tool`; tools without a section (the eraser) get an empty style.
    pub fn style_for(&self, tool: Tool) -> ElementStyle {
        self.styles.get(&tool).copied().unwrap_or_default()
    }

    pub fn set_stroke(&mut self, tool: Tool, stroke: Option<Color>) {
        debug!("Toolbox: {tool} stroke -> {:?}", stroke.map(|c| c.to_hex()));
        self.styles.entry(tool).or_default().stroke = stroke;
    }

    pub fn set_fill(&mut self, tool: Tool, fill: Option<Color>) {
        debug!("Toolbox: {tool} fill -> {:?}", fill.map(|c| c.to_hex()));
        self.styles.entry(tool).or_default().fill = fill;
    }

    pub fn set_size(&mut self, tool: Tool, size: Option<f64>) {
        debug!("Toolbox: {tool} size -> {size:?}");
        self.styles.entry(tool).or_default().size = size;
    }
}
