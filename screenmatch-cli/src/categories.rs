//! Menu categories used by front ends to group commands.

use serde::Serialize;
use std::fmt;

/// Accordion section a command is listed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CommandCategory {
    #[serde(rename = "Settings, Phone & Debug")]
    SettingsPhoneDebug,
    #[serde(rename = "Template Matching")]
    TemplateMatching,
}

impl CommandCategory {
    pub const ALL: [CommandCategory; 2] = [
        CommandCategory::SettingsPhoneDebug,
        CommandCategory::TemplateMatching,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CommandCategory::SettingsPhoneDebug => "Settings, Phone & Debug",
            CommandCategory::TemplateMatching => "Template Matching",
        }
    }
}

impl fmt::Display for CommandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A CLI mode and the category it is shown under.
#[derive(Debug, Serialize)]
pub struct CommandInfo {
    pub name: &'static str,
    pub category: CommandCategory,
}

pub const COMMANDS: [CommandInfo; 3] = [
    CommandInfo {
        name: "find_templates",
        category: CommandCategory::TemplateMatching,
    },
    CommandInfo {
        name: "similar_image",
        category: CommandCategory::TemplateMatching,
    },
    CommandInfo {
        name: "print_schema",
        category: CommandCategory::SettingsPhoneDebug,
    },
];
