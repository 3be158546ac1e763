use std::fmt;

use serde::{Deserialize, Serialize};

use crate::level::{CefrLevel, Skill};
use crate::lookup::{LookupKind, LookupResult};

#[derive(Debug, Clone)]
pub enum AppEvent {
    ShowHome,
    ShowHub(String),
    ShowPath(String),
    /// Raw discovery query, filters included
    Discover(String),
    OpenLesson {
        course_id: String,
        lesson_id: String,
    },
    OpenArticle(String),
    CloseLesson,
    ActivateWord(usize),
    SetMode(Mode),
    Scrolled,
    ViewportResized(Size),
    LookupResolved {
        session: u64,
        instance: usize,
        result: LookupResult,
    },
    /// Change the general level (`skill: None`) or a skill override;
    /// `level: None` clears the override
    UpdateLevel {
        skill: Option<Skill>,
        level: Option<CefrLevel>,
    },
    Shutdown,
}

/// Presentation mode for inline word annotations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Native-language translation assistance
    #[default]
    Support,
    /// Target-language definitions
    Challenge,
}

impl Mode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "support" => Some(Mode::Support),
            "challenge" => Some(Mode::Challenge),
            _ => None,
        }
    }

    /// Lookup this mode asks for when a word is opened
    pub fn lookup_kind(self) -> LookupKind {
        match self {
            Mode::Support => LookupKind::Translation,
            Mode::Challenge => LookupKind::Definition,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Support => f.write_str("support"),
            Mode::Challenge => f.write_str("challenge"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Anchor rectangle in viewport coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }
}

/// Top-left corner of a fixed-position overlay
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub top: f32,
    pub left: f32,
}
