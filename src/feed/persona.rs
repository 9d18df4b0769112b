//! Commenter personas
//!
//! Visitors pick one of a fixed set of family identities before a comment
//! is written. Nothing about a persona is stored; the name ends up in the
//! comment's `author` column.

use std::fmt;

/// Shown when a comment or entry has no author
pub const DEFAULT_AUTHOR: &str = "Schweini";

/// A named identity a commenter chooses before posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Persona {
    Elisa,
    Mama,
    Papa,
    Oma,
    Opa,
    Wonkel,
    Schweini,
}

impl Persona {
    /// All personas in the order the chooser shows them
    pub const ALL: [Persona; 7] = [
        Persona::Elisa,
        Persona::Mama,
        Persona::Papa,
        Persona::Oma,
        Persona::Opa,
        Persona::Wonkel,
        Persona::Schweini,
    ];

    /// Display name, also written to the `author` column
    pub fn name(&self) -> &'static str {
        match self {
            Persona::Elisa => "Elisa",
            Persona::Mama => "Mama",
            Persona::Papa => "Papa",
            Persona::Oma => "Oma",
            Persona::Opa => "Opa",
            Persona::Wonkel => "Wonkel",
            Persona::Schweini => "Schweini",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Persona::Elisa => "👱‍♀️",
            Persona::Mama => "👩🏽",
            Persona::Papa => "🧔",
            Persona::Oma => "👵",
            Persona::Opa => "👴",
            Persona::Wonkel => "🤠",
            Persona::Schweini => "🐷",
        }
    }

    /// Color classes of the persona's button in the chooser
    pub fn chip_classes(&self) -> &'static str {
        match self {
            Persona::Elisa => "bg-teal-50 border-teal-200 text-teal-800",
            Persona::Mama => "bg-pink-50 border-pink-200 text-pink-700",
            Persona::Papa => "bg-blue-50 border-blue-200 text-blue-700",
            Persona::Oma | Persona::Opa => "bg-purple-50 border-purple-200 text-purple-700",
            Persona::Wonkel => "bg-yellow-50 border-yellow-200 text-yellow-800",
            Persona::Schweini => "bg-teal-50 border-teal-200 text-teal-700",
        }
    }

    /// Exact-name lookup
    pub fn from_name(name: &str) -> Option<Persona> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Style of this persona's comments
    pub fn comment_style(&self) -> CommentStyle {
        match self {
            Persona::Mama => CommentStyle::PINK,
            Persona::Papa => CommentStyle::BLUE,
            Persona::Wonkel => CommentStyle::YELLOW,
            Persona::Oma | Persona::Opa => CommentStyle::PURPLE,
            Persona::Elisa | Persona::Schweini => CommentStyle::DEFAULT,
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classes used to render one comment bubble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStyle {
    pub border: &'static str,
    pub dot: &'static str,
    pub name: &'static str,
}

impl CommentStyle {
    pub const DEFAULT: CommentStyle = CommentStyle {
        border: "border-teal-300",
        dot: "bg-teal-500",
        name: "text-teal-600",
    };

    pub const PINK: CommentStyle = CommentStyle {
        border: "border-pink-300",
        dot: "bg-pink-500",
        name: "text-pink-600",
    };

    pub const BLUE: CommentStyle = CommentStyle {
        border: "border-blue-300",
        dot: "bg-blue-500",
        name: "text-blue-600",
    };

    pub const YELLOW: CommentStyle = CommentStyle {
        border: "border-yellow-300",
        dot: "bg-yellow-500",
        name: "text-yellow-700",
    };

    pub const PURPLE: CommentStyle = CommentStyle {
        border: "border-purple-300",
        dot: "bg-purple-500",
        name: "text-purple-600",
    };

    /// Style for a stored author name; unknown names get the default
    pub fn for_author(author: Option<&str>) -> CommentStyle {
        author
            .and_then(Persona::from_name)
            .map(|p| p.comment_style())
            .unwrap_or(CommentStyle::DEFAULT)
    }
}
