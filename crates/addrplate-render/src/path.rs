use addrplate_core::geom::{Point, Vector};
use serde::Serialize;

/// One outline command in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", content = "points", rename_all = "snake_case")]
pub enum PathCommand {
    Move(Point),
    Line(Point),
    Curve(Point, Point, Point),
    Close,
}

impl PathCommand {
    pub fn translated(self, by: Vector) -> Self {
        match self {
            PathCommand::Move(p) => PathCommand::Move(p + by),
            PathCommand::Line(p) => PathCommand::Line(p + by),
            PathCommand::Curve(c1, c2, p) => PathCommand::Curve(c1 + by, c2 + by, p + by),
            PathCommand::Close => PathCommand::Close,
        }
    }
}

/// An outline built from [`PathCommand`]s, filled as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    pub fn move_to(mut self, p: Point) -> Self {
        self.commands.push(PathCommand::Move(p));
        self
    }

    pub fn line_to(mut self, p: Point) -> Self {
        self.commands.push(PathCommand::Line(p));
        self
    }

    pub fn curve_to(mut self, c1: Point, c2: Point, p: Point) -> Self {
        self.commands.push(PathCommand::Curve(c1, c2, p));
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Appends `other`'s commands shifted by `offset`.
    pub fn extend_translated(&mut self, other: &[PathCommand], offset: Vector) {
        self.commands.extend(other.iter().map(|cmd| cmd.translated(offset)));
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
