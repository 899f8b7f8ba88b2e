//! Rectangle-then-polygon selection feeding the clipper.
//!
//! Two clicks pick the clip rectangle (any corner order), further clicks
//! add polygon vertices and `finish` clips. Coordinates are whatever space
//! the caller works in; the clip demo feeds NDC.

use crate::geometry::{clip_polygon, ClipRect, Point, Polygon};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Where the selection currently stands
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionState {
    /// Waiting for the rectangle corners
    AwaitingRectangle { first: Option<Point> },
    /// Rectangle fixed, collecting polygon vertices
    AwaitingPolygon { rect: ClipRect, vertices: Polygon },
    /// Polygon closed and clipped
    Clipped {
        rect: ClipRect,
        polygon: Polygon,
        clipped: Polygon,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    /// A polygon needs at least three vertices before it can be clipped
    TooFewVertices { have: usize },
    /// `finish` called before the rectangle was chosen
    NotSelectingPolygon,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::TooFewVertices { have } => {
                write!(f, "polygon needs at least 3 vertices, have {}", have)
            },
            SelectionError::NotSelectingPolygon => write!(f, "no clip rectangle selected yet"),
        }
    }
}

impl std::error::Error for SelectionError {}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    state: SelectionState,
}

impl Selection {
    pub fn new() -> Self {
        Self {
            state: SelectionState::AwaitingRectangle { first: None },
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Clip rectangle, once both corners are known
    pub fn rect(&self) -> Option<&ClipRect> {
        match &self.state {
            SelectionState::AwaitingRectangle { .. } => None,
            SelectionState::AwaitingPolygon { rect, .. } | SelectionState::Clipped { rect, .. } => {
                Some(rect)
            },
        }
    }

    /// Polygon vertices entered so far
    pub fn polygon(&self) -> Option<&Polygon> {
        match &self.state {
            SelectionState::AwaitingRectangle { .. } => None,
            SelectionState::AwaitingPolygon { vertices, .. } => Some(vertices),
            SelectionState::Clipped { polygon, .. } => Some(polygon),
        }
    }

    pub fn clipped(&self) -> Option<&Polygon> {
        match &self.state {
            SelectionState::Clipped { clipped, .. } => Some(clipped),
            _ => None,
        }
    }

    /// Feed a click. Ignored once the polygon has been clipped.
    pub fn click(&mut self, p: Point) {
        match &mut self.state {
            SelectionState::AwaitingRectangle { first: None } => {
                self.state = SelectionState::AwaitingRectangle { first: Some(p) };
            },
            SelectionState::AwaitingRectangle { first: Some(a) } => {
                let rect = ClipRect::from_corners(*a, p);
                log::debug!("clip rectangle {:?} .. {:?}", rect.min, rect.max);
                self.state = SelectionState::AwaitingPolygon {
                    rect,
                    vertices: Polygon::new(),
                };
            },
            SelectionState::AwaitingPolygon { vertices, .. } => {
                vertices.add_vertex(p);
            },
            SelectionState::Clipped { .. } => {},
        }
    }

    /// Close the polygon and clip it against the rectangle.
    ///
    /// Calling again after a successful clip recomputes the same result.
    pub fn finish(&mut self) -> Result<Polygon, SelectionError> {
        let (rect, polygon) = match &self.state {
            SelectionState::AwaitingRectangle { .. } => {
                return Err(SelectionError::NotSelectingPolygon)
            },
            SelectionState::AwaitingPolygon { rect, vertices } => (*rect, vertices.clone()),
            SelectionState::Clipped { rect, polygon, .. } => (*rect, polygon.clone()),
        };

        if !polygon.is_closed() {
            return Err(SelectionError::TooFewVertices {
                have: polygon.len(),
            });
        }

        let clipped = clip_polygon(&polygon, &rect);
        log::info!(
            "clipped {}-vertex polygon to {} vertices",
            polygon.len(),
            clipped.len()
        );
        self.state = SelectionState::Clipped {
            rect,
            polygon,
            clipped: clipped.clone(),
        };
        Ok(clipped)
    }

    /// Step back: drop the last vertex, or the pending first corner
    pub fn undo(&mut self) {
        match &mut self.state {
            SelectionState::AwaitingRectangle { first } => *first = None,
            SelectionState::AwaitingPolygon { vertices, .. } => {
                vertices.pop_vertex();
            },
            SelectionState::Clipped { .. } => {},
        }
    }

    /// Start over
    pub fn reset(&mut self) {
        self.state = SelectionState::AwaitingRectangle { first: None };
    }

    pub fn to_session(&self) -> Session {
        Session {
            rect: self.rect().copied(),
            polygon: self.polygon().cloned().unwrap_or_default(),
        }
    }

    /// Rebuild a selection from a saved session.
    ///
    /// A closed polygon is clipped right away; otherwise vertex entry resumes.
    pub fn from_session(session: Session) -> Self {
        let Some(rect) = session.rect else {
            return Self::new();
        };
        let mut selection = Self {
            state: SelectionState::AwaitingPolygon {
                rect,
                vertices: session.polygon,
            },
        };
        if let Err(e) = selection.finish() {
            log::debug!("session restored without clipping: {}", e);
        }
        selection
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Session persistence
// ============================================================================

#[derive(Debug)]
pub enum SessionError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Io(e) => write!(f, "session file: {}", e),
            SessionError::Json(e) => write!(f, "session format: {}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Io(e) => Some(e),
            SessionError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        SessionError::Io(e)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(e: serde_json::Error) -> Self {
        SessionError::Json(e)
    }
}

/// Saved rectangle and polygon, stored as JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub rect: Option<ClipRect>,
    #[serde(default)]
    pub polygon: Polygon,
}

impl Session {
    /// Save session to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load session from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
