//! Per-compilation-unit context: the owned source text and the location table.
//!
//! Every token and AST node refers back to the source through a [`LocationId`],
//! an index into the append-only table kept here. Ids are never invalidated;
//! the table only grows while lexing and parsing, and is read-only afterwards.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Stable handle into a [`Context`]'s location table.
pub type LocationId = usize;

/// A byte range into the source text, as offset plus length.
///
/// # Examples
///
/// ```rust
/// use esc::context::Location;
/// let open = Location { offset: 0, len: 1 };
/// let close = Location { offset: 8, len: 1 };
/// assert_eq!(open + close, Location { offset: 0, len: 9 });
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location {
    pub offset: usize,
    pub len: usize,
}

impl Location {
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Exclusive end offset.
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Concatenation: `self` must start at or before `other`, and `other` must
/// end at or after `self`. The result runs from `self`'s start to `other`'s end.
impl Add for Location {
    type Output = Location;

    fn add(self, other: Location) -> Location {
        debug_assert!(
            other.offset >= self.offset,
            "location concatenation out of order: {:?} + {:?}",
            self,
            other
        );
        Location {
            offset: self.offset,
            len: other.end() - self.offset,
        }
    }
}

impl AddAssign for Location {
    fn add_assign(&mut self, other: Location) {
        *self = *self + other;
    }
}

/// Owns one source text plus every location registered against it.
#[derive(Debug)]
pub struct Context {
    name: String,
    src: String,
    locations: Vec<Location>,
}

impl Context {
    /// Creates a context for anonymous input.
    pub fn new(src: impl Into<String>) -> Self {
        Self::from_file("<input>", src)
    }

    /// Creates a context whose diagnostics are attributed to `name`.
    pub fn from_file(name: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            src: src.into(),
            locations: Vec::new(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a span and returns its id. No bounds check is made against
    /// the source; callers derive ranges from the scan itself.
    pub fn add_location(&mut self, offset: usize, len: usize) -> LocationId {
        self.add_span(Location { offset, len })
    }

    /// Registers a pre-built span and returns its id.
    pub fn add_span(&mut self, loc: Location) -> LocationId {
        let id = self.locations.len();
        self.locations.push(loc);
        id
    }

    /// Looks up a previously returned id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this context.
    pub fn location(&self, id: LocationId) -> Location {
        self.locations[id]
    }

    /// The source text covered by a location.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this context.
    pub fn text(&self, id: LocationId) -> &str {
        let loc = self.location(id);
        &self.src[loc.offset..loc.end()]
    }

    /// Number of registered locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// All registered locations in id order.
    pub fn locations(&self) -> impl Iterator<Item = (LocationId, Location)> + '_ {
        self.locations.iter().copied().enumerate()
    }
}
