// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tally-mark grouping: counts drawn as gates of five plus loose strokes.

use std::fmt;

/// Strokes in a complete gate before the crossing mark.
pub const STROKES_PER_GROUP: u8 = 4;
/// Value of one complete gate.
pub const GROUP_SIZE: u64 = 5;

/// Grouping of a count into complete gates and a remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyMarks {
    /// Count is zero; presentation shows a "No marks" indicator.
    Empty,
    /// At least one mark.
    Marks(Grouping),
}

/// Non-zero count split into gates and loose strokes; only built by [`render_marks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grouping {
    groups: u64,
    remainder: u8,
}

impl Grouping {
    /// Complete gates (four strokes crossed by a fifth).
    pub fn groups(self) -> u64 {
        self.groups
    }

    /// Loose strokes after the last gate, `0..5`.
    pub fn remainder(self) -> u8 {
        self.remainder
    }
}

/// One visual group of strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkGroup {
    /// Upright strokes in the group.
    pub strokes: u8,
    /// Whether a fifth mark crosses the strokes.
    pub crossed: bool,
}

impl MarkGroup {
    /// Value this group stands for.
    pub fn value(self) -> u64 {
        u64::from(self.strokes) + u64::from(self.crossed)
    }
}

/// Group `count` into gates of five.
pub fn render_marks(count: u64) -> TallyMarks {
    if count == 0 {
        return TallyMarks::Empty;
    }
    #[allow(clippy::cast_possible_truncation)]
    let remainder = (count % GROUP_SIZE) as u8;
    TallyMarks::Marks(Grouping {
        groups: count / GROUP_SIZE,
        remainder,
    })
}

impl TallyMarks {
    /// Number of complete gates.
    pub fn groups(&self) -> u64 {
        match self {
            Self::Empty => 0,
            Self::Marks(grouping) => grouping.groups(),
        }
    }

    /// Loose strokes after the last gate.
    pub fn remainder(&self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Marks(grouping) => grouping.remainder(),
        }
    }

    /// The count this grouping represents.
    pub fn count(&self) -> u64 {
        self.groups() * GROUP_SIZE + u64::from(self.remainder())
    }

    /// Visual groups in drawing order: complete gates, then the remainder.
    pub fn mark_groups(&self) -> impl Iterator<Item = MarkGroup> {
        let gates = (0..self.groups()).map(|_| MarkGroup {
            strokes: STROKES_PER_GROUP,
            crossed: true,
        });
        let rest = Some(self.remainder())
            .filter(|r| *r > 0)
            .map(|strokes| MarkGroup {
                strokes,
                crossed: false,
            });
        gates.chain(rest)
    }
}

impl fmt::Display for TallyMarks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if matches!(self, Self::Empty) {
            return f.write_str("No marks");
        }
        for (i, group) in self.mark_groups().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            for _ in 0..group.strokes {
                f.write_str("|")?;
            }
            if group.crossed {
                f.write_str("/")?;
            }
        }
        Ok(())
    }
}
