use serde::{Deserialize, Serialize};

/// What a cell really holds, hidden until revealed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Content {
    /// Number of adjacent mines, `0..=8`.
    Count(u8),
    Mine,
    /// The mine that was revealed and ended the game.
    Exploded,
    /// A flag that was placed on a safe cell, marked when the game is lost.
    Mistake,
    /// A mine shown as correctly flagged after the game is won.
    Flagged,
}

impl Content {
    pub const ZERO: Self = Self::Count(0);

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine | Self::Exploded)
    }

    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Count(0))
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Visibility state of a cell. `Revealed` is final for the rest of the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cover {
    Covered,
    Flagged,
    Unknown,
    Revealed,
}

impl Cover {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    /// Next state of the flag cycle, `None` for revealed cells.
    pub const fn next_mark(self) -> Option<Self> {
        match self {
            Self::Covered => Some(Self::Flagged),
            Self::Flagged => Some(Self::Unknown),
            Self::Unknown => Some(Self::Covered),
            Self::Revealed => None,
        }
    }
}

impl Default for Cover {
    fn default() -> Self {
        Self::Covered
    }
}

/// What a renderer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibleKind {
    Covered,
    Flagged,
    Unknown,
    Revealed(u8),
    Mine,
    Exploded,
    Mistake,
}

impl VisibleKind {
    pub const fn from_cell(content: Content, cover: Cover) -> Self {
        match (cover, content) {
            (Cover::Covered, _) => Self::Covered,
            (Cover::Flagged, _) => Self::Flagged,
            (Cover::Unknown, _) => Self::Unknown,
            (Cover::Revealed, Content::Count(count)) => Self::Revealed(count),
            (Cover::Revealed, Content::Mine) => Self::Mine,
            (Cover::Revealed, Content::Exploded) => Self::Exploded,
            (Cover::Revealed, Content::Mistake) => Self::Mistake,
            (Cover::Revealed, Content::Flagged) => Self::Flagged,
        }
    }

    /// Slot in the tile sheet: digits first, then mine, explosion, mistake, covered, flag and
    /// question mark.
    pub const fn sprite_index(self) -> u8 {
        match self {
            Self::Revealed(count) => count,
            Self::Mine => 9,
            Self::Exploded => 10,
            Self::Mistake => 11,
            Self::Covered => 12,
            Self::Flagged => 13,
            Self::Unknown => 14,
        }
    }

    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Covered | Self::Flagged | Self::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_cycle_has_period_three() {
        let mut cover = Cover::Covered;
        for expected in [Cover::Flagged, Cover::Unknown, Cover::Covered] {
            cover = cover.next_mark().unwrap();
            assert_eq!(cover, expected);
        }
        assert_eq!(Cover::Revealed.next_mark(), None);
    }

    #[test]
    fn cover_hides_content() {
        assert_eq!(
            VisibleKind::from_cell(Content::Mine, Cover::Covered),
            VisibleKind::Covered
        );
        assert_eq!(
            VisibleKind::from_cell(Content::Count(3), Cover::Unknown),
            VisibleKind::Unknown
        );
        assert_eq!(
            VisibleKind::from_cell(Content::Count(3), Cover::Revealed),
            VisibleKind::Revealed(3)
        );
        assert_eq!(
            VisibleKind::from_cell(Content::Flagged, Cover::Revealed),
            VisibleKind::Flagged
        );
    }

    #[test]
    fn sprite_indices_are_distinct() {
        let kinds = [
            VisibleKind::Revealed(0),
            VisibleKind::Revealed(8),
            VisibleKind::Mine,
            VisibleKind::Exploded,
            VisibleKind::Mistake,
            VisibleKind::Covered,
            VisibleKind::Flagged,
            VisibleKind::Unknown,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.sprite_index(), b.sprite_index());
            }
        }
        assert_eq!(VisibleKind::Revealed(5).sprite_index(), 5);
    }
}
