// Copyright 2025 the Joinery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop indicators: where a dragged element would land if released now.
//!
//! An [`Indicator`] is produced by the store's drop placeholder query on every
//! `dragenter` and cached in the [`DragSession`](crate::session::DragSession).
//! Its [`Placement`] names a parent, a sibling index inside that parent, and
//! whether the drop lands [`Before`](Position::Before) or [`After`](Position::After)
//! that sibling.
//!
//! The raw index is interpreted differently by the two commit paths:
//!
//! - moving an existing node uses [`Placement::move_index`], which shifts
//!   `After` placements one slot to the right;
//! - inserting a freshly parsed subtree uses [`Placement::insert_index`], which
//!   is the raw index for both positions.
//!
//! ```
//! use joinery_events::indicator::{Placement, Position};
//!
//! let after = Placement::new(1_u32, 1, Position::After);
//! assert_eq!(after.move_index(), 2);
//! assert_eq!(after.insert_index(), 1);
//! ```

use core::fmt;

/// Which side of the sibling at [`Placement::index`] the drop lands on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Position {
    /// In front of the sibling.
    #[default]
    Before,
    /// Behind the sibling.
    After,
}

/// Where a drop lands: a parent, a sibling index, and a side.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement<N> {
    /// The node that receives the dropped element.
    pub parent: N,
    /// Index of the reference sibling among `parent`'s children.
    pub index: usize,
    /// Side of the reference sibling.
    pub position: Position,
}

impl<N> Placement<N> {
    /// Create a placement.
    pub const fn new(parent: N, index: usize, position: Position) -> Self {
        Self {
            parent,
            index,
            position,
        }
    }

    /// Destination index when moving an existing node: `index + 1` after the
    /// reference sibling, `index` before it.
    pub const fn move_index(&self) -> usize {
        match self.position {
            Position::Before => self.index,
            Position::After => self.index + 1,
        }
    }

    /// Destination index when inserting a new subtree: always the raw index.
    pub const fn insert_index(&self) -> usize {
        self.index
    }
}

/// Why a resolved placement may not be committed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The target parent does not accept children.
    NotCanvas,
    /// The dragged node would end up inside itself.
    IntoOwnSubtree,
    /// The dragged node is locked in place.
    Locked,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotCanvas => "target does not accept children",
            Self::IntoOwnSubtree => "cannot drop a node into its own subtree",
            Self::Locked => "node is locked",
        })
    }
}

/// The last drop target computed for the current drag.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Indicator<N> {
    /// Where the drop would land, if anywhere.
    pub placement: Option<Placement<N>>,
    /// Set when the placement is shown but must not be committed.
    pub rejection: Option<Rejection>,
}

impl<N> Indicator<N> {
    /// An indicator for a valid placement.
    pub const fn at(placement: Placement<N>) -> Self {
        Self {
            placement: Some(placement),
            rejection: None,
        }
    }

    /// An indicator that renders `placement` but refuses to commit it.
    pub const fn rejected(placement: Placement<N>, rejection: Rejection) -> Self {
        Self {
            placement: Some(placement),
            rejection: Some(rejection),
        }
    }

    /// The placement a drag end may commit to, if any.
    pub fn committable(&self) -> Option<&Placement<N>> {
        match self.rejection {
            Some(_) => None,
            None => self.placement.as_ref(),
        }
    }

    /// Consuming variant of [`Indicator::committable`].
    pub fn into_committable(self) -> Option<Placement<N>> {
        match self.rejection {
            Some(_) => None,
            None => self.placement,
        }
    }
}
