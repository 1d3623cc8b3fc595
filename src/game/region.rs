//! Terrain segments and the regions they form.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::game::{Edge, Location, PlayerId, Prey, Terrain};

/// Identifier of a terrain segment in the board's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SegmentId(pub u32);

impl SegmentId {
    /// Arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for SegmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Identifier of a region.
///
/// Equal to the id of the segment that spawned the region; surviving a merge
/// never changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RegionId(pub u32);

impl From<SegmentId> for RegionId {
    fn from(id: SegmentId) -> Self {
        Self(id.0)
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Kind of territory, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Territory {
    /// Lake.
    Lake,
    /// Game trail.
    Trail,
    /// Jungle.
    Jungle,
    /// Den (tile centre).
    Den,
}

impl From<Terrain> for Territory {
    fn from(terrain: Terrain) -> Self {
        match terrain {
            Terrain::Lake => Territory::Lake,
            Terrain::Trail => Territory::Trail,
            Terrain::Jungle => Territory::Jungle,
        }
    }
}

/// The smallest unit of territory, owned by exactly one placed tile.
#[derive(Debug, Clone, Serialize)]
pub struct TerrainSegment {
    /// Arena id.
    pub id: SegmentId,
    /// Territory kind.
    pub territory: Territory,
    /// Location of the owning tile.
    pub location: Location,
    /// Edges of the owning tile covered by this segment (empty for a den).
    pub edges: Vec<Edge>,
    /// Region this segment currently belongs to.
    pub region: RegionId,
    /// Lowest keypad slot among `edges`.
    pub zone_min: u8,
    /// Tiger resting on this segment.
    pub tiger: Option<PlayerId>,
    /// Crocodile resting on this segment.
    pub crocodile: Option<PlayerId>,
    /// Prey printed on this segment.
    pub prey: Option<Prey>,
}

/// A token resident in a region, pinned to the segment it was placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resident {
    /// Owning player.
    pub owner: PlayerId,
    /// Segment the token occupies.
    pub segment: SegmentId,
}

/// Kind-specific region data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RegionKind {
    /// A lake.
    Lake,
    /// A game trail.
    Trail,
    /// A jungle and what it borders.
    Jungle {
        /// Dens whose Moore neighbourhood reaches this jungle.
        dens: BTreeSet<RegionId>,
        /// Lakes sharing a tile with this jungle.
        lakes: BTreeSet<RegionId>,
    },
    /// A den on a single tile.
    Den {
        /// Location of the den tile.
        location: Location,
        /// The den tile plus every occupied cell around it.
        moore: Vec<Location>,
    },
}

impl RegionKind {
    /// Payload-free kind.
    #[must_use]
    pub const fn territory(&self) -> Territory {
        match self {
            RegionKind::Lake => Territory::Lake,
            RegionKind::Trail => Territory::Trail,
            RegionKind::Jungle { .. } => Territory::Jungle,
            RegionKind::Den { .. } => Territory::Den,
        }
    }
}

/// Points per completed lake bordering a jungle.
pub const JUNGLE_LAKE_POINTS: u32 = 3;
/// Points per completed den bordering a jungle.
pub const JUNGLE_DEN_POINTS: u32 = 5;

/// A connected territory of one kind.
#[derive(Debug, Clone, Serialize)]
pub struct Region {
    /// Stable identity.
    pub id: RegionId,
    /// Kind and kind-specific payload.
    pub kind: RegionKind,
    /// Member segments, in order of joining.
    pub members: Vec<SegmentId>,
    /// Tiles the region spans.
    pub tiles: BTreeSet<Location>,
    /// Resident tigers.
    pub tigers: Vec<Resident>,
    /// Resident crocodiles.
    pub crocodiles: Vec<Resident>,
    /// Prey on member segments, one entry per animal.
    pub prey: Vec<Prey>,
    /// Structurally complete.
    pub completed: bool,
    /// Points already credited.
    pub scored: bool,
    /// Cached potential score.
    pub potential: u32,
}

impl Region {
    /// Start a region from its first segment.
    #[must_use]
    pub fn new(first: &TerrainSegment) -> Self {
        let kind = match first.territory {
            Territory::Lake => RegionKind::Lake,
            Territory::Trail => RegionKind::Trail,
            Territory::Jungle => RegionKind::Jungle {
                dens: BTreeSet::new(),
                lakes: BTreeSet::new(),
            },
            Territory::Den => RegionKind::Den {
                location: first.location,
                moore: vec![first.location],
            },
        };
        let mut region = Self {
            id: first.region,
            kind,
            members: vec![first.id],
            tiles: BTreeSet::from([first.location]),
            tigers: Vec::new(),
            crocodiles: Vec::new(),
            prey: first.prey.into_iter().collect(),
            completed: false,
            scored: false,
            potential: 0,
        };
        region.potential = region.base_potential();
        region
    }

    /// Payload-free kind.
    #[must_use]
    pub const fn territory(&self) -> Territory {
        self.kind.territory()
    }

    /// Whether any tiger is resident.
    #[must_use]
    pub fn has_tiger(&self) -> bool {
        !self.tigers.is_empty()
    }

    /// Whether any crocodile is resident.
    #[must_use]
    pub fn has_crocodile(&self) -> bool {
        !self.crocodiles.is_empty()
    }

    /// Number of distinct tiles spanned.
    #[must_use]
    pub fn tile_count(&self) -> u32 {
        u32::try_from(self.tiles.len()).unwrap_or(u32::MAX)
    }

    /// Prey left over once each crocodile has eaten one animal.
    #[must_use]
    pub fn surviving_prey(&self) -> u32 {
        let prey = u32::try_from(self.prey.len()).unwrap_or(u32::MAX);
        prey.saturating_sub(self.crocodile_count())
    }

    /// Distinct kinds of prey left once each crocodile has eaten one kind.
    #[must_use]
    pub fn surviving_kinds(&self) -> u32 {
        let kinds = Prey::ALL
            .iter()
            .filter(|kind| self.prey.contains(*kind))
            .count();
        u32::try_from(kinds)
            .unwrap_or(u32::MAX)
            .saturating_sub(self.crocodile_count())
    }

    fn crocodile_count(&self) -> u32 {
        u32::try_from(self.crocodiles.len()).unwrap_or(u32::MAX)
    }

    /// Potential for every kind except jungle, which depends on neighbours.
    ///
    /// Trail: one per tile plus one per surviving animal. Lake: one per tile
    /// times one plus the surviving kinds of prey, doubled once complete.
    /// Den: one for itself plus one per occupied neighbour.
    #[must_use]
    pub fn base_potential(&self) -> u32 {
        match &self.kind {
            RegionKind::Trail => self.tile_count() + self.surviving_prey(),
            RegionKind::Lake => {
                let value = self.tile_count() * (1 + self.surviving_kinds());
                if self.completed { 2 * value } else { value }
            }
            RegionKind::Den { moore, .. } => u32::try_from(moore.len()).unwrap_or(u32::MAX),
            RegionKind::Jungle { .. } => self.potential,
        }
    }

    /// Jungle potential from its completed neighbour counts.
    #[must_use]
    pub const fn jungle_potential(completed_lakes: u32, completed_dens: u32) -> u32 {
        JUNGLE_LAKE_POINTS * completed_lakes + JUNGLE_DEN_POINTS * completed_dens
    }

    /// Players credited when this region scores.
    ///
    /// Every player holding the largest non-zero tiger count is credited; a
    /// tie credits each tied player the full score.
    #[must_use]
    pub fn owners(&self) -> Vec<PlayerId> {
        let mut counts: Vec<(PlayerId, usize)> = Vec::new();
        for tiger in &self.tigers {
            match counts.iter_mut().find(|(p, _)| *p == tiger.owner) {
                Some((_, n)) => *n += 1,
                None => counts.push((tiger.owner, 1)),
            }
        }
        let Some(best) = counts.iter().map(|(_, n)| *n).max() else {
            return Vec::new();
        };
        let mut owners: Vec<PlayerId> = counts
            .into_iter()
            .filter(|(_, n)| *n == best)
            .map(|(p, _)| p)
            .collect();
        owners.sort_unstable();
        owners
    }

    /// Fold `child` into this region. Segment region ids are rewritten by
    /// the caller, which owns the arena.
    pub(crate) fn absorb(&mut self, child: Region) {
        self.members.extend(child.members);
        self.tiles.extend(child.tiles);
        self.tigers.extend(child.tigers);
        self.crocodiles.extend(child.crocodiles);
        self.prey.extend(child.prey);
        if let (
            RegionKind::Jungle { dens, lakes },
            RegionKind::Jungle {
                dens: child_dens,
                lakes: child_lakes,
            },
        ) = (&mut self.kind, child.kind)
        {
            dens.extend(child_dens);
            lakes.extend(child_lakes);
        }
        self.potential = self.base_potential();
    }
}
