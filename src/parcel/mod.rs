mod store;

pub use store::{BatchReport, ParcelEntry, ParcelId, ParcelOutcome, ParcelStore};

use std::collections::BTreeMap;

use crate::bearing::{BearingService, Bucket};
use crate::error::{BearingError, GeometryError, Result};
use crate::geometry::{Ring, Segment};
use crate::operations::{LotLineResult, LotLines};

/// Attribute key holding an edge's bearing.
pub const BEARING: &str = "bearing";

/// Attribute key naming a rectangle side, `side_1` to `side_4`.
pub const SIDE_NAME: &str = "side_name";

/// Attribute key holding the bucket of a classified lot line.
pub const LOT_LINE: &str = "lot_line";

/// Whether the minimum rotated rectangle is computed with the parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MbrMode {
    /// Parcel edges only.
    #[default]
    Skip,
    /// Also compute the rectangle's edges, bearings and side names.
    Compute,
}

/// Selects which edge list an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSet {
    Parcel,
    Mbr,
}

/// A value stored in an edge's attribute map.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Number(f64),
    Text(String),
    Flag(bool),
    Bucket(Bucket),
}

impl AttributeValue {
    /// The number, if this is a `Number`.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The text, if this is a `Text`.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<Bucket> for AttributeValue {
    fn from(value: Bucket) -> Self {
        Self::Bucket(value)
    }
}

/// Per-edge attributes, keyed by name.
pub type EdgeAttributes = BTreeMap<String, AttributeValue>;

/// One edge with its bearing and attributes.
#[derive(Debug, Clone, Copy)]
pub struct EdgeView<'a> {
    pub index: usize,
    pub segment: Segment,
    pub bearing: f64,
    pub attributes: &'a EdgeAttributes,
}

/// Parallel edge, bearing and attribute lists.
#[derive(Debug, Clone)]
struct EdgeTable {
    segments: Vec<Segment>,
    bearings: Vec<f64>,
    attributes: Vec<EdgeAttributes>,
}

impl EdgeTable {
    fn new<S: BearingService + ?Sized>(
        segments: Vec<Segment>,
        service: &S,
    ) -> std::result::Result<Self, BearingError> {
        let bearings = segments
            .iter()
            .map(|seg| seg.bearing(service))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let attributes = bearings
            .iter()
            .map(|&b| EdgeAttributes::from([(BEARING.to_owned(), AttributeValue::Number(b))]))
            .collect();
        Ok(Self {
            segments,
            bearings,
            attributes,
        })
    }

    fn check(&self, index: usize) -> std::result::Result<(), GeometryError> {
        if index < self.segments.len() {
            Ok(())
        } else {
            Err(GeometryError::EdgeIndexOutOfRange {
                index,
                len: self.segments.len(),
            })
        }
    }
}

/// A parcel polygon with indexed edges.
///
/// Edge `i` runs from ring vertex `i` to vertex `i + 1`. Every edge starts
/// out with a [`BEARING`] attribute; rectangle edges also get a
/// [`SIDE_NAME`].
#[derive(Debug, Clone)]
pub struct ParcelEdges {
    ring: Ring,
    parcel: EdgeTable,
    mbr: Option<EdgeTable>,
}

impl ParcelEdges {
    /// Builds the edge model of `ring`, computing bearings with `service`.
    ///
    /// # Errors
    ///
    /// - `LotLineError::Bearing` if the service fails on any edge
    /// - `LotLineError::Geometry` if `mode` is [`MbrMode::Compute`] and the
    ///   ring is collinear
    pub fn new<S: BearingService + ?Sized>(ring: Ring, service: &S, mode: MbrMode) -> Result<Self> {
        let parcel = EdgeTable::new(ring.segments().collect(), service)?;
        let mbr = match mode {
            MbrMode::Skip => None,
            MbrMode::Compute => {
                let mut table = EdgeTable::new(ring.mbr_edges()?.to_vec(), service)?;
                for (i, attrs) in table.attributes.iter_mut().enumerate() {
                    attrs.insert(SIDE_NAME.to_owned(), format!("side_{}", i + 1).into());
                }
                Some(table)
            }
        };
        Ok(Self { ring, parcel, mbr })
    }

    /// The parcel ring.
    #[must_use]
    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    /// The parcel's edges in ring order.
    #[must_use]
    pub fn edges(&self) -> &[Segment] {
        &self.parcel.segments
    }

    /// The parcel's edge bearings, parallel to [`ParcelEdges::edges`].
    #[must_use]
    pub fn bearings(&self) -> &[f64] {
        &self.parcel.bearings
    }

    /// Bearing of parcel edge `index`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::EdgeIndexOutOfRange` for a bad index.
    pub fn bearing(&self, index: usize) -> std::result::Result<f64, GeometryError> {
        self.parcel.check(index)?;
        Ok(self.parcel.bearings[index])
    }

    /// The rectangle's edges, if computed.
    #[must_use]
    pub fn mbr_edges(&self) -> Option<&[Segment]> {
        self.mbr.as_ref().map(|t| t.segments.as_slice())
    }

    /// The rectangle's edge bearings, if computed.
    #[must_use]
    pub fn mbr_bearings(&self) -> Option<&[f64]> {
        self.mbr.as_ref().map(|t| t.bearings.as_slice())
    }

    /// Bearings of the first two rectangle edges, the default lot line
    /// references.
    #[must_use]
    pub fn reference_bearings(&self) -> Option<[f64; 2]> {
        self.mbr.as_ref().map(|t| [t.bearings[0], t.bearings[1]])
    }

    /// Sets `key` on edge `index` of `set`, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::EdgeIndexOutOfRange` for a bad index. Every
    /// index of [`EdgeSet::Mbr`] is out of range when the rectangle was
    /// skipped.
    pub fn set_attribute(
        &mut self,
        set: EdgeSet,
        index: usize,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> std::result::Result<Option<AttributeValue>, GeometryError> {
        let table = self.table_mut(set, index)?;
        table.check(index)?;
        Ok(table.attributes[index].insert(key.into(), value.into()))
    }

    /// Value of `key` on edge `index` of `set`, `None` if unset.
    ///
    /// # Errors
    ///
    /// Same as [`ParcelEdges::set_attribute`].
    pub fn attribute(
        &self,
        set: EdgeSet,
        index: usize,
        key: &str,
    ) -> std::result::Result<Option<&AttributeValue>, GeometryError> {
        Ok(self.attributes(set, index)?.get(key))
    }

    /// All attributes of edge `index` of `set`.
    ///
    /// # Errors
    ///
    /// Same as [`ParcelEdges::set_attribute`].
    pub fn attributes(
        &self,
        set: EdgeSet,
        index: usize,
    ) -> std::result::Result<&EdgeAttributes, GeometryError> {
        let table = self.table(set, index)?;
        table.check(index)?;
        Ok(&table.attributes[index])
    }

    /// Iterates the edges of `set` with their bearings and attributes.
    /// Empty for [`EdgeSet::Mbr`] when the rectangle was skipped.
    pub fn edge_views(&self, set: EdgeSet) -> impl Iterator<Item = EdgeView<'_>> {
        let table = match set {
            EdgeSet::Parcel => Some(&self.parcel),
            EdgeSet::Mbr => self.mbr.as_ref(),
        };
        table.into_iter().flat_map(|t| {
            t.segments
                .iter()
                .zip(&t.bearings)
                .zip(&t.attributes)
                .enumerate()
                .map(|(index, ((segment, bearing), attributes))| EdgeView {
                    index,
                    segment: *segment,
                    bearing: *bearing,
                    attributes,
                })
        })
    }

    /// Runs lot line extraction on the parcel ring.
    ///
    /// When the rectangle was computed its first two bearings are used as the
    /// references, otherwise the extraction computes them itself.
    ///
    /// # Errors
    ///
    /// See [`LotLines::execute`].
    pub fn lot_lines<S: BearingService + ?Sized>(&self, service: &S) -> Result<LotLineResult> {
        let mut op = LotLines::new(self.ring.clone());
        if let Some(reference) = self.reference_bearings() {
            op = op.with_reference_bearings(reference);
        }
        op.execute(service)
    }

    /// Tags every parcel edge covered by a classified lot line with a
    /// [`LOT_LINE`] attribute holding its bucket. Tags from an earlier call
    /// are removed first.
    pub fn apply_lot_lines(&mut self, result: &LotLineResult) {
        for attrs in &mut self.parcel.attributes {
            attrs.remove(LOT_LINE);
        }
        let n = self.parcel.segments.len();
        for edge in result.edges() {
            for k in 0..edge.polyline.segment_count() {
                let i = (edge.start_index + k) % n;
                self.parcel.attributes[i].insert(LOT_LINE.to_owned(), edge.bucket.into());
            }
        }
    }

    fn table(&self, set: EdgeSet, index: usize) -> std::result::Result<&EdgeTable, GeometryError> {
        let table = match set {
            EdgeSet::Parcel => Some(&self.parcel),
            EdgeSet::Mbr => self.mbr.as_ref(),
        };
        table.ok_or(GeometryError::EdgeIndexOutOfRange { index, len: 0 })
    }

    fn table_mut(
        &mut self,
        set: EdgeSet,
        index: usize,
    ) -> std::result::Result<&mut EdgeTable, GeometryError> {
        let table = match set {
            EdgeSet::Parcel => Some(&mut self.parcel),
            EdgeSet::Mbr => self.mbr.as_mut(),
        };
        table.ok_or(GeometryError::EdgeIndexOutOfRange { index, len: 0 })
    }
}
