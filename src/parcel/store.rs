use slotmap::SlotMap;
use tracing::{debug, error};

use super::{MbrMode, ParcelEdges};
use crate::bearing::BearingService;
use crate::error::{LotLineError, Result, StoreError};
use crate::geometry::Ring;
use crate::operations::{ClassifiedEdge, LotLineResult};

slotmap::new_key_type! {
    /// Unique identifier for a parcel in the parcel store.
    pub struct ParcelId;
}

/// A stored parcel and the label it is known by outside the store.
#[derive(Debug, Clone)]
pub struct ParcelEntry {
    pub label: String,
    pub parcel: ParcelEdges,
}

/// What happened to one parcel during a batch run.
#[derive(Debug)]
pub enum ParcelOutcome {
    /// Lot lines were extracted; may be empty when the hull did not split.
    Classified(Vec<ClassifiedEdge>),
    /// The convex hull had 3 or fewer edges.
    NotClassifiable,
    /// Extraction failed for this parcel only.
    Failed(LotLineError),
}

impl ParcelOutcome {
    /// Whether extraction failed for this parcel.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Per-parcel outcomes of [`ParcelStore::classify_all`], in store order.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<(ParcelId, ParcelOutcome)>,
}

impl BatchReport {
    /// Outcome for `id`, if it took part in the batch.
    #[must_use]
    pub fn outcome(&self, id: ParcelId) -> Option<&ParcelOutcome> {
        self.outcomes
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, outcome)| outcome)
    }

    /// Iterates `(id, outcome)` pairs in batch order.
    pub fn iter(&self) -> impl Iterator<Item = (ParcelId, &ParcelOutcome)> {
        self.outcomes.iter().map(|(id, outcome)| (*id, outcome))
    }

    /// Number of parcels in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether the batch ran over no parcels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of parcels with extracted lot lines.
    #[must_use]
    pub fn classified_count(&self) -> usize {
        self.count(|o| matches!(o, ParcelOutcome::Classified(_)))
    }

    /// Number of parcels rejected as not classifiable.
    #[must_use]
    pub fn not_classifiable_count(&self) -> usize {
        self.count(|o| matches!(o, ParcelOutcome::NotClassifiable))
    }

    /// Number of parcels that failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(ParcelOutcome::is_failed)
    }

    fn count(&self, pred: impl Fn(&ParcelOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Arena that owns the parcels of a batch.
#[derive(Debug, Default)]
pub struct ParcelStore {
    parcels: SlotMap<ParcelId, ParcelEntry>,
}

impl ParcelStore {
    /// Creates a new, empty parcel store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parcel and returns its ID.
    pub fn insert(&mut self, label: impl Into<String>, parcel: ParcelEdges) -> ParcelId {
        self.parcels.insert(ParcelEntry {
            label: label.into(),
            parcel,
        })
    }

    /// Builds the edge model of `ring` and inserts it.
    ///
    /// # Errors
    ///
    /// See [`ParcelEdges::new`].
    pub fn insert_ring<S: BearingService + ?Sized>(
        &mut self,
        label: impl Into<String>,
        ring: Ring,
        service: &S,
        mode: MbrMode,
    ) -> Result<ParcelId> {
        let parcel = ParcelEdges::new(ring, service, mode)?;
        Ok(self.insert(label, parcel))
    }

    /// Returns a reference to the parcel entry, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the parcel is not found in the store.
    pub fn get(&self, id: ParcelId) -> std::result::Result<&ParcelEntry, StoreError> {
        self.parcels
            .get(id)
            .ok_or_else(|| StoreError::ParcelNotFound(format!("{id:?}")))
    }

    /// Returns a mutable reference to the parcel entry, or an error if not
    /// found.
    ///
    /// # Errors
    ///
    /// Returns an error if the parcel is not found in the store.
    pub fn get_mut(&mut self, id: ParcelId) -> std::result::Result<&mut ParcelEntry, StoreError> {
        self.parcels
            .get_mut(id)
            .ok_or_else(|| StoreError::ParcelNotFound(format!("{id:?}")))
    }

    /// Removes a parcel, returning it if it was present.
    pub fn remove(&mut self, id: ParcelId) -> Option<ParcelEntry> {
        self.parcels.remove(id)
    }

    /// ID of the first parcel with `label`.
    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<ParcelId> {
        self.parcels
            .iter()
            .find(|(_, entry)| entry.label == label)
            .map(|(id, _)| id)
    }

    /// Number of stored parcels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parcels.len()
    }

    /// Whether the store holds no parcels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parcels.is_empty()
    }

    /// Iterates all parcels with their IDs.
    pub fn iter(&self) -> impl Iterator<Item = (ParcelId, &ParcelEntry)> {
        self.parcels.iter()
    }

    /// Extracts lot lines for every parcel and tags the covered edges.
    ///
    /// A failing parcel is logged and recorded as [`ParcelOutcome::Failed`];
    /// the batch carries on with the next one.
    pub fn classify_all<S: BearingService + ?Sized>(&mut self, service: &S) -> BatchReport {
        let mut report = BatchReport::default();
        for (id, entry) in &mut self.parcels {
            let outcome = match entry.parcel.lot_lines(service) {
                Ok(result) => {
                    entry.parcel.apply_lot_lines(&result);
                    match result {
                        LotLineResult::NotClassifiable => {
                            debug!(label = %entry.label, "parcel is not classifiable");
                            ParcelOutcome::NotClassifiable
                        }
                        LotLineResult::Classified(edges) => ParcelOutcome::Classified(edges),
                    }
                }
                Err(err) => {
                    error!(label = %entry.label, error = %err, "lot line extraction failed");
                    ParcelOutcome::Failed(err)
                }
            };
            report.outcomes.push((id, outcome));
        }
        debug!(
            parcels = report.len(),
            failed = report.failed_count(),
            "batch classification finished"
        );
        report
    }
}
