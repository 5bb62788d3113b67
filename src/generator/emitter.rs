use crate::domain::{EntityKind, PlacementRecord};

/// Accumulator for the flat output list.
///
/// Records are appended in stage order and never touched again.
#[derive(Debug, Default)]
pub struct RecordEmitter {
    records: Vec<PlacementRecord>,
}

impl RecordEmitter {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: PlacementRecord) {
        self.records.push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = PlacementRecord>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records of one kind emitted so far
    pub fn count(&self, kind: EntityKind) -> usize {
        self.records.iter().filter(|r| r.kind == kind).count()
    }

    /// Consume the emitter and return the records
    pub fn finish(self) -> Vec<PlacementRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Vec3;

    #[test]
    fn test_emitter_preserves_order() {
        let mut emitter = RecordEmitter::new();
        assert!(emitter.is_empty());

        emitter.push(PlacementRecord::new(EntityKind::Road, Vec3::default()));
        emitter.extend([
            PlacementRecord::new(EntityKind::OakTree, Vec3::new(1.0, 0.0, 0.0)),
            PlacementRecord::new(EntityKind::PineTree, Vec3::new(2.0, 0.0, 0.0)),
        ]);

        assert_eq!(emitter.len(), 3);
        assert_eq!(emitter.count(EntityKind::OakTree), 1);

        let records = emitter.finish();
        let kinds: Vec<_> = records.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![EntityKind::Road, EntityKind::OakTree, EntityKind::PineTree]
        );
    }
}
