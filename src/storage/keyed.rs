//! Find-or-replace helpers shared by every tracker collection. Collections are plain ordered
//! vectors, a record's identity is whatever its key extraction returns.

/// A record that can be identified inside its collection, either by a natural key (day, date)
/// or by a generated id.
pub trait Keyed {
    type Key: PartialEq;

    fn key(&self) -> Self::Key;
}

/// Replaces the record with the same key as `record`, or appends it if there is none. Positions
/// of existing records never change.
pub fn upsert_by<T, K: PartialEq>(records: &mut Vec<T>, record: T, key: impl Fn(&T) -> K) {
    let record_key = key(&record);
    match records.iter().position(|v| key(v) == record_key) {
        Some(index) => records[index] = record,
        None => records.push(record),
    }
}

/// Operations over a collection of [Keyed] records.
pub trait KeyedCollection<T: Keyed> {
    fn upsert(&mut self, record: T);

    fn find_key(&self, key: &T::Key) -> Option<&T>;

    /// Applies `patch` to the record with `key`. Returns false if there is no such record.
    fn modify_key(&mut self, key: &T::Key, patch: impl FnOnce(&mut T)) -> bool;

    /// Removes the record with `key`. Returns the removed record, if any.
    fn remove_key(&mut self, key: &T::Key) -> Option<T>;
}

impl<T: Keyed> KeyedCollection<T> for Vec<T> {
    fn upsert(&mut self, record: T) {
        upsert_by(self, record, T::key)
    }

    fn find_key(&self, key: &T::Key) -> Option<&T> {
        self.iter().find(|v| v.key() == *key)
    }

    fn modify_key(&mut self, key: &T::Key, patch: impl FnOnce(&mut T)) -> bool {
        match self.iter_mut().find(|v| v.key() == *key) {
            Some(record) => {
                patch(record);
                true
            }
            None => false,
        }
    }

    fn remove_key(&mut self, key: &T::Key) -> Option<T> {
        let index = self.iter().position(|v| v.key() == *key)?;
        Some(self.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::{upsert_by, Keyed, KeyedCollection};

    #[derive(Debug, Clone, PartialEq)]
    struct Slot {
        day: &'static str,
        hour: u8,
        label: &'static str,
    }

    impl Keyed for Slot {
        type Key = (&'static str, u8);

        fn key(&self) -> Self::Key {
            (self.day, self.hour)
        }
    }

    fn slot(day: &'static str, hour: u8, label: &'static str) -> Slot {
        Slot { day, hour, label }
    }

    #[test]
    fn test_upsert_same_key_keeps_single_record() {
        let mut records = vec![];
        records.upsert(slot("Lunes", 9, "Trabajo"));
        records.upsert(slot("Lunes", 9, "Gym"));

        assert_eq!(records, vec![slot("Lunes", 9, "Gym")]);
    }

    #[test]
    fn test_upsert_keeps_positions() {
        let mut records = vec![
            slot("Lunes", 9, "Trabajo"),
            slot("Martes", 9, "Estudio"),
            slot("Lunes", 10, "Hobby"),
        ];
        records.upsert(slot("Martes", 9, "Libre"));
        records.upsert(slot("Viernes", 7, "Gym"));

        assert_eq!(
            records,
            vec![
                slot("Lunes", 9, "Trabajo"),
                slot("Martes", 9, "Libre"),
                slot("Lunes", 10, "Hobby"),
                slot("Viernes", 7, "Gym"),
            ]
        );
    }

    #[test]
    fn test_upsert_by_custom_key() {
        let mut records = vec![slot("Lunes", 9, "Trabajo"), slot("Martes", 9, "Estudio")];
        upsert_by(&mut records, slot("Lunes", 23, "Libre"), |v| v.day);

        assert_eq!(
            records,
            vec![slot("Lunes", 23, "Libre"), slot("Martes", 9, "Estudio")]
        );
    }

    #[test]
    fn test_modify_and_remove() {
        let mut records = vec![slot("Lunes", 9, "Trabajo"), slot("Martes", 9, "Estudio")];

        assert!(records.modify_key(&("Martes", 9), |v| v.label = "Gym"));
        assert!(!records.modify_key(&("Domingo", 9), |v| v.label = "Gym"));
        assert_eq!(records.find_key(&("Martes", 9)).map(|v| v.label), Some("Gym"));

        assert_eq!(records.remove_key(&("Lunes", 9)), Some(slot("Lunes", 9, "Trabajo")));
        assert_eq!(records.remove_key(&("Lunes", 9)), None);
        assert_eq!(records.len(), 1);
    }
}
