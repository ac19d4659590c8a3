// src/services/lookup.rs
use std::collections::BTreeSet;

use serde::Serialize;

use super::classifier::{FoodIntent, LandmarkIntent};

/// Highlighted catalog ids. Empty means "show the whole catalog".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selection(BTreeSet<u32>);

impl Selection {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = u32>) -> Self {
        Self(ids.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.0.contains(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.ids().collect()
    }
}

pub fn landmark_selection(intent: Option<LandmarkIntent>) -> Selection {
    match intent {
        Some(LandmarkIntent::GaudiWorks) => Selection::from_ids([1, 2]),
        Some(LandmarkIntent::Rambla) => Selection::from_ids([3]),
        Some(LandmarkIntent::FullTour) => Selection::from_ids([1, 2, 3]),
        None => Selection::empty(),
    }
}

pub fn restaurant_selection(intent: FoodIntent) -> Selection {
    match intent {
        FoodIntent::Paella => Selection::from_ids([3]),
        FoodIntent::TapasSeafood => Selection::from_ids([1, 2]),
        FoodIntent::TraditionalCatalan => Selection::from_ids([2, 3]),
        FoodIntent::Market => Selection::from_ids([1]),
        FoodIntent::General => Selection::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::{LANDMARKS, RESTAURANTS, contains_all};

    #[test]
    fn landmark_table() {
        assert_eq!(landmark_selection(Some(LandmarkIntent::GaudiWorks)).to_vec(), vec![1, 2]);
        assert_eq!(landmark_selection(Some(LandmarkIntent::Rambla)).to_vec(), vec![3]);
        assert_eq!(landmark_selection(Some(LandmarkIntent::FullTour)).to_vec(), vec![1, 2, 3]);
        assert!(landmark_selection(None).is_empty());
    }

    #[test]
    fn restaurant_table_keeps_overlaps() {
        assert_eq!(restaurant_selection(FoodIntent::TapasSeafood).to_vec(), vec![1, 2]);
        assert_eq!(restaurant_selection(FoodIntent::TraditionalCatalan).to_vec(), vec![2, 3]);
        assert_eq!(restaurant_selection(FoodIntent::Paella).to_vec(), vec![3]);
        assert_eq!(restaurant_selection(FoodIntent::Market).to_vec(), vec![1]);
        assert!(restaurant_selection(FoodIntent::General).is_empty());
    }

    #[test]
    fn every_selection_points_into_its_catalog() {
        for intent in [
            None,
            Some(LandmarkIntent::GaudiWorks),
            Some(LandmarkIntent::Rambla),
            Some(LandmarkIntent::FullTour),
        ] {
            assert!(contains_all(LANDMARKS, &landmark_selection(intent)));
        }
        for intent in [
            FoodIntent::Paella,
            FoodIntent::TapasSeafood,
            FoodIntent::TraditionalCatalan,
            FoodIntent::Market,
            FoodIntent::General,
        ] {
            assert!(contains_all(RESTAURANTS, &restaurant_selection(intent)));
        }
    }
}
