// src/services/classifier.rs
//! Keyword intent detection. Matching is plain substring containment on
//! the lower-cased text; the first matching rule wins.

use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub struct Rule<C> {
    pub triggers: &'static [&'static str],
    pub category: C,
}

impl<C> Rule<C> {
    pub const fn new(triggers: &'static [&'static str], category: C) -> Self {
        Self { triggers, category }
    }

    fn matches(&self, lowered: &str) -> bool {
        contains_any(lowered, self.triggers)
    }
}

pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

pub fn classify<C: Copy>(text: &str, rules: &[Rule<C>]) -> Option<C> {
    let lowered = text.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.category)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkIntent {
    GaudiWorks,
    Rambla,
    FullTour,
}

pub const LANDMARK_RULES: &[Rule<LandmarkIntent>] = &[
    Rule::new(&["gaudi", "sagrada", "güell"], LandmarkIntent::GaudiWorks),
    Rule::new(&["rambla"], LandmarkIntent::Rambla),
    Rule::new(&["all", "everything", "tour"], LandmarkIntent::FullTour),
];

pub const FOOD_SWITCH: Rule<()> = Rule::new(&["food", "eat", "restaurant"], ());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodIntent {
    Paella,
    TapasSeafood,
    TraditionalCatalan,
    Market,
    General,
}

pub const FOOD_RULES: &[Rule<FoodIntent>] = &[
    Rule::new(&["paella", "rice"], FoodIntent::Paella),
    Rule::new(&["tapas", "seafood"], FoodIntent::TapasSeafood),
    Rule::new(&["traditional", "catalan"], FoodIntent::TraditionalCatalan),
    Rule::new(&["market", "fresh"], FoodIntent::Market),
];

/// Outcome of routing a tour-guide message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourRoute {
    SwitchToFood,
    Landmarks(Option<LandmarkIntent>),
}

pub fn route_tour(text: &str) -> TourRoute {
    if classify(text, &[FOOD_SWITCH]).is_some() {
        return TourRoute::SwitchToFood;
    }
    TourRoute::Landmarks(classify(text, LANDMARK_RULES))
}

pub fn classify_food(text: &str) -> FoodIntent {
    classify(text, FOOD_RULES).unwrap_or(FoodIntent::General)
}
