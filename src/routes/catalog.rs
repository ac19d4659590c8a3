use axum::Json;

use crate::services::catalog::{DISHES, Dish, EVENTS, Event, LANDMARKS, Landmark, RESTAURANTS, Restaurant};

pub async fn landmarks_handler() -> Json<&'static [Landmark]> {
    Json(LANDMARKS)
}

pub async fn events_handler() -> Json<&'static [Event]> {
    Json(EVENTS)
}

pub async fn restaurants_handler() -> Json<&'static [Restaurant]> {
    Json(RESTAURANTS)
}

pub async fn dishes_handler() -> Json<&'static [Dish]> {
    Json(DISHES)
}
