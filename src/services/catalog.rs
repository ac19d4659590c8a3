// src/services/catalog.rs
//! Compiled-in Barcelona records. Read-only for the life of the process.

use serde::Serialize;

use super::lookup::Selection;

pub trait CatalogItem {
    fn id(&self) -> u32;
}

#[derive(Debug, Clone, Serialize)]
pub struct Landmark {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub location: &'static str,
    pub image: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: u32,
    pub title: &'static str,
    pub time: &'static str,
    pub location: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: u32,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: &'static str,
    pub specialties: &'static [&'static str],
    pub location: &'static str,
    pub price_range: &'static str,
    pub image: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub best_at: &'static [&'static str],
    pub image: &'static str,
}

macro_rules! impl_catalog_item {
    ($($ty:ty),*) => {
        $(impl CatalogItem for $ty {
            fn id(&self) -> u32 {
                self.id
            }
        })*
    };
}

impl_catalog_item!(Landmark, Event, Restaurant, Dish);

pub static LANDMARKS: &[Landmark] = &[
    Landmark {
        id: 1,
        name: "Sagrada Família",
        description: "Antoni Gaudí's iconic, still-unfinished basilica, a must-see for any Barcelona visitor.",
        location: "C/ de Mallorca, 401",
        image: "https://images.unsplash.com/photo-1583779457094-ab6c595c9d0e?w=800&auto=format&fit=crop",
    },
    Landmark {
        id: 2,
        name: "Parc Güell",
        description: "Famous park with colorful mosaics and whimsical architecture by Gaudí.",
        location: "Carrer d'Olot, 5",
        image: "https://images.unsplash.com/photo-1583422409516-2895a77efded?w=800&auto=format&fit=crop",
    },
    Landmark {
        id: 3,
        name: "La Rambla",
        description: "Barcelona's bustling main street, full of life, cafes, and local color.",
        location: "La Rambla",
        image: "https://images.unsplash.com/photo-1583425595426-5b3f8640deb9?w=800&auto=format&fit=crop",
    },
];

pub static EVENTS: &[Event] = &[
    Event {
        id: 1,
        title: "Open Air Jazz at Parc de la Ciutadella",
        time: "Today, 18:00",
        location: "Parc de la Ciutadella",
        description: "Live jazz in the park. Free entry. Bring your own blanket!",
    },
    Event {
        id: 2,
        title: "Tapas Food Market",
        time: "Tomorrow, 12:00 - 17:00",
        location: "Mercat de Sant Antoni",
        description: "Sample the best local tapas from vendors all over the city.",
    },
];

pub static RESTAURANTS: &[Restaurant] = &[
    Restaurant {
        id: 1,
        name: "La Boqueria Market",
        kind: "Food Market",
        description: "Historic market with fresh produce, tapas bars, and local delicacies.",
        specialties: &["Fresh seafood", "Iberian ham", "Local fruits"],
        location: "La Rambla, 91",
        price_range: "€-€€",
        image: "https://images.unsplash.com/photo-1589213682455-c9f3bbc9c0db?w=800&auto=format&fit=crop",
    },
    Restaurant {
        id: 2,
        name: "Cal Pep",
        kind: "Tapas Bar",
        description: "Intimate tapas bar known for seafood and counter seating.",
        specialties: &["Tuna tartare", "Daily specials", "Fresh seafood"],
        location: "Plaça de les Olles, 8",
        price_range: "€€€",
        image: "https://images.unsplash.com/photo-1593870682262-8c9d5f720cee?w=800&auto=format&fit=crop",
    },
    Restaurant {
        id: 3,
        name: "7 Portes",
        kind: "Traditional Catalan",
        description: "Historic restaurant serving traditional paella since 1836.",
        specialties: &["Paella", "Seafood rice", "Catalan classics"],
        location: "Passeig d'Isabel II, 14",
        price_range: "€€€",
        image: "https://images.unsplash.com/photo-1515443961218-a51367888e4b?w=800&auto=format&fit=crop",
    },
];

pub static DISHES: &[Dish] = &[
    Dish {
        id: 1,
        name: "Paella",
        description: "Traditional Spanish rice dish with seafood or meat.",
        best_at: &["7 Portes", "Can Solé"],
        image: "https://images.unsplash.com/photo-1534080564583-6be75777b70a?w=800&auto=format&fit=crop",
    },
    Dish {
        id: 2,
        name: "Patatas Bravas",
        description: "Fried potatoes with spicy tomato sauce and aioli.",
        best_at: &["Bar Tomás", "El Vaso de Oro"],
        image: "https://images.unsplash.com/photo-1593182440959-ae2447b0c67f?w=800&auto=format&fit=crop",
    },
    Dish {
        id: 3,
        name: "Crema Catalana",
        description: "Catalan custard dessert with caramelized sugar top.",
        best_at: &["Granja La Pallaresa", "Petritxol Café"],
        image: "https://images.unsplash.com/photo-1488477181946-6428a0291777?w=800&auto=format&fit=crop",
    },
];

/// Items to display for a selection, in catalog order. An empty selection shows everything.
pub fn select<'a, T: CatalogItem>(items: &'a [T], selection: &Selection) -> Vec<&'a T> {
    if selection.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| selection.contains(item.id()))
        .collect()
}

/// True when every selected id names a record in `items`.
pub fn contains_all<T: CatalogItem>(items: &[T], selection: &Selection) -> bool {
    selection
        .ids()
        .all(|id| items.iter().any(|item| item.id() == id))
}
