use bevy::color::Color;
use rand::Rng;

/// Vehicle models drawn for pooled traffic agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleArchetype {
    Sedan,
    Suv,
    Truck,
    Van,
    Hatchback,
    Sports,
    Police,
    Taxi,
    Firetruck,
    Ambulance,
    GarbageTruck,
}

impl VehicleArchetype {
    pub const ALL: [VehicleArchetype; 11] = [
        Self::Sedan,
        Self::Suv,
        Self::Truck,
        Self::Van,
        Self::Hatchback,
        Self::Sports,
        Self::Police,
        Self::Taxi,
        Self::Firetruck,
        Self::Ambulance,
        Self::GarbageTruck,
    ];

    /// Uniform pick across all archetypes.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Sedan => "sedan",
            Self::Suv => "suv",
            Self::Truck => "truck",
            Self::Van => "van",
            Self::Hatchback => "hatchback_sports",
            Self::Sports => "sedan_sports",
            Self::Police => "police",
            Self::Taxi => "taxi",
            Self::Firetruck => "firetruck",
            Self::Ambulance => "ambulance",
            Self::GarbageTruck => "garbage_truck",
        }
    }

    pub fn model_path(self) -> &'static str {
        match self {
            Self::Sedan => "models/cars/sedan.glb",
            Self::Suv => "models/cars/suv.glb",
            Self::Truck => "models/cars/truck.glb",
            Self::Van => "models/cars/van.glb",
            Self::Hatchback => "models/cars/hatchback-sports.glb",
            Self::Sports => "models/cars/sedan-sports.glb",
            Self::Police => "models/cars/police.glb",
            Self::Taxi => "models/cars/taxi.glb",
            Self::Firetruck => "models/cars/firetruck.glb",
            Self::Ambulance => "models/cars/ambulance.glb",
            Self::GarbageTruck => "models/cars/garbage-truck.glb",
        }
    }

    /// Colour of the stand-in block drawn while the model is missing.
    /// Fixed per archetype so placeholder traffic stays distinguishable.
    pub fn placeholder_color(self) -> Color {
        match self {
            Self::Sedan => Color::srgb(1.0, 0.0, 0.0),
            Self::Suv => Color::srgb(0.0, 0.0, 1.0),
            Self::Truck => Color::srgb(1.0, 1.0, 0.0),
            Self::Van => Color::srgb(0.0, 1.0, 0.0),
            Self::Hatchback => Color::srgb(1.0, 0.0, 1.0),
            Self::Sports => Color::srgb(1.0, 0.5, 0.0),
            Self::Police => Color::srgb(0.1, 0.1, 0.4),
            Self::Taxi => Color::srgb(1.0, 0.85, 0.1),
            Self::Firetruck => Color::srgb(0.8, 0.1, 0.1),
            Self::Ambulance => Color::srgb(0.95, 0.95, 0.95),
            Self::GarbageTruck => Color::srgb(0.3, 0.5, 0.2),
        }
    }
}
