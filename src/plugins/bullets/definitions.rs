//! Bullet templates and the registry that owns them.
//!
//! A `BulletDefinition` is immutable configuration. Live bullets copy the fields they need at
//! spawn time, so nothing in flight ever aliases a template.
//!
//! The registry is built once at startup (from the static table below or from RON) and handed to
//! the plugins that need it. Bad numbers are rejected here, not discovered mid-flight.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BulletType(pub u32);

impl BulletType {
    /// What every weapon starts with.
    pub const DEFAULT: BulletType = BulletType(0);
}

impl std::fmt::Display for BulletType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletDefinition {
    pub bullet_type: BulletType,
    pub label: String,
    /// Muzzle speed in world units per second.
    pub speed: f32,
    /// Velocity is multiplied by `(1 / friction)^dt` every tick; must be positive.
    pub friction: f32,
    pub damage: f32,
    pub splash_damage: f32,
    pub splash_range: f32,
    /// Maximum deviation in radians, sampled uniformly in `[-spread, spread]`.
    pub spread: f32,
    pub cooldown: f32,
    pub life: f32,
    /// Side of the square hit box.
    pub size: f32,
    pub color: [f32; 4],
    /// Piercing bullets keep hitting every enemy they overlap; others stop at the first.
    #[serde(default)]
    pub piercing: bool,
}

impl BulletDefinition {
    pub fn has_splash(&self) -> bool {
        self.splash_damage > 0.0 && self.splash_range > 0.0
    }

    pub fn color(&self) -> Color {
        let [r, g, b, a] = self.color;
        Color::srgba(r, g, b, a)
    }

    fn validate(&self) -> Result<(), RegistryError> {
        let invalid = |reason: &'static str| RegistryError::InvalidDefinition {
            bullet_type: self.bullet_type,
            reason,
        };

        let numbers = [
            self.speed,
            self.friction,
            self.damage,
            self.splash_damage,
            self.splash_range,
            self.spread,
            self.cooldown,
            self.life,
            self.size,
        ];
        if numbers.iter().any(|n| !n.is_finite()) {
            return Err(invalid("non-finite number"));
        }
        if self.friction <= 0.0 {
            return Err(invalid("friction must be positive"));
        }
        if self.speed < 0.0 || self.damage < 0.0 {
            return Err(invalid("speed and damage must not be negative"));
        }
        if self.splash_damage < 0.0 || self.splash_range < 0.0 {
            return Err(invalid("splash must not be negative"));
        }
        if self.spread < 0.0 {
            return Err(invalid("spread must not be negative"));
        }
        if self.cooldown < 0.0 {
            return Err(invalid("cooldown must not be negative"));
        }
        if self.life <= 0.0 {
            return Err(invalid("life must be positive"));
        }
        if self.size <= 0.0 {
            return Err(invalid("size must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no bullet definition for type {0}")]
    MissingDefinition(BulletType),
    #[error("bullet type {bullet_type}: {reason}")]
    InvalidDefinition {
        bullet_type: BulletType,
        reason: &'static str,
    },
    #[error("bullet type {0} is defined twice")]
    DuplicateType(BulletType),
    #[error("bullet registry is empty")]
    Empty,
    #[error("bullet table does not parse: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Validated, ordered set of templates.
#[derive(Resource, Debug, Clone)]
pub struct BulletRegistry {
    definitions: Vec<BulletDefinition>,
}

impl BulletRegistry {
    pub fn from_definitions(definitions: Vec<BulletDefinition>) -> Result<Self, RegistryError> {
        if definitions.is_empty() {
            return Err(RegistryError::Empty);
        }
        for (i, def) in definitions.iter().enumerate() {
            def.validate()?;
            if definitions[..i]
                .iter()
                .any(|other| other.bullet_type == def.bullet_type)
            {
                return Err(RegistryError::DuplicateType(def.bullet_type));
            }
        }
        Ok(Self { definitions })
    }

    /// Parse a RON list of definitions, e.g. `assets/bullets.ron`.
    pub fn from_ron(source: &str) -> Result<Self, RegistryError> {
        let definitions: Vec<BulletDefinition> = ron::from_str(source)?;
        Self::from_definitions(definitions)
    }

    /// The built-in table.
    pub fn standard() -> Result<Self, RegistryError> {
        Self::from_definitions(standard_definitions())
    }

    pub fn lookup(&self, bullet_type: BulletType) -> Result<&BulletDefinition, RegistryError> {
        self.definitions
            .iter()
            .find(|def| def.bullet_type == bullet_type)
            .ok_or(RegistryError::MissingDefinition(bullet_type))
    }

    /// The type registered after `current`, wrapping around. Unknown types restart at the first.
    pub fn next_after(&self, current: BulletType) -> BulletType {
        let next = self
            .definitions
            .iter()
            .position(|def| def.bullet_type == current)
            .map_or(0, |i| (i + 1) % self.definitions.len());
        self.definitions[next].bullet_type
    }

    pub fn iter(&self) -> impl Iterator<Item = &BulletDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn template(bullet_type: u32, label: &str) -> BulletDefinition {
    BulletDefinition {
        bullet_type: BulletType(bullet_type),
        label: label.to_string(),
        speed: 225.0,
        friction: 2.0,
        damage: 5.0,
        splash_damage: 0.0,
        splash_range: 0.0,
        spread: 0.0,
        cooldown: 0.1,
        life: 2.0,
        size: 10.0,
        color: [1.0, 1.0, 1.0, 1.0],
        piercing: false,
    }
}

/// Types 0..=4. `assets/bullets.ron` carries the same numbers.
pub fn standard_definitions() -> Vec<BulletDefinition> {
    vec![
        template(0, "Bullet"),
        BulletDefinition {
            speed: 100.0,
            friction: 10.5,
            damage: 10.0,
            splash_damage: 0.1,
            splash_range: 50.0,
            color: [1.0, 0.55, 0.0, 1.0],
            ..template(1, "Exp")
        },
        BulletDefinition {
            speed: 4.0,
            damage: 8.0,
            splash_damage: 2.0,
            splash_range: 2.0,
            cooldown: 0.2,
            color: [0.4, 0.1, 1.0, 1.0],
            piercing: true,
            ..template(2, "Mag")
        },
        BulletDefinition {
            speed: 4.0,
            damage: 8.0,
            splash_damage: 2.0,
            splash_range: 2.0,
            cooldown: 0.4,
            color: [0.4, 0.1, 1.0, 1.0],
            ..template(3, "Bounc")
        },
        BulletDefinition {
            speed: 400.0,
            damage: 2.0,
            spread: 0.1,
            life: 1.0,
            cooldown: 0.02,
            color: [0.56, 0.93, 0.56, 1.0],
            ..template(4, "Mini")
        },
    ]
}
