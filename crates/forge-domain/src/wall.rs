// wall.rs
use chrono::{DateTime, Utc};
use forge_core::{FactoryDispatcher, KitError, Product, ProductFactory};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Tablones necesarios para levantar un muro de madera.
pub const PLANKS_PER_WALL: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallVariant {
    Stone,
    Brick,
    Wood,
}

impl WallVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            WallVariant::Stone => "stone",
            WallVariant::Brick => "brick",
            WallVariant::Wood => "wood",
        }
    }
}

impl fmt::Display for WallVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WallVariant {
    type Err = KitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stone" => Ok(WallVariant::Stone),
            "brick" => Ok(WallVariant::Brick),
            "wood" => Ok(WallVariant::Wood),
            other => Err(KitError::UnknownVariant(other.to_string())),
        }
    }
}

/// Muro construido por alguno de los factories de este módulo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    id: Uuid,
    variant: WallVariant,
    thickness_cm: u32,
    load_bearing: bool,
    built_at: DateTime<Utc>,
}

impl Wall {
    fn new(variant: WallVariant, thickness_cm: u32, load_bearing: bool) -> Self {
        Wall { id: Uuid::new_v4(),
               variant,
               thickness_cm,
               load_bearing,
               built_at: Utc::now() }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> WallVariant {
        self.variant
    }

    pub fn thickness_cm(&self) -> u32 {
        self.thickness_cm
    }

    pub fn is_load_bearing(&self) -> bool {
        self.load_bearing
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

impl Product for Wall {
    fn variant(&self) -> &str {
        self.variant.as_str()
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "Wall(variant: {}, thickness: {}cm, load bearing: {})",
               self.variant, self.thickness_cm, self.load_bearing)
    }
}

pub struct StoneWallFactory;

impl ProductFactory for StoneWallFactory {
    type Output = Wall;

    fn variant(&self) -> &str {
        WallVariant::Stone.as_str()
    }

    fn create(&self) -> Result<Wall, KitError> {
        Ok(Wall::new(WallVariant::Stone, 40, true))
    }
}

pub struct BrickWallFactory;

impl ProductFactory for BrickWallFactory {
    type Output = Wall;

    fn variant(&self) -> &str {
        WallVariant::Brick.as_str()
    }

    fn create(&self) -> Result<Wall, KitError> {
        Ok(Wall::new(WallVariant::Brick, 25, true))
    }
}

/// Muros de madera: requieren tablones curados en stock.
pub struct WoodWallFactory {
    pub seasoned_planks: u32,
}

impl ProductFactory for WoodWallFactory {
    type Output = Wall;

    fn variant(&self) -> &str {
        WallVariant::Wood.as_str()
    }

    fn create(&self) -> Result<Wall, KitError> {
        if self.seasoned_planks < PLANKS_PER_WALL {
            return Err(KitError::creation(self.variant(),
                                          format!("need {PLANKS_PER_WALL} seasoned planks, have {}",
                                                  self.seasoned_planks)));
        }
        Ok(Wall::new(WallVariant::Wood, 12, false))
    }
}

/// Tabla con las tres variantes de muro registradas.
pub fn wall_dispatcher(seasoned_planks: u32) -> FactoryDispatcher<Wall> {
    FactoryDispatcher::new().with(StoneWallFactory)
                            .with(BrickWallFactory)
                            .with(WoodWallFactory { seasoned_planks })
}
