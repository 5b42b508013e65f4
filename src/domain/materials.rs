//! Material definitions and the registry that owns them.
//!
//! A material is a capability set (`movable`, `gravity`, `liquid`, `gas`,
//! `explosive`), not a type hierarchy. The movement rule a material follows is
//! picked by [`MaterialDef::behavior`] with an explicit match over those flags.

use std::collections::HashMap;

use crate::error::{SimError, SimResult};

/// Index into the registry. `u8` keeps the kinds array one byte per cell.
pub type MaterialId = u8;

/// The reserved "no material" kind. Always id 0.
pub const EMPTY: MaterialId = 0;
pub const EMPTY_KEY: &str = "empty";

const MAX_MATERIALS: usize = (MaterialId::MAX as usize) + 1;

/// Movement rule variant selected from a material's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorKind {
    /// Never moves (walls, empty, movable materials without a rule).
    Static,
    /// Solid with gravity: falls, then slides diagonally.
    Powder,
    /// Falls, then flows sideways to level out.
    Liquid,
    /// Rises, then drifts sideways.
    Gas,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDef {
    pub key: String,
    pub name: String,
    /// Packed ABGR (`0xAABBGGRR`), the byte order canvas `ImageData` expects.
    pub color: u32,
    pub movable: bool,
    pub gravity: bool,
    pub liquid: bool,
    pub gas: bool,
    pub explosive: bool,
}

impl MaterialDef {
    /// A definition with no capabilities. Chain the builder methods to add some.
    pub fn new(key: &str, name: &str, color: u32) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            color,
            movable: false,
            gravity: false,
            liquid: false,
            gas: false,
            explosive: false,
        }
    }

    pub fn movable(mut self) -> Self {
        self.movable = true;
        self
    }

    pub fn with_gravity(mut self) -> Self {
        self.gravity = true;
        self
    }

    pub fn liquid(mut self) -> Self {
        self.liquid = true;
        self
    }

    pub fn gas(mut self) -> Self {
        self.gas = true;
        self
    }

    pub fn explosive(mut self) -> Self {
        self.explosive = true;
        self
    }

    #[inline]
    pub fn behavior(&self) -> BehaviorKind {
        match (self.movable, self.gas, self.gravity, self.liquid) {
            (false, ..) => BehaviorKind::Static,
            (true, true, _, _) => BehaviorKind::Gas,
            (true, false, true, true) => BehaviorKind::Liquid,
            (true, false, true, false) => BehaviorKind::Powder,
            (true, false, false, _) => BehaviorKind::Static,
        }
    }

    fn validate(&self) -> SimResult<()> {
        if self.key.is_empty() {
            return Err(SimError::InvalidMaterial("material key must not be empty".into()));
        }
        if self.liquid && self.gas {
            return Err(SimError::InvalidMaterial(format!(
                "{} cannot be both liquid and gas",
                self.key
            )));
        }
        if self.gas && self.gravity {
            return Err(SimError::InvalidMaterial(format!(
                "{} is a gas and cannot be subject to gravity",
                self.key
            )));
        }
        Ok(())
    }
}

/// A grid cell: the material kind plus its colour, copied from the registry
/// when the cell is written so rendering never has to look it up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub kind: MaterialId,
    pub color: u32,
}

impl Cell {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind == EMPTY
    }
}

/// Parse `#rrggbb` into packed ABGR with full alpha.
pub fn parse_hex_color(hex: &str) -> Option<u32> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let rgb = u32::from_str_radix(digits, 16).ok()?;
    let r = (rgb >> 16) & 0xFF;
    let g = (rgb >> 8) & 0xFF;
    let b = rgb & 0xFF;
    Some(0xFF00_0000 | (b << 16) | (g << 8) | r)
}

/// Inverse of [`parse_hex_color`], alpha dropped.
pub fn format_hex_color(abgr: u32) -> String {
    let r = abgr & 0xFF;
    let g = (abgr >> 8) & 0xFF;
    let b = (abgr >> 16) & 0xFF;
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Immutable-after-startup table of materials, indexed by [`MaterialId`].
#[derive(Debug, Clone)]
pub struct MaterialRegistry {
    defs: Vec<MaterialDef>,
    by_key: HashMap<String, MaterialId>,
}

impl MaterialRegistry {
    /// Registry holding only `empty`.
    pub fn empty_only() -> Self {
        let empty = MaterialDef::new(EMPTY_KEY, "Empty", 0xFF00_0000);
        let mut by_key = HashMap::new();
        by_key.insert(empty.key.clone(), EMPTY);
        Self {
            defs: vec![empty],
            by_key,
        }
    }

    /// The stock palette: sand, water, wall, tnt and co2.
    pub fn builtin() -> Self {
        let mut registry = Self::empty_only();
        let stock = [
            MaterialDef::new("sand", "Sand", rgb(0xe3c078)).movable().with_gravity(),
            MaterialDef::new("water", "Water", rgb(0x4287f5))
                .movable()
                .with_gravity()
                .liquid(),
            MaterialDef::new("wall", "Wall", rgb(0x666666)),
            MaterialDef::new("tnt", "TNT", rgb(0xff0000))
                .movable()
                .with_gravity()
                .explosive(),
            MaterialDef::new("co2", "Carbon Dioxide", rgb(0xa0a0a0)).movable().gas(),
        ];
        for def in stock {
            let registered = registry.register(def);
            debug_assert!(registered.is_ok(), "stock material rejected: {:?}", registered);
        }
        registry
    }

    /// Add a material. Fails on duplicate keys, invalid flag combinations or
    /// when every id is taken.
    pub fn register(&mut self, def: MaterialDef) -> SimResult<MaterialId> {
        def.validate()?;
        if self.by_key.contains_key(&def.key) {
            return Err(SimError::InvalidMaterial(format!(
                "material {} is already registered",
                def.key
            )));
        }
        if self.defs.len() >= MAX_MATERIALS {
            return Err(SimError::InvalidMaterial(format!(
                "registry is full ({} materials)",
                MAX_MATERIALS
            )));
        }
        let id = self.defs.len() as MaterialId;
        self.by_key.insert(def.key.clone(), id);
        self.defs.push(def);
        Ok(id)
    }

    pub fn lookup(&self, key: &str) -> SimResult<&MaterialDef> {
        let id = self.id_of(key)?;
        Ok(&self.defs[id as usize])
    }

    pub fn id_of(&self, key: &str) -> SimResult<MaterialId> {
        self.by_key
            .get(key)
            .copied()
            .ok_or_else(|| SimError::UnknownMaterial(key.to_string()))
    }

    #[inline]
    pub fn get(&self, id: MaterialId) -> Option<&MaterialDef> {
        self.defs.get(id as usize)
    }

    #[inline]
    pub fn is_valid(&self, id: MaterialId) -> bool {
        (id as usize) < self.defs.len()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MaterialId, &MaterialDef)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(id, def)| (id as MaterialId, def))
    }

    pub fn cell(&self, id: MaterialId) -> Option<Cell> {
        self.get(id).map(|def| Cell { kind: id, color: def.color })
    }

    pub fn empty_cell(&self) -> Cell {
        Cell {
            kind: EMPTY,
            color: self.defs[EMPTY as usize].color,
        }
    }
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

const fn rgb(rgb: u32) -> u32 {
    let r = (rgb >> 16) & 0xFF;
    let g = (rgb >> 8) & 0xFF;
    let b = rgb & 0xFF;
    0xFF00_0000 | (b << 16) | (g << 8) | r
}
