//! The playable dungeon: the finished grid, its occupants, the player, and what has been seen.
//! This module exists to apply moves in a fixed order and keep discovery current after each one.
//! It does not own map generation or any rendering technology.

use log::debug;
use slotmap::SlotMap;

use crate::config::DungeonConfig;
use crate::entity::{Door, Entity, Player};
use crate::grid::Grid;
use crate::mapgen::{self, GeneratedDungeon, GenerationStats, Room};
use crate::types::{Cell, Direction, EntityId, Pos};

mod hash;
mod visibility;

#[cfg(test)]
pub(crate) mod test_support;

pub use visibility::{DiscoveredCells, reveal_from, sample_count};

pub struct Dungeon {
    config: DungeonConfig,
    seed: u64,
    tick: u64,
    grid: Grid,
    entities: SlotMap<EntityId, Entity>,
    occupancy: Vec<Option<EntityId>>,
    player: Player,
    spawn: Pos,
    rooms: Vec<Room>,
    stats: GenerationStats,
    discovered: DiscoveredCells,
}

impl Dungeon {
    /// Generates a dungeon for `seed` and reveals the view from the spawn.
    pub fn new(config: DungeonConfig, seed: u64) -> Self {
        let generated = mapgen::generate_dungeon(&config, seed);
        Self::from_generated(config, seed, generated)
    }

    /// Wraps an already generated layout. Each door becomes an entity occupying its cell.
    pub fn from_generated(config: DungeonConfig, seed: u64, generated: GeneratedDungeon) -> Self {
        let GeneratedDungeon { grid, spawn, rooms, doors, stats } = generated;
        let mut entities = SlotMap::with_key();
        let mut occupancy = vec![None; grid.width() * grid.height()];
        for entity in doors.into_iter().map(Entity::Door) {
            let pos = entity.pos();
            if !grid.in_bounds(pos) {
                continue;
            }
            occupancy[grid.index(pos)] = Some(entities.insert(entity));
        }

        let discovered = DiscoveredCells::new(grid.width(), grid.height());
        let player = Player::new(spawn, config.sight_radius);
        let mut dungeon = Self {
            config,
            seed,
            tick: 0,
            grid,
            entities,
            occupancy,
            player,
            spawn,
            rooms,
            stats,
            discovered,
        };
        dungeon.reveal();
        dungeon
    }

    /// Throws the current dungeon away and generates a fresh one with the same configuration.
    /// Discovery and the tick counter start over.
    pub fn regenerate(&mut self, seed: u64) {
        debug!("regenerating dungeon with seed {seed}");
        let generated = mapgen::generate_dungeon(&self.config, seed);
        *self = Self::from_generated(self.config.clone(), seed, generated);
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn spawn(&self) -> Pos {
        self.spawn
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_pos(&self) -> Pos {
        self.player.pos
    }

    pub fn sight_radius(&self) -> f64 {
        self.player.sight_radius
    }

    /// Wall, Floor, or OutOfRange for anything past the edge.
    pub fn cell_at(&self, pos: Pos) -> Cell {
        self.grid.get(pos)
    }

    pub fn occupant_at(&self, pos: Pos) -> Option<&Entity> {
        occupant_id(&self.grid, &self.occupancy, pos).and_then(|id| self.entities.get(id))
    }

    pub fn is_transparent(&self, pos: Pos) -> bool {
        transparent_at(&self.grid, &self.entities, &self.occupancy, pos)
    }

    pub fn is_discovered(&self, pos: Pos) -> bool {
        self.discovered.contains(pos)
    }

    pub fn discovered(&self) -> &DiscoveredCells {
        &self.discovered
    }

    pub fn doors(&self) -> impl Iterator<Item = &Door> + '_ {
        self.entities.values().filter_map(Entity::as_door)
    }

    /// Moves the player one cell. A destination that is not floor, or whose occupant blocks
    /// movement, leaves everything untouched and returns `false`.
    ///
    /// A successful move advances the tick, lets the destination occupant react, updates every
    /// entity, moves the player, and finally reveals the new view.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        let destination = direction.step(self.player.pos, 1);
        if self.grid.get(destination) != Cell::Floor {
            return false;
        }
        let occupant = occupant_id(&self.grid, &self.occupancy, destination);
        if occupant.and_then(|id| self.entities.get(id)).is_some_and(Entity::blocks_movement) {
            return false;
        }

        self.tick += 1;
        if let Some(entity) = occupant.and_then(|id| self.entities.get_mut(id))
            && entity.is_interactable()
        {
            entity.interact(self.tick);
        }
        for entity in self.entities.values_mut() {
            entity.update(self.tick, self.config.ticks_for_door_to_close);
        }
        self.player.step(direction);
        self.reveal();
        true
    }

    /// Text dump of the dungeon, one line per row. With `fog`, undiscovered cells are blank.
    pub fn render_ascii(&self, fog: bool) -> String {
        let mut text = String::with_capacity((self.width() + 1) * self.height());
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                let pos = Pos { y, x };
                let glyph = if pos == self.player.pos {
                    '@'
                } else if fog && !self.is_discovered(pos) {
                    ' '
                } else if let Some(door) = self.occupant_at(pos).and_then(Entity::as_door) {
                    if door.is_open() { '/' } else { '+' }
                } else if self.grid.is_open(pos) {
                    '.'
                } else {
                    '#'
                };
                text.push(glyph);
            }
            text.push('\n');
        }
        text
    }

    fn reveal(&mut self) {
        let Self { grid, entities, occupancy, discovered, player, .. } = self;
        reveal_from(discovered, player.pos, player.sight_radius, |pos| {
            transparent_at(grid, entities, occupancy, pos)
        });
    }
}

fn occupant_id(grid: &Grid, occupancy: &[Option<EntityId>], pos: Pos) -> Option<EntityId> {
    if !grid.in_bounds(pos) {
        return None;
    }
    occupancy[grid.index(pos)]
}

/// Floor with no vision-blocking occupant. Walls and out-of-range cells are opaque.
fn transparent_at(
    grid: &Grid,
    entities: &SlotMap<EntityId, Entity>,
    occupancy: &[Option<EntityId>],
    pos: Pos,
) -> bool {
    if grid.get(pos) != Cell::Floor {
        return false;
    }
    !occupant_id(grid, occupancy, pos)
        .and_then(|id| entities.get(id))
        .is_some_and(Entity::blocks_vision)
}
