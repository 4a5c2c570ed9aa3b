use crate::error::{CoreError, IndexKind};
use crate::geometry::{Circle, Rect, Vec2};

pub const MAP_EXTENT: f32 = 1000.0;
pub const CORRIDOR_MIN: f32 = 40.0;
pub const CORRIDOR_MAX: f32 = 960.0;

const ROOM_GRID_SIZE: usize = 3;
const ROOM_SPACING: f32 = 300.0;
const ROOM_ORIGIN: f32 = 50.0;
const ROOM_SIZE: f32 = 250.0;
const TASK_OFFSET: f32 = 60.0;
const TASK_DIAMETER: f32 = 30.0;
const ROOM_NAMES: [&str; ROOM_GRID_SIZE * ROOM_GRID_SIZE] = [
    "Cafeteria",
    "Weapons",
    "Navigation",
    "O2",
    "Shields",
    "Communications",
    "Storage",
    "Admin",
    "Reactor",
];

/// Coloring hint for the renderer. Carries no gameplay meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomCategory {
    Default,
    Storage,
    Reactor,
    Admin,
}

impl RoomCategory {
    const CYCLE: [RoomCategory; 4] = [
        RoomCategory::Default,
        RoomCategory::Storage,
        RoomCategory::Reactor,
        RoomCategory::Admin,
    ];

    fn for_room_index(index: usize) -> Self {
        Self::CYCLE[index % Self::CYCLE.len()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub bounds: Rect,
    pub name: String,
    pub category: RoomCategory,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub bounds: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vent {
    pub index: usize,
    pub bounds: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub index: usize,
    pub marker: Circle,
    pub name: String,
}

/// Rooms, walls, vents and task markers for one session. Never mutated after
/// construction; vents and tasks are indexed in construction order.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialLayout {
    rooms: Vec<Room>,
    walls: Vec<Wall>,
    vents: Vec<Vent>,
    tasks: Vec<Task>,
    corridor_bounds: Rect,
}

impl SpatialLayout {
    /// The fixed 3x3 station. Deterministic: every call yields identical
    /// geometry.
    pub fn authored() -> Self {
        let mut rooms = Vec::with_capacity(ROOM_GRID_SIZE * ROOM_GRID_SIZE);
        let mut walls = Vec::new();
        let mut vent_bounds = Vec::new();
        let mut task_markers = Vec::with_capacity(ROOM_GRID_SIZE * ROOM_GRID_SIZE);

        for column in 0..ROOM_GRID_SIZE {
            for row in 0..ROOM_GRID_SIZE {
                let x = column as f32 * ROOM_SPACING + ROOM_ORIGIN;
                let y = row as f32 * ROOM_SPACING + ROOM_ORIGIN;
                let room_index = rooms.len();
                rooms.push(Room {
                    bounds: Rect::new(x, y, ROOM_SIZE, ROOM_SIZE),
                    name: ROOM_NAMES[room_index].to_string(),
                    category: RoomCategory::for_room_index(room_index),
                });

                // Vents sit on the edge shared with the right and lower neighbours.
                if column + 1 < ROOM_GRID_SIZE {
                    vent_bounds.push(Rect::new(x + 200.0, y + 80.0, 50.0, 40.0));
                }
                if row + 1 < ROOM_GRID_SIZE {
                    vent_bounds.push(Rect::new(x + 80.0, y + 200.0, 40.0, 50.0));
                }

                task_markers.push(Circle::inscribed(
                    x + TASK_OFFSET,
                    y + TASK_OFFSET,
                    TASK_DIAMETER,
                ));

                if column == 1 && row == 1 {
                    walls.push(Wall {
                        bounds: Rect::new(x + 50.0, y + 30.0, 100.0, 20.0),
                    });
                    walls.push(Wall {
                        bounds: Rect::new(x + 30.0, y + 80.0, 20.0, 80.0),
                    });
                }
            }
        }

        Self::from_parts(
            rooms,
            walls,
            vent_bounds,
            task_markers,
            Rect::new(
                CORRIDOR_MIN,
                CORRIDOR_MIN,
                CORRIDOR_MAX - CORRIDOR_MIN,
                CORRIDOR_MAX - CORRIDOR_MIN,
            ),
        )
    }

    /// Builds a layout from explicit geometry. Vent and task indices follow
    /// slice order; tasks are named `Task 1`, `Task 2`, ...
    pub fn from_parts(
        rooms: Vec<Room>,
        walls: Vec<Wall>,
        vent_bounds: Vec<Rect>,
        task_markers: Vec<Circle>,
        corridor_bounds: Rect,
    ) -> Self {
        let vents = vent_bounds
            .into_iter()
            .enumerate()
            .map(|(index, bounds)| Vent { index, bounds })
            .collect();
        let tasks = task_markers
            .into_iter()
            .enumerate()
            .map(|(index, marker)| Task {
                index,
                marker,
                name: format!("Task {}", index + 1),
            })
            .collect();
        Self {
            rooms,
            walls,
            vents,
            tasks,
            corridor_bounds,
        }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn vents(&self) -> &[Vent] {
        &self.vents
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn corridor_bounds(&self) -> Rect {
        self.corridor_bounds
    }

    pub fn room_containing(&self, point: Vec2) -> Option<&Room> {
        self.rooms.iter().find(|room| room.bounds.contains(point))
    }

    pub fn is_inside_wall(&self, point: Vec2) -> bool {
        self.walls.iter().any(|wall| wall.bounds.contains(point))
    }

    pub fn is_in_bounds(&self, point: Vec2) -> bool {
        self.corridor_bounds.contains_inclusive(point)
    }

    pub fn vent_at(&self, point: Vec2) -> Option<usize> {
        self.vents
            .iter()
            .find(|vent| vent.bounds.contains(point))
            .map(|vent| vent.index)
    }

    pub fn task_at(&self, point: Vec2) -> Option<usize> {
        self.tasks
            .iter()
            .find(|task| task.marker.contains(point))
            .map(|task| task.index)
    }

    /// A point is walkable inside any room or inside the corridor bounds,
    /// provided no wall covers it.
    pub fn is_walkable(&self, point: Vec2) -> bool {
        if self.is_inside_wall(point) {
            return false;
        }
        self.room_containing(point).is_some() || self.is_in_bounds(point)
    }

    pub fn vent_center(&self, vent_index: usize) -> Result<Vec2, CoreError> {
        self.vents
            .get(vent_index)
            .map(|vent| vent.bounds.center())
            .ok_or(CoreError::OutOfRange {
                kind: IndexKind::Vent,
                index: vent_index,
                len: self.vents.len(),
            })
    }

    pub fn task(&self, task_index: usize) -> Result<&Task, CoreError> {
        self.tasks.get(task_index).ok_or(CoreError::OutOfRange {
            kind: IndexKind::Task,
            index: task_index,
            len: self.tasks.len(),
        })
    }
}
