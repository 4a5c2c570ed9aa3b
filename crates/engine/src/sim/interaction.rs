use tracing::warn;

use crate::error::CoreError;
use crate::geometry::Vec2;
use crate::map::{SpatialLayout, TaskRegistry, VentGraph};

#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    None,
    TaskCompleted {
        index: usize,
        name: String,
        completed: u32,
    },
    Vented {
        from: usize,
        to: usize,
        destination: Vec2,
    },
}

/// Resolves an interact press at the player's position. A pending task under
/// the player takes priority over a vent; at most one outcome fires per call.
#[derive(Debug, Clone, Copy)]
pub struct InteractionController<'a> {
    layout: &'a SpatialLayout,
    vents: &'a VentGraph,
}

impl<'a> InteractionController<'a> {
    pub fn new(layout: &'a SpatialLayout, vents: &'a VentGraph) -> Self {
        Self { layout, vents }
    }

    pub fn attempt_interact(
        &self,
        tasks: &mut TaskRegistry,
        position: Vec2,
    ) -> InteractionOutcome {
        if let Some(task_index) = self.layout.task_at(position) {
            if !tasks.is_complete(task_index) {
                return match self.complete_task(tasks, task_index) {
                    Ok(outcome) => outcome,
                    Err(error) => no_outcome(error),
                };
            }
        }

        if let Some(vent_index) = self.layout.vent_at(position) {
            return match self.resolve_vent(vent_index) {
                Ok(outcome) => outcome,
                Err(error) => no_outcome(error),
            };
        }

        InteractionOutcome::None
    }

    fn complete_task(
        &self,
        tasks: &mut TaskRegistry,
        task_index: usize,
    ) -> Result<InteractionOutcome, CoreError> {
        let name = self.layout.task(task_index)?.name.clone();
        if !tasks.complete(task_index)? {
            return Ok(InteractionOutcome::None);
        }
        Ok(InteractionOutcome::TaskCompleted {
            index: task_index,
            name,
            completed: tasks.completed_count(),
        })
    }

    fn resolve_vent(&self, vent_index: usize) -> Result<InteractionOutcome, CoreError> {
        let to = self.vents.destination_of(vent_index)?;
        let destination = self.layout.vent_center(to)?;
        Ok(InteractionOutcome::Vented {
            from: vent_index,
            to,
            destination,
        })
    }
}

// Index errors here mean the layout, graph and registry disagree, which is a
// construction bug. Loud in debug builds, inert in release.
fn no_outcome(error: CoreError) -> InteractionOutcome {
    warn!(error = %error, "interaction_index_out_of_range");
    debug_assert!(false, "interaction index out of range: {error}");
    InteractionOutcome::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Circle, Rect};
    use crate::map::{Room, RoomCategory};

    fn authored() -> (SpatialLayout, VentGraph, TaskRegistry) {
        let layout = SpatialLayout::authored();
        let vents = VentGraph::for_layout(&layout);
        let tasks = TaskRegistry::for_layout(&layout);
        (layout, vents, tasks)
    }

    /// One room with a task circle drawn over vent 0.
    fn overlapping_layout() -> SpatialLayout {
        SpatialLayout::from_parts(
            vec![Room {
                bounds: Rect::new(0.0, 0.0, 200.0, 200.0),
                name: "Test".to_string(),
                category: RoomCategory::Default,
            }],
            Vec::new(),
            vec![
                Rect::new(40.0, 40.0, 40.0, 40.0),
                Rect::new(140.0, 140.0, 40.0, 40.0),
            ],
            vec![Circle::inscribed(45.0, 45.0, 30.0)],
            Rect::new(0.0, 0.0, 200.0, 200.0),
        )
    }

    #[test]
    fn completes_pending_task_under_player() {
        let (layout, vents, mut tasks) = authored();
        let controller = InteractionController::new(&layout, &vents);
        let outcome = controller.attempt_interact(&mut tasks, Vec2::new(125.0, 125.0));
        assert_eq!(
            outcome,
            InteractionOutcome::TaskCompleted {
                index: 0,
                name: "Task 1".to_string(),
                completed: 1,
            }
        );
        assert!(tasks.is_complete(0));
    }

    #[test]
    fn repeated_interact_on_completed_task_is_none() {
        let (layout, vents, mut tasks) = authored();
        let controller = InteractionController::new(&layout, &vents);
        let position = Vec2::new(125.0, 125.0);
        controller.attempt_interact(&mut tasks, position);
        for _ in 0..3 {
            assert_eq!(
                controller.attempt_interact(&mut tasks, position),
                InteractionOutcome::None
            );
            assert_eq!(tasks.completed_count(), 1);
        }
    }

    #[test]
    fn vent_teleports_to_destination_center() {
        let (layout, vents, mut tasks) = authored();
        let controller = InteractionController::new(&layout, &vents);
        let outcome = controller.attempt_interact(&mut tasks, Vec2::new(260.0, 140.0));
        assert_eq!(
            outcome,
            InteractionOutcome::Vented {
                from: 0,
                to: 3,
                destination: Vec2::new(150.0, 575.0),
            }
        );
        assert_eq!(tasks.completed_count(), 0);
    }

    #[test]
    fn every_vent_lands_on_its_paired_center() {
        let (layout, vents, mut tasks) = authored();
        let controller = InteractionController::new(&layout, &vents);
        for vent in layout.vents() {
            let expected_to = vents.destination_of(vent.index).expect("dest");
            let expected = layout.vents()[expected_to].bounds.center();
            match controller.attempt_interact(&mut tasks, vent.bounds.center()) {
                InteractionOutcome::Vented {
                    from,
                    to,
                    destination,
                } => {
                    assert_eq!(from, vent.index);
                    assert_eq!(to, expected_to);
                    assert_eq!(destination, expected);
                }
                other => panic!("vent {} gave {other:?}", vent.index),
            }
        }
    }

    #[test]
    fn empty_floor_yields_none() {
        let (layout, vents, mut tasks) = authored();
        let controller = InteractionController::new(&layout, &vents);
        assert_eq!(
            controller.attempt_interact(&mut tasks, Vec2::new(175.0, 175.0)),
            InteractionOutcome::None
        );
        assert_eq!(
            controller.attempt_interact(&mut tasks, Vec2::new(-1.0e9, 1.0e9)),
            InteractionOutcome::None
        );
    }

    #[test]
    fn pending_task_wins_over_overlapping_vent() {
        let layout = overlapping_layout();
        let vents = VentGraph::with_offset(2, 1);
        let mut tasks = TaskRegistry::for_layout(&layout);
        let controller = InteractionController::new(&layout, &vents);
        let spot = Vec2::new(60.0, 60.0);

        assert!(matches!(
            controller.attempt_interact(&mut tasks, spot),
            InteractionOutcome::TaskCompleted { index: 0, .. }
        ));
        assert_eq!(
            controller.attempt_interact(&mut tasks, spot),
            InteractionOutcome::Vented {
                from: 0,
                to: 1,
                destination: Vec2::new(160.0, 160.0),
            }
        );
    }
}
