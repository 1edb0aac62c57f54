//! Status and KANO groupings.

use serde::Serialize;

use super::RequirementCard;
use crate::model::status::kano::{ATTRACTIVE, INDIFFERENT, MUST_BE, ONE_DIMENSIONAL, REVERSE};
use crate::model::status::{ANALYZING, COLLECTED, COMPLETED, CONFIRMED, IN_PROGRESS, REJECTED};
use crate::model::Requirement;

/// Kanban columns. Requirements in any other status are not shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KanbanBoard {
    pub collected: Vec<RequirementCard>,
    pub analyzing: Vec<RequirementCard>,
    pub confirmed: Vec<RequirementCard>,
    pub rejected: Vec<RequirementCard>,
}

pub fn kanban_board(requirements: &[Requirement]) -> KanbanBoard {
    let mut board = KanbanBoard::default();
    for r in requirements {
        let column = match r.status.as_str() {
            COLLECTED => &mut board.collected,
            ANALYZING => &mut board.analyzing,
            CONFIRMED => &mut board.confirmed,
            REJECTED => &mut board.rejected,
            _ => continue,
        };
        column.push(r.into());
    }
    board
}

/// Roadmap columns. Every requirement lands somewhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoadmapStatusGroups {
    pub collected: Vec<RequirementCard>,
    pub analyzing: Vec<RequirementCard>,
    pub confirmed: Vec<RequirementCard>,
    pub rejected: Vec<RequirementCard>,
    pub completed: Vec<RequirementCard>,
    pub in_progress: Vec<RequirementCard>,
}

/// Group by status; statuses outside the six known ones fall into `collected`.
pub fn roadmap_status_groups(requirements: &[Requirement]) -> RoadmapStatusGroups {
    let mut groups = RoadmapStatusGroups::default();
    for r in requirements {
        let column = match r.status.as_str() {
            ANALYZING => &mut groups.analyzing,
            CONFIRMED => &mut groups.confirmed,
            REJECTED => &mut groups.rejected,
            COMPLETED => &mut groups.completed,
            IN_PROGRESS => &mut groups.in_progress,
            _ => &mut groups.collected,
        };
        column.push(r.into());
    }
    groups
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KanoGroups {
    pub must_be: Vec<RequirementCard>,
    pub one_dimensional: Vec<RequirementCard>,
    pub attractive: Vec<RequirementCard>,
    pub indifferent: Vec<RequirementCard>,
    pub reverse: Vec<RequirementCard>,
}

/// Group by exact `kano_category`; unclassified requirements are left out.
pub fn kano_groups(requirements: &[Requirement]) -> KanoGroups {
    let mut groups = KanoGroups::default();
    for r in requirements {
        let column = match r.analysis.kano.kano_category.as_deref() {
            Some(MUST_BE) => &mut groups.must_be,
            Some(ONE_DIMENSIONAL) => &mut groups.one_dimensional,
            Some(ATTRACTIVE) => &mut groups.attractive,
            Some(INDIFFERENT) => &mut groups.indifferent,
            Some(REVERSE) => &mut groups.reverse,
            _ => continue,
        };
        column.push(r.into());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lenses::fixtures::req;

    fn ids(cards: &[RequirementCard]) -> Vec<i64> {
        cards.iter().map(|c| c.id).collect()
    }

    #[test]
    fn kanban_drops_statuses_without_a_column() {
        let reqs = vec![
            req(1, "collected", "high"),
            req(2, "completed", "low"),
            req(3, "rejected", "low"),
            req(4, "collected", "low"),
        ];
        let board = kanban_board(&reqs);
        assert_eq!(ids(&board.collected), vec![1, 4]);
        assert_eq!(ids(&board.rejected), vec![3]);
        assert!(board.analyzing.is_empty());
        assert!(board.confirmed.is_empty());
    }

    #[test]
    fn roadmap_groups_send_unknown_status_to_collected() {
        let reqs = vec![
            req(1, "blocked", "high"),
            req(2, "in_progress", "low"),
            req(3, "completed", "low"),
            req(4, "collected", "low"),
        ];
        let groups = roadmap_status_groups(&reqs);
        assert_eq!(ids(&groups.collected), vec![1, 4]);
        assert_eq!(ids(&groups.in_progress), vec![2]);
        assert_eq!(ids(&groups.completed), vec![3]);
    }

    #[test]
    fn kano_groups_by_exact_category() {
        let mut a = req(1, "collected", "high");
        a.analysis.kano.kano_category = Some("attractive".into());
        let mut b = req(2, "collected", "high");
        b.analysis.kano.kano_category = Some("must-be".into());
        let mut c = req(3, "collected", "high");
        c.analysis.kano.kano_category = Some("must_be".into());
        let d = req(4, "collected", "high");

        let groups = kano_groups(&[a, b, c, d]);
        assert_eq!(ids(&groups.attractive), vec![1]);
        assert_eq!(ids(&groups.must_be), vec![3]);
        assert!(groups.reverse.is_empty());
    }
}
