//! Cassette-backed project fixtures for analysis tests.

use chrono::Utc;
use serde_json::{json, Value};

use crate::adapters::replaying::ReplayingIssueTracker;
use crate::cassette::format::{Cassette, Interaction};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{Board, InwardLink, Issue, Sprint};

struct FixtureSprint {
    sprint: Sprint,
    issues: Vec<Issue>,
    error: Option<String>,
}

struct FixtureBoard {
    board: Board,
    sprints: Vec<FixtureSprint>,
    error: Option<String>,
}

/// Builds the tracker responses for a project, board by board.
#[derive(Default)]
pub struct ProjectFixture {
    boards: Vec<FixtureBoard>,
}

impl ProjectFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(mut self, id: u64, name: &str) -> Self {
        self.boards.push(FixtureBoard {
            board: Board { id, name: name.into() },
            sprints: Vec::new(),
            error: None,
        });
        self
    }

    pub fn sprint(mut self, id: u64, name: &str) -> Self {
        self.last_board().sprints.push(FixtureSprint {
            sprint: Sprint { id, name: name.into() },
            issues: Vec::new(),
            error: None,
        });
        self
    }

    /// Adds an issue to the last sprint. `blockers` are `(id, key)` pairs.
    pub fn issue(mut self, id: &str, key: &str, summary: &str, blockers: &[(&str, &str)]) -> Self {
        let inward_links = blockers
            .iter()
            .map(|(blocker_id, blocker_key)| InwardLink {
                link_type: "is blocked by".into(),
                blocker_id: (*blocker_id).into(),
                blocker_key: (*blocker_key).into(),
                blocker_summary: format!("{blocker_key} summary"),
            })
            .collect();
        self.last_sprint().issues.push(Issue {
            id: id.into(),
            key: key.into(),
            summary: summary.into(),
            inward_links,
        });
        self
    }

    pub fn fail_sprints(mut self, message: &str) -> Self {
        self.last_board().error = Some(message.into());
        self
    }

    pub fn fail_issues(mut self, message: &str) -> Self {
        self.last_sprint().error = Some(message.into());
        self
    }

    pub fn into_cassette(self) -> Cassette {
        let mut interactions = Vec::new();
        let mut push = |method: &str, input: Value, output: Value| {
            interactions.push(Interaction {
                seq: interactions.len() as u64,
                port: "tracker".into(),
                method: method.into(),
                input,
                output,
            });
        };

        let boards: Vec<&Board> = self.boards.iter().map(|b| &b.board).collect();
        push("list_boards", json!({"project_key": "PROJ"}), json!({"Ok": boards}));

        for board in &self.boards {
            let input = json!({"board_id": board.board.id});
            if let Some(error) = &board.error {
                push("list_sprints", input, json!({"Err": error}));
                continue;
            }
            let sprints: Vec<&Sprint> = board.sprints.iter().map(|s| &s.sprint).collect();
            push("list_sprints", input, json!({"Ok": sprints}));

            for sprint in &board.sprints {
                let input = json!({"sprint_id": sprint.sprint.id});
                match &sprint.error {
                    Some(error) => push("list_issues", input, json!({"Err": error})),
                    None => push("list_issues", input, json!({"Ok": sprint.issues})),
                }
            }
        }

        Cassette {
            name: "fixture".into(),
            recorded_at: Utc::now(),
            commit: "test".into(),
            interactions,
        }
    }

    pub fn into_tracker(self) -> ReplayingIssueTracker {
        ReplayingIssueTracker::new(CassetteReplayer::new(&self.into_cassette()))
    }

    fn last_board(&mut self) -> &mut FixtureBoard {
        self.boards.last_mut().expect("add a board first")
    }

    fn last_sprint(&mut self) -> &mut FixtureSprint {
        self.last_board().sprints.last_mut().expect("add a sprint first")
    }
}
