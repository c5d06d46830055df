//! Pure projection of a session into what the host should draw.

use rand::Rng;

use crate::model::{Color, DrawResult, Team, TouchId};

use super::session::{Phase, TouchSession};

const HIGHLIGHT_BORDER: f64 = 3.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Border {
    pub width: f64,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    pub id: TouchId,
    /// Center in screen coordinates.
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub fill: Color,
    pub border: Option<Border>,
    pub team: Option<Team>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderSnapshot {
    pub circles: Vec<Circle>,
    pub countdown: Option<u32>,
    pub debug: Option<String>,
}

pub fn render<R: Rng>(session: &TouchSession<R>) -> RenderSnapshot {
    let config = session.config();
    let radius = config.circle_radius;
    let (circles, countdown) = match session.result() {
        None => {
            let circles = session
                .touches()
                .iter()
                .map(|(&id, position)| Circle {
                    id,
                    x: position.x,
                    y: position.y,
                    radius,
                    fill: session.colors().get(&id).cloned().unwrap_or_else(Color::fallback),
                    border: None,
                    team: None,
                })
                .collect::<Vec<_>>();
            let counting = session.phase() == Phase::Collecting
                && !circles.is_empty()
                && session.countdown() > 0;
            (circles, counting.then_some(session.countdown()))
        }
        Some(DrawResult::Single(winner)) => {
            let circle = Circle {
                id: winner.id,
                x: winner.position.x,
                y: winner.position.y,
                radius,
                fill: winner.color.clone(),
                border: Some(Border { width: HIGHLIGHT_BORDER, color: Color::new("#fff") }),
                team: None,
            };
            (vec![circle], None)
        }
        Some(DrawResult::Groups(members)) => {
            let circles = members
                .iter()
                .map(|(&id, member)| Circle {
                    id,
                    x: member.position.x,
                    y: member.position.y,
                    radius,
                    fill: config.team_color(member.team).clone(),
                    border: Some(Border { width: HIGHLIGHT_BORDER, color: member.color.clone() }),
                    team: Some(member.team),
                })
                .collect();
            (circles, None)
        }
    };
    let debug = config.show_debug.then(|| debug_line(session.result()));
    RenderSnapshot { circles, countdown, debug }
}

fn debug_line(result: Option<&DrawResult>) -> String {
    match result {
        None => "Picked: --- | Color: ---".to_string(),
        Some(DrawResult::Single(winner)) => {
            format!("Picked: {} | Color: {}", winner.id, winner.color)
        }
        Some(groups @ DrawResult::Groups(_)) => {
            let (a, b) = groups.team_sizes();
            format!("A: {a} | B: {b}")
        }
    }
}
