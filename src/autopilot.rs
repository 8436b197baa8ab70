//! Idle/demo autopilot
//!
//! Steers the paddle with keyboard-style intents, the same inputs a player
//! produces. It positions the paddle so the deflection sends the ball toward
//! the lowest remaining brick.

use crate::sim::{GameState, PaddleDirection};

/// Half-width of the zone around the aim point where the paddle holds still
pub const DEAD_ZONE: f32 = 4.0;

/// Direction that moves the paddle toward the aim point under the ball
pub fn steer(state: &GameState) -> PaddleDirection {
    let aim = state.ball.pos.x - aim_offset(state);
    let delta = aim - state.paddle.center_x();

    if delta > DEAD_ZONE {
        PaddleDirection::Right
    } else if delta < -DEAD_ZONE {
        PaddleDirection::Left
    } else {
        PaddleDirection::None
    }
}

/// Ball offset from the paddle center that deflects toward the target brick
fn aim_offset(state: &GameState) -> f32 {
    let deflection = state.tuning.paddle_deflection;
    if deflection.abs() < f32::EPSILON {
        return 0.0;
    }

    let Some(target) = state
        .bricks
        .iter()
        .filter(|b| b.is_active())
        .max_by(|a, b| a.rect.bottom().total_cmp(&b.rect.bottom()))
    else {
        return 0.0;
    };

    // Ticks for the ball to climb from the paddle to the brick
    let rise = (state.paddle.pos.y - target.rect.bottom()).max(1.0);
    let ticks = rise / state.ball.speed.max(f32::EPSILON);
    let wanted_dx = (target.rect.center_x() - state.ball.pos.x) / ticks;

    let max_offset = state.paddle.size.x / 2.0 - DEAD_ZONE;
    (wanted_dx / deflection).clamp(-max_offset, max_offset)
}
