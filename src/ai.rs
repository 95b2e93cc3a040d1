use glam::Vec2;
use std::time::Duration;

use crate::entities::{FamilyMember, Grunt, Statue, StatueTarget};
use crate::geometry::velocity_toward;
use crate::level::{grunt_speed, statue_speed};

/// Points every living grunt at the player
pub fn steer_grunts(grunts: &mut [Grunt], player: Vec2, level: u32) {
    let speed = grunt_speed(level);
    for grunt in grunts.iter_mut().filter(|g| g.is_alive()) {
        grunt.velocity = velocity_toward(grunt.position, player, speed);
    }
}

/// Index of the living family member closest to `from`
pub fn nearest_family(from: Vec2, family: &[FamilyMember]) -> Option<usize> {
    family
        .iter()
        .enumerate()
        .filter(|(_, member)| member.is_alive())
        .map(|(i, member)| (i, from.distance(member.position)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Nearest living family member, or the player when there is none
pub fn choose_target(from: Vec2, family: &[FamilyMember]) -> StatueTarget {
    nearest_family(from, family).map_or(StatueTarget::Player, StatueTarget::Family)
}

/// A target needs replacing once it is missing or dead
fn target_is_valid(target: Option<StatueTarget>, family: &[FamilyMember]) -> bool {
    match target {
        None => false,
        Some(StatueTarget::Player) => true,
        Some(StatueTarget::Family(i)) => family.get(i).is_some_and(|m| m.is_alive()),
    }
}

fn target_position(target: StatueTarget, family: &[FamilyMember], player: Vec2) -> Vec2 {
    match target {
        StatueTarget::Player => player,
        StatueTarget::Family(i) => family.get(i).map_or(player, |m| m.position),
    }
}

/// Retargets statues whose quarry is gone, then walks them toward it unless frozen
pub fn steer_statues(
    statues: &mut [Statue],
    family: &[FamilyMember],
    player: Vec2,
    level: u32,
    now: Duration,
) {
    let speed = statue_speed(level);
    for statue in statues.iter_mut().filter(|s| s.is_alive()) {
        if !target_is_valid(statue.target, family) {
            statue.target = Some(choose_target(statue.position, family));
        }
        let target = statue.target.unwrap_or(StatueTarget::Player);
        let speed = if statue.is_frozen(now) { 0.0 } else { speed };
        statue.velocity = velocity_toward(
            statue.position,
            target_position(target, family, player),
            speed,
        );
    }
}
