use bevy::prelude::*;
use rand::Rng;

use crate::common::ids::IdAllocator;
use crate::common::rng::SimRng;
use crate::plugins::bus::events::{BulletCollisionEvent, ShootEvent, SplashDamageEvent};
use crate::plugins::bus::{EventBus, Published};

use super::definitions::BulletRegistry;
use super::{Bullet, Bullets};

/// Spawn one bullet per shot, moving at the speed the shot asked for.
///
/// The spread angle is sampled uniformly in `[-spread, spread]` and rotates the requested
/// direction. An unknown bullet type is a wiring bug and fails the drain.
pub fn on_shoot(
    In(shot): In<Published<ShootEvent>>,
    registry: Res<BulletRegistry>,
    mut rng: ResMut<SimRng>,
    mut ids: ResMut<IdAllocator>,
    mut bullets: ResMut<Bullets>,
) -> Result {
    let definition = registry.lookup(shot.bullet_type)?;

    let angle = if definition.spread > 0.0 {
        rng.rng.gen_range(-definition.spread..=definition.spread)
    } else {
        0.0
    };
    let direction = Vec2::from_angle(angle)
        .rotate(shot.direction)
        .normalize_or_zero();

    let id = ids.next_id();
    bullets.add(Bullet::spawn(
        id,
        definition,
        shot.origin,
        direction * shot.speed,
    ));
    trace!("bullet {id} spawned, type {}", shot.bullet_type);
    Ok(())
}

/// Retire the bullet that hit something. Already-spent or removed bullets are ignored.
pub fn on_bullet_collision(
    In(hit): In<Published<BulletCollisionEvent>>,
    mut bullets: ResMut<Bullets>,
) -> Result {
    let Some(bullet) = bullets.get_mut(hit.bullet_id) else {
        return Ok(());
    };
    if !bullet.is_spent() {
        bullet.life = 0.0;
    }
    Ok(())
}

/// Integrate motion, count life down, splash and remove the spent ones.
pub fn advance_bullets(
    time: Res<Time>,
    mut bullets: ResMut<Bullets>,
    mut bus: ResMut<EventBus>,
) {
    let dt = time.delta_secs();

    for bullet in bullets.iter_mut() {
        bullet.life -= dt;
        bullet.velocity *= (1.0 / bullet.definition.friction).powf(dt);
        bullet.position += bullet.velocity * dt;

        if bullet.is_spent() && bullet.definition.has_splash() {
            bus.publish(SplashDamageEvent {
                position: bullet.position,
                damage: bullet.definition.splash_damage,
                range: bullet.definition.splash_range,
            });
        }
    }

    let removed = bullets.retain(|bullet| !bullet.is_spent());
    if removed > 0 {
        trace!("{removed} bullets expired");
    }
}
